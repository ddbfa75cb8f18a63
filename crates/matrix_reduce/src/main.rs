use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

use matrix_reduce::{
    CheckedSum, EngineConfig, Matrix, Max, Min, ReduceEngine, SequentialSum, Sum, SumMatrix,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Op {
    Sum,
    CheckedSum,
    Max,
    Min,
}

/// Reduce a randomly generated matrix with a fixed number of worker threads.
#[derive(Debug, Parser)]
#[command(name = "matrix-sum", version)]
struct Args {
    /// Number of rows
    #[arg(long, default_value_t = 1000)]
    rows: usize,

    /// Number of columns
    #[arg(long, default_value_t = 1000)]
    columns: usize,

    /// Worker threads (defaults to the config file, then available parallelism)
    #[arg(long)]
    workers: Option<usize>,

    /// Seed for the generated values
    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = Op::Sum)]
    op: Op,

    /// Abort if the workers have not all finished after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// JSON engine config; command-line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_thread_names(true)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("Failed to load engine config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.join_timeout_ms = Some(timeout_ms);
    }

    let matrix = Matrix::random(args.rows, args.columns, args.seed).with_context(|| {
        format!(
            "Failed to build a {}x{} matrix",
            args.rows, args.columns
        )
    })?;

    let workers = config.workers;
    let engine = ReduceEngine::new(config).context("Invalid engine configuration")?;
    let engine = match args.op {
        Op::Sum => engine.with_reduction(Sum),
        Op::CheckedSum => engine.with_reduction(CheckedSum),
        Op::Max => engine.with_reduction(Max),
        Op::Min => engine.with_reduction(Min),
    };

    let started = Instant::now();
    let value = engine
        .reduce(&matrix)
        .with_context(|| format!("Reduction with {} workers failed", workers))?;
    let elapsed = started.elapsed();

    println!(
        "{} of {}x{} matrix with {} workers: {} ({})",
        engine.reduction().name(),
        matrix.rows(),
        matrix.columns(),
        workers,
        value,
        format_elapsed(elapsed)
    );

    if matches!(args.op, Op::Sum | Op::CheckedSum) {
        let reference = SequentialSum.sum(&matrix)?;
        println!(
            "sequential reference: {} (difference {:e})",
            reference,
            (reference - value).abs()
        );
    }

    Ok(())
}

fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_millis(1) {
        format!("{}us", elapsed.as_micros())
    } else {
        format!("{:.3}ms", elapsed.as_secs_f64() * 1000.0)
    }
}
