use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossbeam_channel::unbounded;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use counter_agent::{AgentConfig, Controls, CounterAgent, TimerAgent};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Direction {
    Up,
    Down,
}

/// Count on a background thread until a timer presses "stop".
#[derive(Debug, Parser)]
#[command(name = "counter-demo", version)]
struct Args {
    /// Milliseconds before the timer stops the counter
    #[arg(long, default_value_t = 5_000)]
    stop_after_ms: u64,

    /// Milliseconds between two displayed values
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    #[arg(long, value_enum, default_value_t = Direction::Up)]
    direction: Direction,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_thread_names(true)
        .init();

    let args = Args::parse();
    let (display_tx, display_rx) = unbounded();

    let config = AgentConfig::builder()
        .tick(Duration::from_millis(args.tick_ms))
        .build();
    let agent = CounterAgent::spawn(config, display_tx).context("Failed to start counter")?;
    let controls = Controls::new(agent.handle());

    match args.direction {
        Direction::Up => controls.up(),
        Direction::Down => controls.down(),
    }

    let timer_controls = controls.clone();
    let timer = TimerAgent::start(Duration::from_millis(args.stop_after_ms), move || {
        timer_controls.stop()
    })
    .context("Failed to start timer")?;

    // This thread plays the display: it renders every value the agent sends
    // until the agent exits and drops its sender.
    for value in display_rx {
        println!("{}", value);
    }

    let last = agent.join().context("Counter thread failed")?;
    timer.join().context("Timer thread failed")?;
    println!("stopped at {} (controls enabled: {})", last, controls.is_enabled());

    Ok(())
}
