use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matrix_reduce::{Matrix, ReduceEngine, SequentialSum, SumMatrix};

fn bench_reduce(c: &mut Criterion) {
    let matrix = Matrix::random(1024, 1024, 42).expect("valid shape");
    let mut group = c.benchmark_group("reduce_1024x1024");

    group.bench_function("sequential", |b| {
        b.iter(|| SequentialSum.sum(black_box(&matrix)))
    });

    for workers in [1usize, 2, 4, 8] {
        let engine = ReduceEngine::with_workers(workers).expect("workers > 0");
        group.bench_with_input(BenchmarkId::new("parallel", workers), &engine, |b, engine| {
            b.iter(|| engine.reduce(black_box(&matrix)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reduce);
criterion_main!(benches);
