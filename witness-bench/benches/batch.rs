use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use deadlock_witness::{DetectOptions, Snapshot, detect_batch};
use witness_bench::{reverse_chain, ring};

fn bench_batch(c: &mut Criterion) {
    let snapshots: Vec<Snapshot> = (0..128)
        .map(|i| if i % 2 == 0 { ring(48) } else { reverse_chain(48) })
        .collect();

    let mut group = c.benchmark_group("batch");
    for &workers in &[1usize, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &w| {
            b.iter(|| detect_batch(black_box(&snapshots), w, &DetectOptions::default()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_batch);
criterion_main!(benches);
