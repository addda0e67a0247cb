use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use deadlock_witness::{DetectOptions, detect_with};
use witness_bench::{reverse_chain, ring};

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect");
    for &n in &[16usize, 64, 256] {
        let deadlocked = ring(n);
        let safe = reverse_chain(n);
        for concurrent_graph in [false, true] {
            let options = DetectOptions { concurrent_graph };
            let label = if concurrent_graph { "concurrent" } else { "sequential" };

            group.bench_with_input(BenchmarkId::new(format!("ring/{label}"), n), &deadlocked, |b, s| {
                b.iter(|| detect_with(black_box(s), &options))
            });
            group.bench_with_input(BenchmarkId::new(format!("chain/{label}"), n), &safe, |b, s| {
                b.iter(|| detect_with(black_box(s), &options))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_detect);
criterion_main!(benches);
