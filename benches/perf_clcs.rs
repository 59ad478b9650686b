use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use clcs_dp::{ClcsEngine, ClcsProblem};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn random_dna(rng: &mut StdRng, len: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx]
        })
        .collect()
}

fn rss_kib() -> u64 {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    match get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        Some(p) => p.memory() / 1024,
        None => 0,
    }
}

fn bench_clcs_perf(c: &mut Criterion) {
    let mut group = c.benchmark_group("clcs_full_table");
    group.sample_size(10);
    for &len in &[128usize, 256, 512] {
        for &constraint_len in &[0usize, 4, 16] {
            group.bench_function(format!("clcs_len_{len}_r_{constraint_len}"), |b| {
                b.iter_batched(
                    || {
                        let mut rng = StdRng::seed_from_u64(42);
                        let s = random_dna(&mut rng, len);
                        let t = random_dna(&mut rng, len);
                        let pattern = random_dna(&mut rng, constraint_len);
                        (s, t, pattern)
                    },
                    |(s, t, pattern)| {
                        let before = rss_kib();
                        let engine = ClcsEngine::new(ClcsProblem::new(&s, &t, &pattern));
                        let result = engine.run().expect("fits default cell limit");
                        let after = rss_kib();
                        criterion::black_box(result);
                        // stderr keeps the memory delta out of criterion's report
                        eprintln!(
                            "RSS KiB delta (clcs {len}, r={constraint_len}): {}",
                            after.saturating_sub(before)
                        );
                    },
                    BatchSize::PerIteration,
                )
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_clcs_perf);
criterion_main!(benches);
