use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rbchain::{ChainedHashMap, MapConfig};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_add_fresh_100k(c: &mut Criterion) {
    c.bench_function("chained::add_fresh_100k", |b| {
        b.iter_batched(
            ChainedHashMap::new,
            |mut m| {
                for x in lcg(1).take(100_000) {
                    let k = key(x);
                    let _ = m.add(&k, &k).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_add_presized_100k(c: &mut Criterion) {
    c.bench_function("chained::add_presized_100k", |b| {
        b.iter_batched(
            || ChainedHashMap::with_capacity(1 << 18).unwrap(),
            |mut m| {
                for x in lcg(3).take(100_000) {
                    let k = key(x);
                    let _ = m.add(&k, &k).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_add_triggering_grow(c: &mut Criterion) {
    c.bench_function("chained::add_triggering_grow_64k", |b| {
        b.iter_batched(
            || {
                // Filled to exactly the threshold; the next new key doubles.
                let cfg = MapConfig::new()
                    .with_initial_capacity(1 << 16)
                    .with_max_load_factor(1.0);
                let mut m = ChainedHashMap::with_config(cfg).unwrap();
                for x in lcg(4).take(1 << 16) {
                    let _ = m.add(&key(x), "v").unwrap();
                }
                m
            },
            |mut m| {
                let _ = m.add("trigger", "v").unwrap();
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit_10k(c: &mut Criterion) {
    c.bench_function("chained::get_hit_10k_on_100k", |b| {
        let mut m = ChainedHashMap::new();
        let keys: Vec<_> = lcg(7).take(100_000).map(key).collect();
        for k in &keys {
            let _ = m.add(k, "v").unwrap();
        }
        // Precompute 10k random query keys using LCG
        let n = keys.len();
        let mut s = 0x9e3779b97f4a7c15u64;
        let queries: Vec<String> = (0..10_000)
            .map(|_| {
                s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                keys[(s as usize) % n].clone()
            })
            .collect();
        b.iter(|| {
            for k in &queries {
                black_box(m.get(k));
            }
        })
    });
}

fn bench_get_miss_10k(c: &mut Criterion) {
    c.bench_function("chained::get_miss_10k_on_100k", |b| {
        let mut m = ChainedHashMap::new();
        for x in lcg(11).take(100_000) {
            let _ = m.add(&key(x), "v").unwrap();
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            for _ in 0..10_000 {
                let k = key(miss.next().unwrap());
                black_box(m.get(&k));
            }
        })
    });
}

fn bench_remove_10k(c: &mut Criterion) {
    c.bench_function("chained::remove_10k_of_100k", |b| {
        b.iter_batched(
            || {
                let mut m = ChainedHashMap::new();
                let keys: Vec<_> = lcg(5).take(100_000).map(key).collect();
                for k in &keys {
                    let _ = m.add(k, "v").unwrap();
                }
                let to_remove: Vec<String> = keys.into_iter().step_by(10).collect();
                (m, to_remove)
            },
            |(mut m, to_remove)| {
                for k in &to_remove {
                    black_box(m.remove(k));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_insert;
    config = bench_config();
    targets = bench_add_fresh_100k, bench_add_presized_100k, bench_add_triggering_grow
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_get_hit_10k,
              bench_get_miss_10k,
              bench_remove_10k
}
criterion_main!(benches_insert, benches_ops);
