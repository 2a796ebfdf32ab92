use accumulate::{Key, TreeMap};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> Key {
    Key::from((n % 1_000_000) as i64)
}

fn bench_put(c: &mut Criterion) {
    c.bench_function("tree_map_put_10k", |b| {
        b.iter_batched(
            TreeMap::<u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.put(key(x), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("tree_map_get_hit", |b| {
        let mut m = TreeMap::new();
        let keys: Vec<Key> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            m.put(k.clone(), i as u64).unwrap();
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k).unwrap());
        })
    });
}

fn bench_remove_insert_churn(c: &mut Criterion) {
    c.bench_function("tree_map_churn", |b| {
        let mut m = TreeMap::new();
        for (i, x) in lcg(11).take(10_000).enumerate() {
            m.put(key(x), i as u64).unwrap();
        }
        let mut it = lcg(11).take(10_000).collect::<Vec<_>>().into_iter().cycle();
        b.iter(|| {
            let k = key(it.next().unwrap());
            let v = m.remove(&k).unwrap();
            if let Some(v) = v {
                m.put(k, v).unwrap();
            }
        })
    });
}

fn bench_in_order_walk(c: &mut Criterion) {
    c.bench_function("tree_map_in_order_10k", |b| {
        let mut m = TreeMap::new();
        for (i, x) in lcg(23).take(10_000).enumerate() {
            m.put(key(x), i as u64).unwrap();
        }
        b.iter(|| {
            let total: u64 = m.iter().map(|e| *e.value()).sum();
            black_box(total)
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_put, bench_get_hit, bench_remove_insert_churn, bench_in_order_walk
}
criterion_main!(benches);
