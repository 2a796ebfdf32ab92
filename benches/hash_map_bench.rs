use accumulate::{HashMap, Key};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> Key {
    Key::from(format!("k{:016x}", n))
}

fn bench_put(c: &mut Criterion) {
    c.bench_function("hash_map_put_10k", |b| {
        b.iter_batched(
            HashMap::<u64>::new,
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
    c.bench_function("hash_map_get_hit", |b| {
        let mut m = HashMap::new();
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

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("hash_map_get_miss", |b| {
        let mut m = HashMap::new();
        for (i, x) in lcg(11).take(10_000).enumerate() {
            m.put(key(x), i as u64).unwrap();
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            let k = key(miss.next().unwrap());
            black_box(m.get(&k).unwrap());
        })
    });
}

fn bench_iterate(c: &mut Criterion) {
    c.bench_function("hash_map_iterate_10k", |b| {
        let mut m = HashMap::new();
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
    targets = bench_put, bench_get_hit, bench_get_miss, bench_iterate
}
criterion_main!(benches);
