use bytes::Bytes;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use recache_core::{DEFAULT_TTL, ResponseCache};
use std::sync::atomic::{AtomicU64, Ordering};

/// Crea un payload JSON de prueba con N hoteles
fn create_test_payload(num_hotels: usize) -> Bytes {
    let hotels: Vec<serde_json::Value> = (0..num_hotels)
        .map(|i| {
            serde_json::json!({
                "id": i,
                "name": format!("Hotel {}", i),
                "city": "Testville",
                "price_per_night": 100 + i,
            })
        })
        .collect();
    let body = serde_json::json!({ "hotels": hotels });
    Bytes::from(serde_json::to_vec(&body).expect("payload serializes"))
}

/// Benchmark: store get (hit)
fn bench_store_get_hit(c: &mut Criterion) {
    let cache = ResponseCache::new();
    cache.insert("/api/hotels", create_test_payload(100), DEFAULT_TTL);

    c.bench_function("store_get_hit", |b| {
        b.iter(|| {
            let result = cache.get("/api/hotels");
            std::hint::black_box(result)
        });
    });
}

/// Benchmark: store get (miss)
fn bench_store_get_miss(c: &mut Criterion) {
    let cache = ResponseCache::new();

    c.bench_function("store_get_miss", |b| {
        b.iter(|| {
            let result = cache.get("/api/nonexistent");
            std::hint::black_box(result)
        });
    });
}

/// Benchmark: store insert con keys distintas
fn bench_store_insert(c: &mut Criterion) {
    let cache = ResponseCache::new();
    let payload = create_test_payload(100);
    let counter = AtomicU64::new(0);

    c.bench_function("store_insert", |b| {
        b.iter(|| {
            let n = counter.fetch_add(1, Ordering::Relaxed);
            cache.insert(format!("/api/hotels?page={}", n), payload.clone(), DEFAULT_TTL);
        });
    });
}

/// Benchmark: hit con payloads de distintos tamanos
fn bench_payload_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_get_hit_by_size");

    for num_hotels in [1usize, 10, 100, 1000] {
        let cache = ResponseCache::new();
        let payload = create_test_payload(num_hotels);
        group.throughput(Throughput::Bytes(payload.len() as u64));
        cache.insert("/api/hotels", payload, DEFAULT_TTL);

        group.bench_with_input(
            BenchmarkId::from_parameter(num_hotels),
            &num_hotels,
            |b, _| {
                b.iter(|| std::hint::black_box(cache.get("/api/hotels")));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_store_get_hit,
    bench_store_get_miss,
    bench_store_insert,
    bench_payload_sizes
);
criterion_main!(benches);
