//! Benchmarks for the catalog pipeline
//!
//! Measures the cache-hit and database paths of `fetch_product` directly and
//! through the HTTP layer, with chaos disabled so only pipeline overhead counts.

#![allow(clippy::expect_used)]

use std::{sync::Arc, time::Duration};

use application::CatalogService;
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use domain::ProductId;
use infrastructure::{AppConfig, build_catalog_service};
use presentation_http::{AppState, create_router};
use tokio::runtime::Runtime;

fn catalog() -> CatalogService {
    build_catalog_service(&AppConfig::default()).expect("default config is valid")
}

/// Benchmark the catalog service directly (no HTTP layer)
fn bench_catalog_service(c: &mut Criterion) {
    let rt = Runtime::new().expect("Failed to create runtime");
    let id = ProductId::from_static("1");

    let mut group = c.benchmark_group("catalog_service");
    group.throughput(Throughput::Elements(1));
    group.measurement_time(Duration::from_secs(10));

    // Warm cache: every iteration is a hit
    let warm = catalog();
    rt.block_on(warm.fetch_product(&id))
        .expect("seeded product exists");
    group.bench_function("cache_hit", |b| {
        b.to_async(&rt).iter(|| async {
            warm.fetch_product(&id)
                .await
                .expect("Fetch should succeed")
        });
    });

    // Fresh service per iteration: every iteration goes downstream
    group.bench_function("database_read", |b| {
        b.to_async(&rt).iter_batched(
            catalog,
            |service| {
                let id = id.clone();
                async move {
                    service
                        .fetch_product(&id)
                        .await
                        .expect("Fetch should succeed")
                }
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

/// Benchmark the HTTP handler layer
fn bench_http_handler(c: &mut Criterion) {
    let rt = Runtime::new().expect("Failed to create runtime");
    let _guard = rt.enter();
    let config = Arc::new(AppConfig::default());
    let state = AppState::new(Arc::new(catalog()), config);
    let server =
        axum_test::TestServer::new(create_router(state)).expect("Failed to create server");

    let mut group = c.benchmark_group("http_handler");
    group.throughput(Throughput::Elements(1));
    group.measurement_time(Duration::from_secs(10));

    // Health endpoint (baseline for HTTP overhead)
    group.bench_function("health_endpoint", |b| {
        b.to_async(&rt).iter(|| async { server.get("/health").await });
    });

    group.bench_function("product_endpoint_cached", |b| {
        b.to_async(&rt).iter(|| async { server.get("/products/2").await });
    });

    group.finish();
}

criterion_group!(benches, bench_catalog_service, bench_http_handler);
criterion_main!(benches);
