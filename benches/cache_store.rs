use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tempfile::TempDir;
use tokio::runtime::Runtime;
use traktkit::cache::{CacheConfig, CacheEntry, CacheKey, CacheLimits, CacheStore};

/// A chart page of `items` small records
fn chart_page(items: usize) -> Vec<serde_json::Value> {
    (0..items)
        .map(|i| {
            serde_json::json!({
                "watchers": i,
                "movie": {
                    "title": format!("Movie {}", i),
                    "year": 2010,
                    "ids": {"trakt": i, "slug": format!("movie-{}", i)}
                }
            })
        })
        .collect()
}

fn entry(items: usize) -> CacheEntry<Vec<serde_json::Value>> {
    CacheEntry::new(chart_page(items), Some(3600), Some("\"bench\"".to_string()), None)
}

fn key(page: u32) -> CacheKey {
    CacheKey::new("trending").with(page).with(10).with("min")
}

/// Memory-tier hits
fn bench_memory_get(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let store = CacheStore::new(CacheConfig::memory_only());
    rt.block_on(async {
        store.put(&key(1), &entry(10), CacheLimits::CHART).await.unwrap();
    });

    c.bench_function("memory_get_hit", |b| {
        b.iter(|| {
            rt.block_on(async {
                let hit = store
                    .get::<Vec<serde_json::Value>>(black_box(&key(1)), CacheLimits::CHART)
                    .await;
                black_box(hit)
            })
        });
    });
}

/// Write-through to memory and disk, by page size
fn bench_disk_put(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let dir = TempDir::new().unwrap();
    let store = CacheStore::new(CacheConfig::with_root_dir(dir.path()));

    let mut group = c.benchmark_group("disk_put");
    for items in [10usize, 100] {
        let value = entry(items);
        group.bench_with_input(BenchmarkId::from_parameter(items), &value, |b, value| {
            let mut page = 0u32;
            b.iter(|| {
                page = (page + 1) % 40;
                let key = key(page);
                rt.block_on(async {
                    store.put(&key, black_box(value), CacheLimits::CHART).await.unwrap();
                });
            });
        });
    }
    group.finish();
}

/// Cold lookups answered by the disk tier
fn bench_disk_get(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let dir = TempDir::new().unwrap();
    let config = CacheConfig::with_root_dir(dir.path());
    rt.block_on(async {
        let writer = CacheStore::new(config.clone());
        for page in 0..20 {
            writer.put(&key(page), &entry(10), CacheLimits::CHART).await.unwrap();
        }
    });

    c.bench_function("disk_get_hit", |b| {
        b.iter(|| {
            // a fresh store has an empty memory tier
            let store = CacheStore::new(config.clone());
            rt.block_on(async {
                let hit = store
                    .get::<Vec<serde_json::Value>>(black_box(&key(7)), CacheLimits::CHART)
                    .await;
                black_box(hit)
            })
        });
    });
}

criterion_group!(benches, bench_memory_get, bench_disk_put, bench_disk_get);
criterion_main!(benches);
