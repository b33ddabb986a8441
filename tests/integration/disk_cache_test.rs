// Disk tier behaviour across client instances

use tempfile::TempDir;
use tokio_test::assert_ok;
use traktkit::cache::{CacheConfig, CacheLimits};
use traktkit::endpoints::InfoLevel;

use super::test_harness::*;

fn disk_config(dir: &TempDir) -> CacheConfig {
    CacheConfig::with_root_dir(dir.path())
}

#[tokio::test]
async fn test_entries_survive_a_new_client() {
    let dir = TempDir::new().unwrap();

    let first_transport = ScriptedTransport::new(vec![ok_with(TRON_JSON, Some(600), None)]);
    let first = client_with_cache(first_transport.clone(), disk_config(&dir));
    let movie = assert_ok!(first.movies().details(1, InfoLevel::Min).await);
    drop(first);

    let second_transport = ScriptedTransport::new(vec![]);
    let second = client_with_cache(second_transport.clone(), disk_config(&dir));
    let cached = assert_ok!(second.movies().details(1, InfoLevel::Min).await);

    assert_eq!(cached, movie);
    assert_eq!(second_transport.request_count(), 0);
    assert_eq!(second.cache_stats().disk_hits, 1);
}

#[tokio::test]
async fn test_disk_size_grows_and_clear_empties_it() {
    let dir = TempDir::new().unwrap();
    let transport = ScriptedTransport::new(vec![
        ok_with(TRON_JSON, Some(600), None),
        ok_with(&trending_json(), Some(600), None),
    ]);
    let trakt = client_with_cache(transport, disk_config(&dir));
    assert_eq!(trakt.disk_cache_size().await, 0);

    assert_ok!(trakt.movies().details(1, InfoLevel::Min).await);
    assert_ok!(trakt.movies().trending(1, 10, None).await);
    assert!(trakt.disk_cache_size().await > 0);

    assert_ok!(trakt.clear_caches().await);
    assert_eq!(trakt.disk_cache_size().await, 0);
}

#[tokio::test]
async fn test_clear_removes_namespaces_written_by_earlier_clients() {
    let dir = TempDir::new().unwrap();

    let transport = ScriptedTransport::new(vec![ok_with(TRON_JSON, Some(600), None)]);
    let writer = client_with_cache(transport, disk_config(&dir));
    assert_ok!(writer.movies().details(1, InfoLevel::Min).await);
    drop(writer);

    let transport = ScriptedTransport::new(vec![ok_with(TRON_JSON, Some(600), None)]);
    let cleaner = client_with_cache(transport.clone(), disk_config(&dir));
    assert!(cleaner.disk_cache_size().await > 0);
    assert_ok!(cleaner.clear_caches().await);
    assert_eq!(cleaner.disk_cache_size().await, 0);

    assert_ok!(cleaner.movies().details(1, InfoLevel::Min).await);
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_entry_over_namespace_ceiling_is_served_but_not_persisted() {
    let dir = TempDir::new().unwrap();
    let mut config = disk_config(&dir);
    config.memory_enabled = false;
    config.namespaces.insert(
        "details".to_string(),
        CacheLimits {
            disk_max_bytes: 16,
            memory_max_items: 1,
        },
    );
    let transport = ScriptedTransport::new(vec![
        ok_with(TRON_JSON, Some(600), None),
        ok_with(TRON_JSON, Some(600), None),
    ]);
    let trakt = client_with_cache(transport.clone(), config);

    let movie = assert_ok!(trakt.movies().details(1, InfoLevel::Min).await);
    assert_eq!(movie.title, "TRON: Legacy");
    assert_eq!(trakt.cache_stats().write_failures, 1);

    assert_ok!(trakt.movies().details(1, InfoLevel::Min).await);
    assert_eq!(transport.request_count(), 2);
}
