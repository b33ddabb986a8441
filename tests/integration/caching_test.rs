// Fetch pipeline behaviour observed through the public client

use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use traktkit::cache::{CacheConfig, PaginationData};
use traktkit::endpoints::{InfoLevel, Movies};
use traktkit::transport::CancelHandle;
use traktkit::TraktError;

use super::test_harness::*;

#[tokio::test]
async fn test_fresh_entry_answers_second_fetch_without_network() {
    let transport = ScriptedTransport::new(vec![ok_with(TRON_JSON, Some(60), None)]);
    let trakt = client(transport.clone());

    let first = assert_ok!(trakt.movies().details(1, InfoLevel::Min).await);
    let second = assert_ok!(trakt.movies().details(1, InfoLevel::Min).await);

    assert_eq!(first, second);
    assert_eq!(transport.request_count(), 1);
    assert_eq!(trakt.cache_stats().memory_hits, 1);
}

#[tokio::test]
async fn test_stale_entry_revalidates_with_etag_and_reuses_value_on_304() {
    let transport = ScriptedTransport::new(vec![
        ok_with(TRON_JSON, Some(0), Some("\"abc\"")),
        status(304),
    ]);
    let trakt = client(transport.clone());

    let first = assert_ok!(trakt.movies().details(1, InfoLevel::Min).await);
    assert_eq!(transport.last_request().header("If-None-Match"), None);

    let second = assert_ok!(trakt.movies().details(1, InfoLevel::Min).await);

    assert_eq!(first, second);
    assert_eq!(transport.request_count(), 2);
    assert_eq!(
        transport.last_request().header("If-None-Match").as_deref(),
        Some("\"abc\"")
    );
}

#[tokio::test]
async fn test_not_modified_without_cached_entry_propagates() {
    let transport = ScriptedTransport::new(vec![status(304)]);
    let trakt = client(transport);

    let err = assert_err!(trakt.movies().details(1, InfoLevel::Min).await);
    assert_eq!(err, TraktError::Http { status: 304 });
}

#[tokio::test]
async fn test_no_content_is_never_decoded() {
    let transport = ScriptedTransport::new(vec![no_content()]);
    let trakt = client(transport);

    let err = assert_err!(trakt.movies().details(1, InfoLevel::Min).await);
    assert_eq!(err, TraktError::EmptyContent);
}

#[tokio::test]
async fn test_pages_are_cached_separately() {
    let page = |current_page| PaginationData {
        item_count: 20,
        limit: 10,
        current_page,
        total_pages: 2,
    };
    let transport = ScriptedTransport::new(vec![
        ok_paginated(&trending_json(), 60, page(1)),
        ok_paginated("[]", 60, page(2)),
    ]);
    let trakt = client(transport.clone());

    let first = assert_ok!(trakt.movies().trending(1, 10, None).await);
    let second = assert_ok!(trakt.movies().trending(2, 10, None).await);
    let first_again = assert_ok!(trakt.movies().trending(1, 10, None).await);

    assert_eq!(first.value.len(), 1);
    assert!(second.value.is_empty());
    assert_eq!(first.pagination, Some(page(1)));
    assert_eq!(second.pagination, Some(page(2)));
    assert_eq!(first_again, first);
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_trending_without_tagline_decodes_and_is_cached() {
    let transport = ScriptedTransport::new(vec![ok_with(&trending_json(), Some(600), None)]);
    let trakt = client(transport.clone());

    let trending = assert_ok!(
        trakt
            .movies()
            .trending(1, 10, Some(InfoLevel::Min))
            .await
    );
    assert_eq!(trending.value[0].watchers, 21);
    assert_eq!(trending.value[0].movie.tagline, None);

    let again = assert_ok!(
        trakt
            .movies()
            .trending(1, 10, Some(InfoLevel::Min))
            .await
    );
    assert_eq!(again.value, trending.value);
    assert_eq!(transport.request_count(), 1);
    assert!(transport.last_request().descriptor.url.ends_with("extended=min"));
}

#[tokio::test]
async fn test_different_info_levels_do_not_share_entries() {
    let transport = ScriptedTransport::new(vec![
        ok_with(&trending_json(), Some(600), None),
        ok_with(&trending_json(), Some(600), None),
    ]);
    let trakt = client(transport.clone());

    assert_ok!(trakt.movies().trending(1, 10, Some(InfoLevel::Min)).await);
    assert_ok!(trakt.movies().trending(1, 10, Some(InfoLevel::Full)).await);

    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_decoding_error_reports_kind_and_is_not_cached() {
    let transport = ScriptedTransport::new(vec![
        ok_with(r#"{"title":42}"#, Some(60), None),
        ok_with(TRON_JSON, Some(60), None),
    ]);
    let trakt = client(transport.clone());

    let err = assert_err!(trakt.movies().details(1, InfoLevel::Min).await);
    assert!(matches!(err, TraktError::Decoding(_)));

    let movie = assert_ok!(trakt.movies().details(1, InfoLevel::Min).await);
    assert_eq!(movie.title, "TRON: Legacy");
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_disabled_cache_always_hits_the_network() {
    let transport = ScriptedTransport::new(vec![
        ok_with(TRON_JSON, Some(60), None),
        ok_with(TRON_JSON, Some(60), None),
    ]);
    let trakt = client_with_cache(transport.clone(), CacheConfig::disabled());

    assert_ok!(trakt.movies().details(1, InfoLevel::Min).await);
    assert_ok!(trakt.movies().details(1, InfoLevel::Min).await);

    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_concurrent_identical_fetches_share_one_request() {
    let transport = ScriptedTransport::with_delay(
        vec![ok_with(TRON_JSON, Some(60), None)],
        Duration::from_millis(50),
    );
    let trakt = client(transport.clone());

    let movies = trakt.movies();
    let (a, b, c) = futures::join!(
        movies.details(1, InfoLevel::Min),
        movies.details(1, InfoLevel::Min),
        movies.details(1, InfoLevel::Min),
    );

    assert_eq!(assert_ok!(a).title, "TRON: Legacy");
    assert_eq!(assert_ok!(b).title, "TRON: Legacy");
    assert_eq!(assert_ok!(c).title, "TRON: Legacy");
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_cancelled_fetch_reports_cancelled_and_caches_nothing() {
    let transport = ScriptedTransport::with_delay(
        vec![ok_with(TRON_JSON, Some(60), None)],
        Duration::from_secs(5),
    );
    let trakt = client(transport.clone());
    let endpoint = Movies::Details {
        id: 1,
        info: InfoLevel::Min,
    };

    let handle = CancelHandle::new();
    let token = handle.token();
    let (result, _) = futures::join!(
        trakt.fetch_cancellable::<traktkit::models::Movie, _>(&endpoint, token),
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.cancel();
        }
    );

    assert_eq!(assert_err!(result), TraktError::Cancelled);
    assert_eq!(trakt.cache_stats().misses, 1);
}

#[tokio::test]
async fn test_clear_caches_forces_refetch() {
    let transport = ScriptedTransport::new(vec![
        ok_with(TRON_JSON, Some(60), None),
        ok_with(TRON_JSON, Some(60), None),
    ]);
    let trakt = client(transport.clone());

    assert_ok!(trakt.movies().details(1, InfoLevel::Min).await);
    assert_ok!(trakt.clear_caches().await);
    assert_ok!(trakt.movies().details(1, InfoLevel::Min).await);

    assert_eq!(transport.request_count(), 2);
}
