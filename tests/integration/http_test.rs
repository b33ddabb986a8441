// End to end over reqwest against a local mock of the Trakt API

use httpmock::prelude::*;
use tokio_test::{assert_err, assert_ok};
use traktkit::endpoints::InfoLevel;
use traktkit::{ClientConfig, Trakt, TraktError};

use super::test_harness::{trending_json, TRON_JSON};

fn trakt_for(server: &MockServer) -> Trakt {
    let config = ClientConfig::new("test-client").with_base_url(server.base_url());
    Trakt::new(config).unwrap()
}

#[tokio::test]
async fn test_trending_is_fetched_once_while_fresh() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/movies/trending")
                .query_param("page", "1")
                .query_param("limit", "10")
                .header("trakt-api-key", "test-client")
                .header("trakt-api-version", "2");
            then.status(200)
                .header("Cache-Control", "max-age=60, no-cache, no-store, must-revalidate")
                .header("X-Pagination-Item-Count", "1")
                .header("X-Pagination-Limit", "10")
                .header("X-Pagination-Page", "1")
                .header("X-Pagination-Page-Count", "1")
                .body(trending_json());
        })
        .await;
    let trakt = trakt_for(&server);

    let first = assert_ok!(trakt.movies().trending(1, 10, None).await);
    let second = assert_ok!(trakt.movies().trending(1, 10, None).await);

    mock.assert_calls_async(1).await;
    assert_eq!(first, second);
    assert_eq!(first.value[0].movie.title, "TRON: Legacy");
    assert_eq!(first.pagination.map(|p| p.total_pages), Some(1));
}

#[tokio::test]
async fn test_expired_entry_is_revalidated_with_etag() {
    let server = MockServer::start_async().await;
    let fresh = server
        .mock_async(|when, then| {
            when.method(GET).path("/movies/1");
            then.status(200)
                .header("ETag", "\"tron-v1\"")
                .header("Cache-Control", "max-age=0")
                .body(TRON_JSON);
        })
        .await;
    let trakt = trakt_for(&server);

    let first = assert_ok!(trakt.movies().details(1, InfoLevel::Min).await);
    fresh.assert_calls_async(1).await;
    fresh.delete_async().await;

    let not_modified = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/movies/1")
                .header("If-None-Match", "\"tron-v1\"");
            then.status(304);
        })
        .await;

    let second = assert_ok!(trakt.movies().details(1, InfoLevel::Min).await);
    not_modified.assert_calls_async(1).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_server_errors_reach_the_caller() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/movies/boxoffice");
            then.status(503);
        })
        .await;
    let trakt = trakt_for(&server);

    let err = assert_err!(trakt.movies().box_office(None).await);
    assert_eq!(err, TraktError::Http { status: 503 });
}

#[tokio::test]
async fn test_bearer_token_is_sent_for_sync_calls() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/sync/last_activities")
                .header("Authorization", "Bearer access-token");
            then.status(200).body(
                r#"{"all":"2014-11-20T07:01:32.000Z",
                "movies":{"watched_at":"2014-11-19T21:42:41.000Z","collected_at":"2014-11-20T06:51:30.000Z","rated_at":"2014-11-19T18:32:29.000Z","watchlisted_at":"2014-11-19T21:42:41.000Z","commented_at":"2014-11-20T06:51:30.000Z","paused_at":"2014-11-20T06:51:30.000Z","hidden_at":"2016-08-20T06:51:30.000Z"},
                "episodes":{"watched_at":"2014-11-20T06:51:30.000Z","collected_at":"2014-11-19T22:02:41.000Z","rated_at":"2014-11-20T06:51:30.000Z","watchlisted_at":"2014-11-20T06:51:30.000Z","commented_at":"2014-11-20T06:51:30.000Z","paused_at":"2014-11-20T06:51:30.000Z"},
                "shows":{"rated_at":"2014-11-19T19:50:58.000Z","watchlisted_at":"2014-11-20T06:51:30.000Z","commented_at":"2014-11-20T06:51:30.000Z","hidden_at":"2016-08-20T06:51:30.000Z"},
                "seasons":{"rated_at":"2014-11-19T19:54:24.000Z","watchlisted_at":"2014-11-20T06:51:30.000Z","commented_at":"2014-11-20T06:51:30.000Z","hidden_at":"2016-08-20T06:51:30.000Z"},
                "comments":{"liked_at":"2014-11-20T03:38:09.000Z"},
                "lists":{"liked_at":"2014-11-20T00:36:48.000Z","updated_at":"2014-11-20T06:52:18.000Z","commented_at":"2014-11-20T06:51:30.000Z"}}"#,
            );
        })
        .await;
    let trakt = trakt_for(&server);
    trakt.authenticate("access-token");

    let activities = assert_ok!(trakt.sync().last_activities().await);
    mock.assert_async().await;
    assert_eq!(
        traktkit::codec::date::format(&activities.all),
        "2014-11-20T07:01:32.000Z"
    );
}
