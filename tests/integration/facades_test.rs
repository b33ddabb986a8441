// Typed facades: request shape, login gating and response mapping

use http::Method;
use tokio_test::{assert_err, assert_ok};
use traktkit::endpoints::sync::{CollectablePayload, HistoryQuery, RateableContent};
use traktkit::endpoints::{Checkin, CollectableType, ContentType, InfoLevel, WatchedType};
use traktkit::{ClientConfig, Trakt, TraktError};

use super::test_harness::*;

fn logged_in(transport: std::sync::Arc<ScriptedTransport>) -> Trakt {
    let trakt = client(transport);
    trakt.authenticate("access-token");
    trakt
}

fn body(request: &RecordedRequest) -> String {
    let bytes = request.descriptor.body.clone().expect("request has a body");
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_every_request_carries_api_headers() {
    let transport = ScriptedTransport::new(vec![ok(TRON_JSON)]);
    let trakt = client(transport.clone());

    assert_ok!(trakt.movies().details(1, InfoLevel::Min).await);

    let request = transport.last_request();
    assert_eq!(request.header("trakt-api-key").as_deref(), Some("test-client"));
    assert_eq!(request.header("trakt-api-version").as_deref(), Some("2"));
    assert_eq!(request.header("content-type").as_deref(), Some("application/json"));
    assert_eq!(request.header("authorization"), None);
}

#[tokio::test]
async fn test_rating_payload_bytes_are_stable() {
    let response = r#"{"added":{"movies":1}}"#;
    let transport = ScriptedTransport::new(vec![ok(response), ok(response)]);
    let trakt = logged_in(transport.clone());

    for _ in 0..2 {
        let added = assert_ok!(
            trakt
                .sync()
                .add_rating(1, RateableContent::Movie, 0, None)
                .await
        );
        assert_eq!(added.added.movies, 1);
    }

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(body(&requests[0]), body(&requests[1]));
    assert_eq!(
        body(&requests[0]),
        r#"{"movies":[{"rating":1,"ids":{"trakt":0}}],"shows":[],"episodes":[],"seasons":[]}"#
    );
    assert_eq!(requests[0].descriptor.method, Method::POST);
    assert_eq!(
        requests[0].header("authorization").as_deref(),
        Some("Bearer access-token")
    );
}

#[tokio::test]
#[should_panic(expected = "between 1 and 10")]
async fn test_rating_outside_range_panics() {
    let trakt = logged_in(ScriptedTransport::new(vec![]));
    let _ = trakt
        .sync()
        .add_rating(11, RateableContent::Movie, 1, None)
        .await;
}

#[tokio::test]
#[should_panic(expected = "requires a logged in user")]
async fn test_sync_without_login_panics() {
    let trakt = client(ScriptedTransport::new(vec![]));
    let _ = trakt.sync().last_activities().await;
}

#[tokio::test]
async fn test_remove_playback_accepts_no_content() {
    let transport = ScriptedTransport::new(vec![no_content()]);
    let trakt = logged_in(transport.clone());

    assert_ok!(trakt.sync().remove_playback(13).await);

    let request = transport.last_request();
    assert_eq!(request.descriptor.method, Method::DELETE);
    assert!(request.descriptor.url.ends_with("/sync/playback/13"));
}

#[tokio::test]
async fn test_playback_progress_carries_pagination() {
    let response = r#"[{"progress":10.0,"paused_at":"2015-01-25T22:01:32.000Z","id":13,"type":"movie","movie":{"title":"Batman Begins","year":2005,"ids":{"trakt":1,"slug":"batman-begins-2005"}}}]"#;
    let transport = ScriptedTransport::new(vec![ok_paginated(
        response,
        60,
        traktkit::cache::PaginationData {
            item_count: 1,
            limit: 500,
            current_page: 1,
            total_pages: 1,
        },
    )]);
    let trakt = logged_in(transport.clone());

    let progress = assert_ok!(
        trakt
            .sync()
            .playback_progress(WatchedType::Movies, Some(5))
            .await
    );
    assert_eq!(progress.value.len(), 1);
    assert_eq!(progress.value[0].id, 13);
    assert_eq!(progress.pagination.map(|p| p.item_count), Some(1));
    assert!(transport
        .last_request()
        .descriptor
        .url
        .ends_with("/sync/playback/movies?limit=5"));
}

#[tokio::test]
async fn test_history_query_is_encoded_in_url() {
    let transport = ScriptedTransport::new(vec![ok("[]")]);
    let trakt = logged_in(transport.clone());

    let mut query = HistoryQuery::new(ContentType::Movies, 1);
    query.trakt_id = Some(12601);
    query.info = Some(InfoLevel::Min);
    query.start_at = Some(
        chrono::DateTime::parse_from_rfc3339("2019-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc),
    );

    let history = assert_ok!(trakt.sync().history(query).await);
    assert!(history.value.is_empty());
    assert_eq!(
        transport.last_request().descriptor.url,
        "https://api.trakt.tv/sync/history/movies/12601?page=1&limit=10&start_at=2019-01-01T00%3A00%3A00.000Z"
    );
}

#[tokio::test]
async fn test_watchlist_removal_posts_to_remove_path() {
    let transport = ScriptedTransport::new(vec![ok(r#"{"deleted":{"movies":1}}"#)]);
    let trakt = logged_in(transport.clone());

    let removed = assert_ok!(
        trakt
            .sync()
            .remove_from_watchlist(CollectablePayload::new(&[1], &[], &[], &[]))
            .await
    );
    assert_eq!(removed.deleted.movies, 1);

    let request = transport.last_request();
    assert_eq!(request.descriptor.method, Method::POST);
    assert!(request.descriptor.url.ends_with("/sync/watchlist/remove"));
}

#[tokio::test]
async fn test_sync_mutations_are_never_cached() {
    let response = r#"{"added":{"movies":2},"not_found":{"movies":[{"ids":{"trakt":9}}]}}"#;
    let transport = ScriptedTransport::new(vec![ok_with(response, Some(600), None)]);
    transport.push(ok_with(response, Some(600), None));
    let trakt = logged_in(transport.clone());

    for _ in 0..2 {
        let added = assert_ok!(trakt.sync().add_to_history(&[1, 2, 9], &[], &[]).await);
        assert_eq!(added.added.movies, 2);
        assert_eq!(added.not_found.movies[0].ids.trakt, 9);
    }
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_collection_reads_are_cached() {
    let transport = ScriptedTransport::new(vec![ok_with("[]", Some(600), None)]);
    let trakt = logged_in(transport.clone());

    for _ in 0..2 {
        let items = assert_ok!(
            trakt
                .sync()
                .collection(CollectableType::Movies, InfoLevel::Min)
                .await
        );
        assert!(items.is_empty());
    }
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_user_watching_nothing_is_none() {
    let transport = ScriptedTransport::new(vec![no_content()]);
    let trakt = logged_in(transport);

    let watching = assert_ok!(trakt.users().watching("sean", None).await);
    assert_eq!(watching, None);
}

#[tokio::test]
async fn test_user_watching_a_movie() {
    let response = format!(
        r#"{{"expires_at":"2014-10-23T08:36:02.000Z","started_at":"2014-10-23T06:44:02.000Z","action":"checkin","type":"movie","movie":{}}}"#,
        TRON_JSON
    );
    let transport = ScriptedTransport::new(vec![ok(&response)]);
    let trakt = logged_in(transport);

    let watching = assert_ok!(trakt.users().watching("sean", None).await).unwrap();
    assert_eq!(watching.action, "checkin");
    assert_eq!(watching.movie.map(|m| m.title).as_deref(), Some("TRON: Legacy"));
}

#[tokio::test]
async fn test_checkin_posts_movie_ids() {
    let response = format!(
        r#"{{"id":3373536619,"watched_at":"2014-08-06T06:54:36.859Z","sharing":{{"facebook":false,"twitter":false,"tumblr":false}},"movie":{}}}"#,
        TRON_JSON
    );
    let transport = ScriptedTransport::new(vec![ok(&response)]);
    let trakt = logged_in(transport.clone());

    let checkin = assert_ok!(trakt.checkin(Checkin::Movie(1)).await);
    assert_eq!(checkin.id, 3373536619);

    let request = transport.last_request();
    assert!(request.descriptor.url.ends_with("/checkin"));
    assert_eq!(body(&request), r#"{"movie":{"ids":{"trakt":1}}}"#);
}

#[tokio::test]
async fn test_token_exchange_sends_code_and_secret() {
    let response = r#"{"access_token":"dbaf9757982a9e738f05d249b7b5b4a266b3a139049317c4909f2f263572c781","token_type":"bearer","expires_in":7200,"refresh_token":"76ba4c5c75c96f6087f58a4de10be6c00b29ea1ddc3b2022ee2016d1363e3a7c","scope":"public","created_at":1487889741}"#;
    let transport = ScriptedTransport::new(vec![ok(response)]);
    let config = ClientConfig::new("test-client").with_client_secret("shh");
    let trakt = Trakt::with_transport(config, transport.clone());

    let token = assert_ok!(
        trakt
            .get_token(
                "myapp://auth?code=fd0847dbb559752d932dd3c1ac34ff98d27b11fe2fea5a864f44740cd7919ad0",
                "myapp://auth"
            )
            .await
    );
    assert_eq!(token.expires_in, 7200);
    assert!(!trakt.is_logged_in());

    let request = transport.last_request();
    assert!(request.descriptor.url.ends_with("/oauth/token"));
    let sent: serde_json::Value = serde_json::from_str(&body(&request)).unwrap();
    assert_eq!(sent["code"], "fd0847dbb559752d932dd3c1ac34ff98d27b11fe2fea5a864f44740cd7919ad0");
    assert_eq!(sent["client_secret"], "shh");
    assert_eq!(sent["grant_type"], "authorization_code");
}

#[tokio::test]
async fn test_token_exchange_errors_surface() {
    let transport = ScriptedTransport::new(vec![status(401)]);
    let config = ClientConfig::new("test-client").with_client_secret("shh");
    let trakt = Trakt::with_transport(config, transport);

    let err = assert_err!(trakt.get_token("myapp://auth?code=abc", "myapp://auth").await);
    assert_eq!(err, TraktError::Http { status: 401 });
}
