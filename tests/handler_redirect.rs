mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use shortgate::domain::entities::{HostLists, NewShortUrl};
use shortgate::domain::repositories::ShortUrlRepository;
use std::net::Ipv4Addr;

async fn seed(app: &common::TestApp, code: &str, url: &str) {
    app.store
        .insert(NewShortUrl::new(
            code.to_string(),
            url.to_string(),
            common::CLIENT_IP.to_string(),
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_redirect_success() {
    let app = common::create_test_app(common::StaticResolver::new());
    seed(&app, "abc", "https://example.com/").await;
    let server = TestServer::new(common::router(app.state.clone())).unwrap();

    let response = server.get("/abc").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.header("location"), "https://example.com/");
}

#[tokio::test]
async fn test_redirect_appends_path_and_query() {
    let app = common::create_test_app(common::StaticResolver::new());
    seed(&app, "abc", "https://example.com/base").await;
    let server = TestServer::new(common::router(app.state.clone())).unwrap();

    let response = server.get("/abc/docs/intro?lang=en").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.header("location"),
        "https://example.com/base/docs/intro?lang=en"
    );
}

#[tokio::test]
async fn test_redirect_round_trip_through_api() {
    let app = common::create_test_app(common::StaticResolver::new());
    let server = TestServer::new(common::router(app.state.clone())).unwrap();

    let short_url = server
        .get("/api/create")
        .add_query_param("url", "https://example.com/a?b=c")
        .await
        .text();
    let path = short_url.trim_start_matches(common::BASE_URL);

    let response = server.get(path).await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.header("location"), "https://example.com/a?b=c");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let app = common::create_test_app(common::StaticResolver::new());
    let server = TestServer::new(common::router(app.state)).unwrap();

    let response = server.get("/missing").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_root_not_found() {
    let app = common::create_test_app(common::StaticResolver::new());
    let server = TestServer::new(common::router(app.state)).unwrap();

    server.get("/").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_redirect_recheck_answers_gone() {
    let resolver = common::StaticResolver::new()
        .answer("later-spam.example.multi.uribl.com", Ipv4Addr::new(127, 0, 0, 2));
    let app = common::create_test_app_with(resolver, HostLists::default(), true);
    seed(&app, "old", "https://later-spam.example/").await;
    let server = TestServer::new(common::router(app.state.clone())).unwrap();

    server.get("/old").await.assert_status(StatusCode::GONE);
}

#[tokio::test]
async fn test_redirect_without_recheck_ignores_listing() {
    let resolver = common::StaticResolver::new()
        .answer("later-spam.example.multi.uribl.com", Ipv4Addr::new(127, 0, 0, 2));
    let app = common::create_test_app_with(resolver, HostLists::default(), false);
    seed(&app, "old", "https://later-spam.example/").await;
    let server = TestServer::new(common::router(app.state.clone())).unwrap();

    server
        .get("/old")
        .await
        .assert_status(StatusCode::MOVED_PERMANENTLY);
}

#[tokio::test]
async fn test_reverse_lookup() {
    let app = common::create_test_app(common::StaticResolver::new());
    seed(&app, "abc", "https://example.com/").await;
    let server = TestServer::new(common::router(app.state.clone())).unwrap();

    let response = server.get("/api/reverselookup/abc/more?x=1").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "https://example.com/more?x=1");
}

#[tokio::test]
async fn test_reverse_lookup_not_found() {
    let app = common::create_test_app(common::StaticResolver::new());
    let server = TestServer::new(common::router(app.state)).unwrap();

    let response = server.get("/api/reverselookup/nothing").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "Code not found");
}

#[tokio::test]
async fn test_reverse_lookup_keeps_encoded_path_like_redirect() {
    let app = common::create_test_app(common::StaticResolver::new());
    seed(&app, "abc", "https://example.com/").await;
    let server = TestServer::new(common::router(app.state.clone())).unwrap();

    let redirect = server.get("/abc/a%20b%2Fc").await;
    let lookup = server.get("/api/reverselookup/abc/a%20b%2Fc").await;

    lookup.assert_status_ok();
    assert_eq!(lookup.text(), "https://example.com/a%20b%2Fc");
    assert_eq!(redirect.header("location"), lookup.text().as_str());
}
