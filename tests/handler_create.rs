mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use std::net::Ipv4Addr;

fn server(resolver: common::StaticResolver) -> TestServer {
    let app = common::create_test_app(resolver);
    TestServer::new(common::router(app.state)).unwrap()
}

#[tokio::test]
async fn test_create_returns_plain_short_url() {
    let server = server(common::StaticResolver::new());

    let response = server
        .get("/api/create")
        .add_query_param("url", "https://example.com/page")
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), format!("{}/-", common::BASE_URL));
    assert!(
        response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
}

#[tokio::test]
async fn test_create_with_code_param() {
    let server = server(common::StaticResolver::new());

    let response = server
        .get("/api/create")
        .add_query_param("url", "https://example.com/page")
        .add_query_param("code", "page")
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), format!("{}/page", common::BASE_URL));
}

#[tokio::test]
async fn test_create_same_url_twice() {
    let server = server(common::StaticResolver::new());

    let first = server
        .get("/api/create")
        .add_query_param("url", "https://example.com/")
        .await
        .text();
    let second = server
        .get("/api/create")
        .add_query_param("url", "https://example.com")
        .await
        .text();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_create_without_url() {
    let server = server(common::StaticResolver::new());

    let response = server.get("/api/create").await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.text(), "No url given!");
}

#[tokio::test]
async fn test_create_invalid_url() {
    let server = server(common::StaticResolver::new());

    let response = server
        .get("/api/create")
        .add_query_param("url", "notaurl")
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(response.text().starts_with("Invalid URL"));
}

#[tokio::test]
async fn test_create_rejects_uribl_listed_parent() {
    let resolver = common::StaticResolver::new()
        .answer("evil.example.multi.uribl.com", Ipv4Addr::new(127, 0, 0, 2));
    let server = server(resolver);

    let response = server
        .get("/api/create")
        .add_query_param("url", "http://a.b.evil.example/")
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(response.text().contains("listed as spam"));
}

#[tokio::test]
async fn test_create_ignores_uribl_other_codes() {
    let resolver = common::StaticResolver::new()
        .answer("fine.example.multi.uribl.com", Ipv4Addr::new(127, 0, 0, 1));
    let server = server(resolver);

    server
        .get("/api/create")
        .add_query_param("url", "http://fine.example/")
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_create_rejects_tor_exit() {
    let resolver = common::StaticResolver::new()
        .answer("1.0.0.127.tor.dnsbl.sectoor.de", Ipv4Addr::new(127, 0, 0, 1));
    let server = server(resolver);

    let response = server
        .get("/api/create")
        .add_query_param("url", "https://example.com/")
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(response.text().contains("Tor"));
}
