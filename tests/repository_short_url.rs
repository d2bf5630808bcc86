//! PostgreSQL repository tests. Require `DATABASE_URL`; run with
//! `cargo test -- --ignored`.

use sqlx::PgPool;
use std::sync::Arc;
use shortgate::domain::entities::NewShortUrl;
use shortgate::domain::repositories::{SequenceRepository, ShortUrlRepository};
use shortgate::error::AppError;
use shortgate::infrastructure::persistence::{PgSequenceRepository, PgShortUrlRepository};

fn new_record(code: &str, url: &str) -> NewShortUrl {
    NewShortUrl::new(code.to_string(), url.to_string(), "127.0.0.1".to_string())
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_and_find(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    let created = repo
        .insert(new_record("abc", "https://example.com/"))
        .await
        .unwrap();

    assert_eq!(created.code, "abc");
    assert_eq!(created.creator_ip, "127.0.0.1");

    let by_code = repo.find_by_code("abc").await.unwrap().unwrap();
    assert_eq!(by_code.id, created.id);

    let by_hash = repo.find_by_hash(&created.url_hash).await.unwrap().unwrap();
    assert_eq!(by_hash.id, created.id);

    assert!(repo.exists_code("abc").await.unwrap());
    assert!(!repo.exists_code("abd").await.unwrap());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_same_hash_returns_existing(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    let first = repo
        .insert(new_record("one", "https://example.com/"))
        .await
        .unwrap();
    let second = repo
        .insert(new_record("two", "https://example.com/"))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.code, "one");
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_code_clash_is_conflict(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    repo.insert(new_record("same", "https://a.example/"))
        .await
        .unwrap();
    let err = repo
        .insert(new_record("same", "https://b.example/"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_missing(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    assert!(repo.find_by_code("nope").await.unwrap().is_none());
    assert!(repo.find_by_hash("0".repeat(64).as_str()).await.unwrap().is_none());
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_sequence_is_strictly_increasing(pool: PgPool) {
    let counter = PgSequenceRepository::new(Arc::new(pool));

    let first = counter.next_id().await.unwrap();
    let second = counter.next_id().await.unwrap();

    assert!(first >= 1);
    assert!(second > first);
}
