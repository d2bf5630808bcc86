use shortgate::application::services::SequenceAllocator;
use shortgate::domain::entities::NewShortUrl;
use shortgate::domain::repositories::ShortUrlRepository;
use shortgate::infrastructure::persistence::{
    InMemorySequenceRepository, InMemoryShortUrlRepository,
};
use shortgate::utils::alias::is_reserved;
use shortgate::utils::numeral::{decode, encode};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_allocations_are_distinct() {
    let store = Arc::new(InMemoryShortUrlRepository::new());
    let allocator = Arc::new(SequenceAllocator::new(
        Arc::new(InMemorySequenceRepository::new()),
        store,
        8,
    ));

    let mut tasks = JoinSet::new();
    for _ in 0..200 {
        let allocator = allocator.clone();
        tasks.spawn(async move { allocator.next_code().await.unwrap() });
    }

    let mut codes = HashSet::new();
    while let Some(code) = tasks.join_next().await {
        assert!(codes.insert(code.unwrap()));
    }

    assert_eq!(codes.len(), 200);
}

#[tokio::test]
async fn test_allocator_skips_alias_occupying_next_code() {
    let store = Arc::new(InMemoryShortUrlRepository::new());
    store
        .insert(NewShortUrl::new(
            encode(1),
            "https://alias.example/".to_string(),
            "127.0.0.1".to_string(),
        ))
        .await
        .unwrap();

    let allocator = SequenceAllocator::new(
        Arc::new(InMemorySequenceRepository::new()),
        store,
        8,
    );

    assert_eq!(allocator.next_code().await.unwrap(), encode(2));
}

#[tokio::test]
async fn test_allocator_never_issues_reserved_word() {
    let start = decode("api").unwrap() as i64;
    let allocator = SequenceAllocator::new(
        Arc::new(InMemorySequenceRepository::starting_at(start)),
        Arc::new(InMemoryShortUrlRepository::new()),
        8,
    );

    let code = allocator.next_code().await.unwrap();
    assert!(!is_reserved(&code));
    assert_eq!(decode(&code), Some(start as u64 + 1));
}
