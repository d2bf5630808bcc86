#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::extract::ConnectInfo;
use shortgate::application::services::{
    BlacklistGate, SequenceAllocator, ShortUrlService, UrlValidator,
};
use shortgate::domain::entities::HostLists;
use shortgate::domain::repositories::{SequenceRepository, ShortUrlRepository};
use shortgate::domain::resolver::DnsResolver;
use shortgate::infrastructure::cache::NullCache;
use shortgate::infrastructure::persistence::{
    InMemorySequenceRepository, InMemoryShortUrlRepository,
};
use shortgate::routes::app_router;
use shortgate::state::AppState;
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;

pub const BASE_URL: &str = "http://s.test";
pub const CLIENT_IP: &str = "127.0.0.1";

/// Resolver answering from a fixed table; everything else is NXDOMAIN.
#[derive(Default)]
pub struct StaticResolver {
    answers: HashMap<String, Ipv4Addr>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, name: &str, addr: Ipv4Addr) -> Self {
        self.answers.insert(name.to_string(), addr);
        self
    }
}

#[async_trait]
impl DnsResolver for StaticResolver {
    async fn resolve(&self, name: &str) -> Option<Ipv4Addr> {
        self.answers.get(name).copied()
    }
}

/// Handles to the in-memory collaborators behind a test state.
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<InMemoryShortUrlRepository>,
}

pub fn create_test_app(resolver: StaticResolver) -> TestApp {
    create_test_app_with(resolver, HostLists::new(Vec::<String>::new(), ["bit.ly", "s.test"]), false)
}

pub fn create_test_app_with(
    resolver: StaticResolver,
    lists: HostLists,
    recheck_on_redirect: bool,
) -> TestApp {
    let store = Arc::new(InMemoryShortUrlRepository::new());
    let counter: Arc<dyn SequenceRepository> = Arc::new(InMemorySequenceRepository::new());
    let store_dyn: Arc<dyn ShortUrlRepository> = store.clone();

    let gate = Arc::new(BlacklistGate::with_default_providers(
        Arc::new(resolver),
        Duration::from_millis(200),
    ));
    let validator = Arc::new(UrlValidator::new(gate.clone(), Arc::new(lists)));
    let allocator = Arc::new(SequenceAllocator::new(counter, store_dyn.clone(), 16));
    let service = Arc::new(ShortUrlService::new(store_dyn, allocator, validator, gate));

    let state = AppState::new(service, Arc::new(NullCache::new()), BASE_URL)
        .with_recheck_on_redirect(recheck_on_redirect);

    TestApp { state, store }
}

/// Full application router with a fixed peer address.
pub fn router(state: AppState) -> Router {
    app_router(state).layer(MockConnectInfoLayer)
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = format!("{CLIENT_IP}:12345").parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
