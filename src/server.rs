//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache and resolver setup, service wiring, and
//! the Axum server lifecycle.

use crate::application::services::{
    BlacklistGate, SequenceAllocator, ShortUrlService, UrlValidator,
};
use crate::config::Config;
use crate::domain::entities::HostLists;
use crate::domain::repositories::{SequenceRepository, ShortUrlRepository};
use crate::domain::resolver::DnsResolver;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::dns::HickoryResolver;
use crate::infrastructure::persistence::{PgSequenceRepository, PgShortUrlRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis cache (or NullCache fallback)
/// - System DNS resolver and host lists
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - A configured host list file cannot be read
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache = connect_cache(&config).await;

    let resolver: Arc<dyn DnsResolver> = Arc::new(HickoryResolver::from_system_conf()?);

    let lists = load_host_lists(&config)?;
    tracing::info!(
        blacklist = lists.blacklist_len(),
        shorteners = lists.shorteners_len(),
        "Host lists loaded"
    );

    let pool = Arc::new(pool);
    let state = build_state(
        &config,
        Arc::new(PgShortUrlRepository::new(pool.clone())),
        Arc::new(PgSequenceRepository::new(pool)),
        resolver,
        cache,
        lists,
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wires repositories, resolver, cache and lists into the handler state.
pub fn build_state(
    config: &Config,
    short_url_repository: Arc<dyn ShortUrlRepository>,
    sequence_repository: Arc<dyn SequenceRepository>,
    resolver: Arc<dyn DnsResolver>,
    cache: Arc<dyn CacheService>,
    lists: HostLists,
) -> AppState {
    let gate = Arc::new(BlacklistGate::with_default_providers(
        resolver,
        config.dnsbl_timeout(),
    ));
    let validator = Arc::new(UrlValidator::new(gate.clone(), Arc::new(lists)));
    let allocator = Arc::new(SequenceAllocator::new(
        sequence_repository,
        short_url_repository.clone(),
        config.max_code_attempts,
    ));

    let service = ShortUrlService::new(short_url_repository, allocator, validator, gate)
        .with_creator_ip_check(config.check_creator_ip);

    AppState::new(Arc::new(service), cache, &config.base_url)
        .with_recheck_on_redirect(config.recheck_on_redirect)
}

/// Opens the PostgreSQL pool using the `DB_*` pool settings.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = config.redis_url.as_deref() else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Loads the configured host lists and registers the service's own host as a
/// shortener.
///
/// # Errors
///
/// Returns an error if a configured list file cannot be read.
pub fn load_host_lists(config: &Config) -> Result<HostLists> {
    let lists = HostLists::load(
        config.blacklist_file.as_deref(),
        config.shorteners_file.as_deref(),
    )
    .context("Failed to read host list file")?;

    Ok(match config.own_host() {
        Some(host) => lists.with_shortener(&host),
        None => lists,
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
