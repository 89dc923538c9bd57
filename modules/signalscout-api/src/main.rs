use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use signalscout_common::{Config, FetchCache};
use signalscout_engine::{live_providers, CachedProviders};

mod rest;

pub struct AppState {
    pub providers: CachedProviders,
    pub page_size: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("signalscout=info".parse()?))
        .init();

    let config = Config::from_env();
    let cache = Arc::new(FetchCache::new(config.cache_ttl));
    let providers = CachedProviders::new(live_providers(&config), cache);

    let state = Arc::new(AppState {
        providers,
        page_size: config.page_size,
    });

    let app = Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // Signal pipeline API
        .route("/signal-search", get(rest::signal_search))
        .route("/entity-lookup", get(rest::entity_lookup))
        .route("/company-score", get(rest::company_score))
        .route("/discover", get(rest::discover))
        // Responses are computed fresh per request; data freshness is
        // governed by the fetch cache TTL, not by HTTP caching.
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state);

    let addr = format!("{}:{}", config.api_host, config.api_port);
    info!(addr = %addr, "SignalScout API listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
