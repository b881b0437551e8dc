pub mod api_client;
pub mod cache;
pub mod config;
pub mod freshness;
pub mod handlers;
pub mod openapi;
pub mod provider;

use axum::{Router, routing::get};
use common::errors::AppError;
use common::http_client::HttpClient;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api_client::{EnvCredentials, OpenWeatherMapClient};
use crate::cache::CacheStore;
use crate::config::Config;
use crate::provider::DataProvider;

/// Wire the cache, upstream client and credential source into shared state.
pub fn build_state(config: &Config) -> Result<handlers::AppState, AppError> {
    let http_client = HttpClient::new(config.http_timeout_seconds)?;
    let client = OpenWeatherMapClient::new(
        http_client,
        config.owm_url.clone(),
        config.query.clone(),
    );
    let provider = DataProvider::new(
        CacheStore::new(&config.cache_dir),
        client,
        Arc::new(EnvCredentials),
    );

    Ok(handlers::AppState {
        provider: Arc::new(provider),
    })
}

pub fn create_router(state: handlers::AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/current", get(handlers::current))
        .route("/api/forecast", get(handlers::forecast))
        .merge(openapi::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
