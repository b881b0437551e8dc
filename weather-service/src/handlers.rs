use axum::{extract::State, response::Json};
use common::errors::AppError;
use common::models::{CurrentWeather, ForecastWeather};
use std::sync::Arc;
use tracing::info;

use crate::api_client::OpenWeatherMapClient;
use crate::provider::DataProvider;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<DataProvider<OpenWeatherMapClient>>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check")
    )
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "weather-service" }))
}

#[utoipa::path(
    get,
    path = "/api/current",
    responses(
        (status = 200, description = "Current conditions, possibly cached", body = CurrentWeather),
        (status = 500, description = "Upstream fetch failed")
    ),
    tag = "weather"
)]
pub async fn current(State(state): State<AppState>) -> Result<Json<CurrentWeather>, AppError> {
    info!("Current conditions request received");

    let current = state.provider.get_current().await?;

    Ok(Json(current))
}

#[utoipa::path(
    get,
    path = "/api/forecast",
    responses(
        (status = 200, description = "Five day forecast, possibly cached", body = ForecastWeather),
        (status = 500, description = "Upstream fetch failed")
    ),
    tag = "weather"
)]
pub async fn forecast(State(state): State<AppState>) -> Result<Json<ForecastWeather>, AppError> {
    info!("Forecast request received");

    let forecast = state.provider.get_forecast().await?;

    Ok(Json(forecast))
}
