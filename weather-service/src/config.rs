use std::env;
use std::path::{Path, PathBuf};

use crate::api_client::{MAX_FORECAST_COUNT, QueryOptions};

pub struct Config {
    pub listen_address: String,
    pub owm_url: String,
    pub query: QueryOptions,
    pub cache_dir: PathBuf,
    pub http_timeout_seconds: u64,
}

impl Config {
    /// `OWM_KEY` and `OWM_ZIP` are not captured here; they are read on
    /// every request so the service can run unconfigured.
    pub fn from_env() -> Self {
        Self {
            listen_address: listen_address(env::var("ADDRESS").ok(), env::var("PORT").ok()),
            owm_url: env::var("OWM_URL")
                .unwrap_or_else(|_| "https://api.openweathermap.org/data/2.5".to_string()),
            query: QueryOptions {
                units: env::var("OWM_UNITS").unwrap_or_else(|_| "imperial".to_string()),
                lang: env::var("OWM_LANG").unwrap_or_else(|_| "en".to_string()),
                country: env::var("OWM_COUNTRY").unwrap_or_else(|_| "US".to_string()),
                forecast_count: env::var("OWM_FORECAST_COUNT")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(MAX_FORECAST_COUNT),
            },
            cache_dir: env::var("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("temp")),
            http_timeout_seconds: env::var("HTTP_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        }
    }
}

/// Load `.env` from the working directory or one of its parents.
///
/// Runs before tracing is initialised so that `LOG_FORMAT` and `RUST_LOG`
/// can come from the file; the caller logs the outcome afterwards.
pub fn load_dotenv() -> Result<PathBuf, dotenvy::Error> {
    dotenvy::dotenv()
}

/// Load a specific env file. Variables already set in the process win.
pub fn load_env_file(path: &Path) -> Result<(), dotenvy::Error> {
    dotenvy::from_path(path)
}

/// `ADDRESS` wins, then `localhost:$PORT`, then `localhost:8080`.
fn listen_address(address: Option<String>, port: Option<String>) -> String {
    if let Some(address) = address.filter(|a| !a.is_empty()) {
        return address;
    }
    match port.filter(|p| !p.is_empty()) {
        Some(port) => format!("localhost:{}", port),
        None => "localhost:8080".to_string(),
    }
}
