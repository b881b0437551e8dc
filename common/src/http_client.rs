use crate::errors::AppError;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Error body returned by the upstream weather API, e.g.
/// `{"cod": 401, "message": "Invalid API key."}`. `cod` is a number on some
/// endpoints and a string on others.
#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    message: Option<String>,
}

/// HTTP client with a transport timeout. Failures are returned to the
/// caller as-is; there is no retry.
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> Result<Self, AppError> {
        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// GET `url` with the given query pairs and decode the JSON body.
    ///
    /// Query values are not recorded in the span since they carry the API key.
    #[instrument(skip(self, query), fields(url = %url))]
    pub async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T, AppError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = tokio::time::timeout(self.timeout, self.client.get(url).query(query).send())
            .await
            .map_err(|_| AppError::timeout(format!("Request to {} timed out", url)))?
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::timeout(format!("Request to {} timed out", url))
                } else {
                    AppError::NetworkError(e)
                }
            })?;

        let status = response.status();
        let text = response.text().await.map_err(AppError::NetworkError)?;

        if !status.is_success() {
            let message = serde_json::from_str::<UpstreamErrorBody>(&text)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| status.to_string());
            warn!(url = %url, status = status.as_u16(), message = %message, "Upstream returned an error");
            return Err(AppError::http(status.as_u16(), message));
        }

        let json: T = serde_json::from_str(&text).map_err(AppError::ParseError)?;
        info!(url = %url, "Request successful");

        Ok(json)
    }
}
