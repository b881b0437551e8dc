use common::errors::AppError;
use common::http_client::HttpClient;
use common::models::{CurrentWeather, ForecastWeather};
use std::env;
use std::future::Future;
use tracing::{info, instrument};

pub const API_KEY_VAR: &str = "OWM_KEY";
pub const LOCATION_KEY_VAR: &str = "OWM_ZIP";

/// Upstream API key and the postal code to query.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub location_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, location_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            location_key: location_key.into(),
        }
    }

    /// Both values present. Anything less means the service runs degraded.
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.location_key.is_empty()
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("location_key", &self.location_key)
            .finish()
    }
}

/// Where credentials come from. Consulted once per data request.
pub trait CredentialSource: Send + Sync {
    fn credentials(&self) -> Credentials;
}

impl CredentialSource for Credentials {
    fn credentials(&self) -> Credentials {
        self.clone()
    }
}

/// Reads `OWM_KEY` and `OWM_ZIP` from the process environment on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn credentials(&self) -> Credentials {
        Credentials {
            api_key: env::var(API_KEY_VAR).unwrap_or_default().trim().to_string(),
            location_key: env::var(LOCATION_KEY_VAR)
                .unwrap_or_default()
                .trim()
                .to_string(),
        }
    }
}

/// The upstream weather provider. One strongly-typed call per data kind.
///
/// Implementations do not retry; a failed call is reported as-is.
pub trait ProviderClient: Send + Sync {
    fn fetch_current(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<CurrentWeather, AppError>> + Send;

    fn fetch_forecast(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<ForecastWeather, AppError>> + Send;
}

/// Query settings fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub units: String,
    pub lang: String,
    pub country: String,
    pub forecast_count: u32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            units: "imperial".to_string(),
            lang: "en".to_string(),
            country: "US".to_string(),
            forecast_count: MAX_FORECAST_COUNT,
        }
    }
}

/// Five days of three hour steps.
pub const MAX_FORECAST_COUNT: u32 = 40;

pub struct OpenWeatherMapClient {
    http_client: HttpClient,
    base_url: String,
    options: QueryOptions,
}

impl OpenWeatherMapClient {
    pub fn new(http_client: HttpClient, base_url: String, options: QueryOptions) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            options,
        }
    }

    fn zip(&self, credentials: &Credentials) -> String {
        format!("{},{}", credentials.location_key, self.options.country)
    }

    fn common_query(&self, credentials: &Credentials) -> Vec<(&'static str, String)> {
        vec![
            ("zip", self.zip(credentials)),
            ("units", self.options.units.clone()),
            ("lang", self.options.lang.clone()),
            ("appid", credentials.api_key.clone()),
        ]
    }
}

impl ProviderClient for OpenWeatherMapClient {
    #[instrument(skip(self, credentials), fields(zip = %credentials.location_key))]
    async fn fetch_current(&self, credentials: &Credentials) -> Result<CurrentWeather, AppError> {
        info!("Fetching current conditions from API");

        let url = format!("{}/weather", self.base_url);
        self.http_client
            .get_json(&url, &self.common_query(credentials))
            .await
    }

    #[instrument(skip(self, credentials), fields(zip = %credentials.location_key))]
    async fn fetch_forecast(&self, credentials: &Credentials) -> Result<ForecastWeather, AppError> {
        info!("Fetching forecast from API");

        let url = format!("{}/forecast", self.base_url);
        let mut query = self.common_query(credentials);
        let count = self.options.forecast_count.clamp(1, MAX_FORECAST_COUNT);
        query.push(("cnt", count.to_string()));

        self.http_client.get_json(&url, &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn client_for(server: &MockServer, options: QueryOptions) -> OpenWeatherMapClient {
        OpenWeatherMapClient::new(
            HttpClient::new(2).unwrap(),
            format!("{}/data/2.5/", server.uri()),
            options,
        )
    }

    #[test]
    fn test_credentials_complete_requires_both() {
        assert!(Credentials::new("key", "90210").is_complete());
        assert!(!Credentials::new("", "90210").is_complete());
        assert!(!Credentials::new("key", "").is_complete());
        assert!(!Credentials::default().is_complete());
    }

    #[test]
    fn test_credentials_debug_hides_key() {
        let debug = format!("{:?}", Credentials::new("secret-key", "90210"));
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("90210"));
    }

    #[tokio::test]
    async fn test_fetch_current_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("zip", "90210,US"))
            .and(query_param("units", "imperial"))
            .and(query_param("lang", "en"))
            .and(query_param("appid", "key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Beverly Hills",
                "main": { "temp": 72.3 },
                "cod": 200
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, QueryOptions::default());
        let current = client
            .fetch_current(&Credentials::new("key", "90210"))
            .await
            .unwrap();

        assert_eq!(current.name, "Beverly Hills");
        assert_eq!(current.main.temp, 72.3);
    }

    #[tokio::test]
    async fn test_fetch_forecast_clamps_count() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .and(query_param("cnt", "40"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cnt": 1,
                "list": [{ "dt": 1700010800, "main": { "feels_like": 20.5 } }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let options = QueryOptions {
            units: "metric".to_string(),
            forecast_count: 99,
            ..QueryOptions::default()
        };
        let client = client_for(&mock_server, options);
        let forecast = client
            .fetch_forecast(&Credentials::new("key", "90210"))
            .await
            .unwrap();

        assert_eq!(forecast.cnt, 1);
        assert_eq!(forecast.list[0].main.feels_like, 20.5);
    }

    #[tokio::test]
    async fn test_fetch_surfaces_upstream_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "cod": "404",
                "message": "city not found"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, QueryOptions::default());
        let err = client
            .fetch_current(&Credentials::new("key", "00000"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "HTTP error: 404 - city not found");
    }
}
