use common::errors::AppError;
use common::models::{CurrentWeather, DataKind, ForecastWeather};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::api_client::{CredentialSource, Credentials, ProviderClient};
use crate::cache::CacheStore;
use crate::freshness;

/// Outcome of consulting the cache and the credentials.
enum Lookup<T> {
    /// Serve this without touching the network.
    Ready(T),
    /// Cache is stale or missing and credentials are usable.
    Fetch(Credentials),
}

/// Decides per request whether to serve the cache, call the upstream
/// provider, or fall back to stale/empty data.
///
/// Built once at startup and shared between requests. Holds no mutable
/// state; the cache directory is the only thing requests share.
pub struct DataProvider<C> {
    cache: CacheStore,
    client: C,
    credentials: Arc<dyn CredentialSource>,
}

impl<C: ProviderClient> DataProvider<C> {
    pub fn new(cache: CacheStore, client: C, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            cache,
            client,
            credentials,
        }
    }

    #[instrument(skip(self), fields(kind = %DataKind::Current))]
    pub async fn get_current(&self) -> Result<CurrentWeather, AppError> {
        let credentials = match self.lookup(DataKind::Current).await? {
            Lookup::Ready(data) => return Ok(data),
            Lookup::Fetch(credentials) => credentials,
        };

        let data = self
            .client
            .fetch_current(&credentials)
            .await
            .inspect_err(|e| warn!(error = %e, "Current conditions fetch failed"))?;

        self.persist(DataKind::Current, &data).await;
        Ok(data)
    }

    #[instrument(skip(self), fields(kind = %DataKind::Forecast))]
    pub async fn get_forecast(&self) -> Result<ForecastWeather, AppError> {
        let credentials = match self.lookup(DataKind::Forecast).await? {
            Lookup::Ready(data) => return Ok(data),
            Lookup::Fetch(credentials) => credentials,
        };

        let data = self
            .client
            .fetch_forecast(&credentials)
            .await
            .inspect_err(|e| warn!(error = %e, "Forecast fetch failed"))?;

        self.persist(DataKind::Forecast, &data).await;
        Ok(data)
    }

    async fn lookup<T>(&self, kind: DataKind) -> Result<Lookup<T>, AppError>
    where
        T: DeserializeOwned + Default,
    {
        let cached = self.cache.read::<T>(kind.file_name()).await?;
        let last_modified = cached.as_ref().map(|doc| doc.last_modified);

        if freshness::is_fresh(last_modified, kind) {
            info!(kind = %kind, "Cache hit");
            return Ok(Lookup::Ready(cached.map(|doc| doc.data).unwrap_or_default()));
        }

        let credentials = self.credentials.credentials();
        if !credentials.is_complete() {
            info!(
                kind = %kind,
                has_cache = cached.is_some(),
                "Credentials not configured, serving cached or empty data"
            );
            return Ok(Lookup::Ready(cached.map(|doc| doc.data).unwrap_or_default()));
        }

        Ok(Lookup::Fetch(credentials))
    }

    /// Best effort. A failed write still lets the fresh data reach the caller.
    async fn persist<T: Serialize>(&self, kind: DataKind, data: &T) {
        if let Err(e) = self.cache.write(kind.file_name(), data).await {
            warn!(kind = %kind, error = %e, "Failed to persist fetched data");
        }
    }
}
