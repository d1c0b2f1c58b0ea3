use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::config::DirectoryConfig;
use crate::directory::model::{City, CityRecord, Region, RegionRecord};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the locality directory.
///
/// Callers treat any of these as "no data available"; a failed fetch is a
/// degraded state, never a crash.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(StatusCode),
}

/// Read-only client for the locality directory.
///
/// Implementations are stateless and shareable across calls. Each call
/// issues exactly one outbound request: no retries, no caching, no
/// deduplication of in-flight requests.
#[async_trait]
pub trait Directory: Send + Sync {
    /// List all regions, in server order.
    async fn list_regions(&self) -> Result<Vec<Region>, DirectoryError>;

    /// List the cities of one region, in server order.
    ///
    /// `code` must be a real region code; the caller guarantees it is
    /// never the unselected placeholder.
    async fn list_cities(&self, code: &str) -> Result<Vec<City>, DirectoryError>;
}

/// [`Directory`] implementation against the IBGE localities API.
#[derive(Clone, Debug)]
pub struct HttpDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDirectory {
    /// Create a client for the configured directory endpoint.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &DirectoryConfig) -> color_eyre::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("coleta/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn regions_url(&self) -> String {
        format!("{}/estados", self.base_url)
    }

    fn cities_url(&self, code: &str) -> String {
        format!("{}/estados/{}/municipios", self.base_url, code)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
    ) -> Result<T, DirectoryError> {
        debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(DirectoryError::Status(response.status()));
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl Directory for HttpDirectory {
    async fn list_regions(&self) -> Result<Vec<Region>, DirectoryError> {
        let records: Vec<RegionRecord> = self.get_json(self.regions_url()).await?;
        Ok(records.into_iter().map(Region::from).collect())
    }

    async fn list_cities(&self, code: &str) -> Result<Vec<City>, DirectoryError> {
        let records: Vec<CityRecord> = self.get_json(self.cities_url(code)).await?;
        Ok(records.into_iter().map(City::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(base_url: &str) -> HttpDirectory {
        HttpDirectory::new(&DirectoryConfig {
            base_url: base_url.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_region_url() {
        let dir = directory("https://example.test/api/v1/localidades");
        assert_eq!(
            dir.regions_url(),
            "https://example.test/api/v1/localidades/estados"
        );
    }

    #[test]
    fn test_city_url_substitutes_region_code() {
        let dir = directory("https://example.test/api/v1/localidades");
        assert_eq!(
            dir.cities_url("SP"),
            "https://example.test/api/v1/localidades/estados/SP/municipios"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let dir = directory("https://example.test/api/v1/localidades/");
        assert_eq!(
            dir.regions_url(),
            "https://example.test/api/v1/localidades/estados"
        );
    }
}
