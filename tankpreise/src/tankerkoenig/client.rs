//! Tankerkönig HTTP client.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{Location, Station};

use super::api::FuelApi;
use super::convert::to_station;
use super::error::TankerkoenigError;
use super::types::{ListResponse, PriceEntry, PricesResponse};

/// Default base URL for the free Tankerkönig API.
const DEFAULT_BASE_URL: &str = "https://creativecommons.tankerkoenig.de/json";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Tankerkönig client.
#[derive(Debug, Clone)]
pub struct TankerkoenigConfig {
    /// API key, sent as the `apikey` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TankerkoenigConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the Tankerkönig JSON API.
#[derive(Debug, Clone)]
pub struct TankerkoenigClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TankerkoenigClient {
    /// Create a new Tankerkönig client.
    pub fn new(config: TankerkoenigConfig) -> Result<Self, TankerkoenigError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Call `list.php` for all fuel types around a point.
    pub async fn list(&self, location: &Location) -> Result<ListResponse, TankerkoenigError> {
        let response: ListResponse = self
            .get(
                "list.php",
                &[
                    ("lat", location.latitude.to_string()),
                    ("lng", location.longitude.to_string()),
                    ("rad", location.radius_km.to_string()),
                    ("type", "all".to_string()),
                ],
            )
            .await?;

        if !response.ok {
            return Err(TankerkoenigError::Rejected {
                message: response.message.unwrap_or_default(),
            });
        }

        Ok(response)
    }

    /// Call `prices.php` for a set of station ids.
    pub async fn prices(&self, ids: &[String]) -> Result<PricesResponse, TankerkoenigError> {
        let response: PricesResponse = self.get("prices.php", &[("ids", ids.join(","))]).await?;

        if !response.ok {
            return Err(TankerkoenigError::Rejected {
                message: response.message.unwrap_or_default(),
            });
        }

        Ok(response)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, TankerkoenigError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, ?params, "Tankerkoenig request");

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(TankerkoenigError::Unauthorized);
        }

        if !status.is_success() {
            let message = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string());
            return Err(TankerkoenigError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TankerkoenigError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl FuelApi for TankerkoenigClient {
    async fn list_stations(&self, location: &Location) -> Result<Vec<Station>, TankerkoenigError> {
        let response = self.list(location).await?;
        Ok(response.stations.into_iter().map(to_station).collect())
    }

    async fn fetch_prices(
        &self,
        ids: &[String],
    ) -> Result<BTreeMap<String, PriceEntry>, TankerkoenigError> {
        Ok(self.prices(ids).await?.prices)
    }
}
