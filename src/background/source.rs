//! Remote feature collections.

use crate::core::config::FetchConfig;
use crate::data::geojson::{GeoJson, GeoJsonFeature};
use crate::{ErrorKind, MapError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::time::Duration;

/// Shared HTTP client. Building it once avoids the TLS and connection pool
/// setup on every fetch; per-request timeouts are applied by the caller.
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Anything that can produce a GeoJSON document for a URL.
#[async_trait]
pub trait FeatureSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<GeoJson>;
}

/// Fetches over HTTP(S) with a bounded timeout.
#[derive(Debug, Clone)]
pub struct HttpFeatureSource {
    client: reqwest::Client,
    timeout: Duration,
    user_agent: String,
}

impl HttpFeatureSource {
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MapError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl Default for HttpFeatureSource {
    fn default() -> Self {
        Self::new(&FetchConfig::default())
    }
}

#[async_trait]
impl FeatureSource for HttpFeatureSource {
    async fn fetch(&self, url: &str) -> Result<GeoJson> {
        log::info!("fetching {}", url);

        #[cfg(feature = "tokio-runtime")]
        let bytes = match tokio::time::timeout(self.timeout, self.get_bytes(url)).await {
            Ok(result) => result,
            Err(_) => Err(MapError::Timeout {
                url: url.to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        };

        #[cfg(not(feature = "tokio-runtime"))]
        let bytes = self.get_bytes(url).await;

        let bytes = bytes.map_err(|e| match e {
            MapError::Network(inner) if inner.is_timeout() => MapError::Timeout {
                url: url.to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            },
            other => other,
        })?;

        log::debug!("downloaded {} bytes from {}", bytes.len(), url);
        GeoJson::parse_slice(&bytes)
    }
}

/// Result of fetching one collection: the features, or nothing plus the error.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub features: Vec<GeoJsonFeature>,
    pub error: Option<MapError>,
}

impl FetchOutcome {
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(MapError::kind)
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Fetches a feature collection, folding any failure into the outcome so the
/// caller can leave the matching layer empty and carry on.
pub async fn fetch_feature_collection(source: &dyn FeatureSource, url: &str) -> FetchOutcome {
    match source.fetch(url).await {
        Ok(geojson) => FetchOutcome {
            features: geojson.into_features(),
            error: None,
        },
        Err(error) => {
            log::warn!("fetch of {} failed ({}): {}", url, error.kind(), error);
            FetchOutcome {
                features: Vec::new(),
                error: Some(error),
            }
        }
    }
}
