//! Configuration for the map: view, base layers, overlay feeds and fetching.
//!
//! A [`MapConfig`] can be built from presets in Rust or loaded from JSON;
//! every field has a default, so a config file only needs the fields it changes.

use crate::core::constants::{
    BASEMAP_LAYER_NAME, DEFAULT_CENTER, DEFAULT_FETCH_TIMEOUT_MS, DEFAULT_ZOOM,
    EARTHQUAKES_LAYER_NAME, STREET_LAYER_NAME, TECTONIC_PLATES_LAYER_NAME,
    TECTONIC_PLATES_URL, USGS_SUMMARY_FEED_BASE,
};
use crate::core::geo::LatLng;
use crate::layers::{tile::TileLayerOptions, vector::PathStyle};
use crate::ui::controls::Position;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Time window of the USGS "all earthquakes" summary feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedPeriod {
    Hour,
    Day,
    #[default]
    Week,
    Month,
}

impl FeedPeriod {
    pub fn url(&self) -> String {
        let file = match self {
            FeedPeriod::Hour => "all_hour",
            FeedPeriod::Day => "all_day",
            FeedPeriod::Week => "all_week",
            FeedPeriod::Month => "all_month",
        };
        format!("{}/{}.geojson", USGS_SUMMARY_FEED_BASE, file)
    }
}

impl std::str::FromStr for FeedPeriod {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hour" => Ok(FeedPeriod::Hour),
            "day" => Ok(FeedPeriod::Day),
            "week" => Ok(FeedPeriod::Week),
            "month" => Ok(FeedPeriod::Month),
            other => Err(MapError::Config(format!(
                "unknown feed period '{}', expected hour, day, week or month",
                other
            ))),
        }
    }
}

/// A named base tile layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseLayerConfig {
    pub name: String,
    #[serde(flatten)]
    pub options: TileLayerOptions,
}

/// A named overlay backed by a remote GeoJSON feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    pub name: String,
    pub url: String,
}

/// How remote feeds are fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Upper bound on a single fetch, body included.
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            user_agent: concat!("quakemap/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center: LatLng,
    pub zoom: f64,
    /// Base layers in control order.
    pub base_layers: Vec<BaseLayerConfig>,
    /// Name of the base layer active at start.
    pub default_base: String,
    pub earthquakes: OverlayConfig,
    pub tectonic_plates: OverlayConfig,
    pub plate_style: PathStyle,
    pub fetch: FetchConfig,
    pub legend_position: Position,
    pub control_position: Position,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: LatLng::new(DEFAULT_CENTER[0], DEFAULT_CENTER[1]),
            zoom: DEFAULT_ZOOM,
            base_layers: vec![
                BaseLayerConfig {
                    name: BASEMAP_LAYER_NAME.to_string(),
                    options: TileLayerOptions::openstreetmap(),
                },
                BaseLayerConfig {
                    name: STREET_LAYER_NAME.to_string(),
                    options: TileLayerOptions::humanitarian(),
                },
            ],
            default_base: BASEMAP_LAYER_NAME.to_string(),
            earthquakes: OverlayConfig {
                name: EARTHQUAKES_LAYER_NAME.to_string(),
                url: FeedPeriod::default().url(),
            },
            tectonic_plates: OverlayConfig {
                name: TECTONIC_PLATES_LAYER_NAME.to_string(),
                url: TECTONIC_PLATES_URL.to_string(),
            },
            plate_style: PathStyle::plate_boundary(),
            fetch: FetchConfig::default(),
            legend_position: Position::BottomRight,
            control_position: Position::TopRight,
        }
    }
}

impl MapConfig {
    /// Switches the earthquake overlay to another USGS summary feed.
    pub fn with_feed(mut self, period: FeedPeriod) -> Self {
        self.earthquakes.url = period.url();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.fetch.timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MapConfig = serde_json::from_str(json)
            .map_err(|e| MapError::Config(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| MapError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }

    /// Checks cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.base_layers.is_empty() {
            return Err(MapError::Config("at least one base layer is required".into()));
        }
        if !self.base_layers.iter().any(|b| b.name == self.default_base) {
            return Err(MapError::Config(format!(
                "default base layer '{}' is not among the base layers",
                self.default_base
            )));
        }
        if self.earthquakes.name == self.tectonic_plates.name {
            return Err(MapError::Config(format!(
                "overlay name '{}' is used twice",
                self.earthquakes.name
            )));
        }
        if self.fetch.timeout_ms == 0 {
            return Err(MapError::Config("fetch timeout must be positive".into()));
        }
        if !self.center.is_valid() {
            return Err(MapError::Config(format!(
                "center ({}, {}) is out of range",
                self.center.lat, self.center.lng
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MapConfig::default();
        config.validate().unwrap();
        assert_eq!(config.center, LatLng::new(20.0, 0.0));
        assert_eq!(config.zoom, 2.0);
        assert_eq!(config.base_layers.len(), 2);
        assert_eq!(
            config.earthquakes.url,
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson"
        );
    }

    #[test]
    fn test_feed_presets() {
        let config = MapConfig::default().with_feed(FeedPeriod::Hour);
        assert!(config.earthquakes.url.ends_with("/all_hour.geojson"));
        assert_eq!("month".parse::<FeedPeriod>().unwrap(), FeedPeriod::Month);
        assert!("year".parse::<FeedPeriod>().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = MapConfig::from_json_str(
            r#"{ "zoom": 4, "fetch": { "timeout_ms": 5000 }, "legend_position": "top_left" }"#,
        )
        .unwrap();

        assert_eq!(config.zoom, 4.0);
        assert_eq!(config.fetch.timeout(), Duration::from_secs(5));
        assert_eq!(config.legend_position, Position::TopLeft);
        assert_eq!(config.default_base, "Basemap");
    }

    #[test]
    fn test_base_layer_json_shape() {
        let config = MapConfig::from_json_str(
            r#"{
                "base_layers": [
                    { "name": "Topo", "url_template": "https://tile.opentopomap.org/{z}/{x}/{y}.png", "subdomains": [] }
                ],
                "default_base": "Topo"
            }"#,
        )
        .unwrap();

        assert_eq!(config.base_layers[0].name, "Topo");
        assert!(config.base_layers[0].options.subdomains.is_empty());
        assert_eq!(config.base_layers[0].options.max_zoom, 19);
    }

    #[test]
    fn test_unknown_default_base_rejected() {
        let err = MapConfig::from_json_str(r#"{ "default_base": "Satellite" }"#).unwrap_err();
        assert!(matches!(err, MapError::Config(_)));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = MapConfig::default().with_feed(FeedPeriod::Day);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(MapConfig::from_json_str(&json).unwrap(), config);
    }
}
