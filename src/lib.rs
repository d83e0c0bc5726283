//! # quakemap
//!
//! Earthquake and tectonic plate map layers, modelled after Leaflet's
//! layer/control vocabulary.
//!
//! The crate turns GeoJSON feature collections into styled map primitives,
//! groups them into base and overlay layers behind a layer control, derives a
//! depth legend from the same color scale used for the markers, and drives the
//! two remote feeds through an ordered two-stage pipeline. Tile rendering and
//! the map widget itself live outside the crate; [`core::map::MapContext`] is
//! the surface they read from.

pub mod background;
pub mod core;
pub mod data;
pub mod layers;
pub mod prelude;
pub mod render;
pub mod style;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    config::MapConfig,
    geo::{LatLng, LatLngBounds},
    map::MapContext,
};

pub use layers::{
    base::LayerTrait,
    group::LayerGroup,
    manager::LayerManager,
    marker::{CircleMarker, IconMarker},
    tile::TileLayer,
    vector::PathPrimitive,
};

pub use ui::{
    controls::LayerControl,
    legend::{build_legend, Legend, LegendEntry},
};

pub use style::{
    encoder::{color_for_depth, radius_for_magnitude, StyleSpec},
    scale::{Color, DepthScale, DEPTH_SCALE},
};

pub use render::{FeatureRenderer, GeometryHandler, RenderedPrimitive};

pub use background::{
    pipeline::{run_pipeline, PipelineReport},
    source::{FeatureSource, FetchOutcome, HttpFeatureSource},
};

pub use data::geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Request to {url} timed out after {timeout_ms} ms")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed data: {0}")]
    MalformedData(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification used when reporting per-layer failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The remote fetch failed, returned a non-success status, or timed out.
    NetworkFailure,
    /// The payload was not a GeoJSON feature collection, or lacked required properties.
    MalformedData,
    /// A feature could not be styled or placed.
    RenderFailure,
}

impl MapError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MapError::Network(_) | MapError::Http { .. } | MapError::Timeout { .. } => {
                ErrorKind::NetworkFailure
            }
            MapError::Serialization(_) | MapError::MalformedData(_) | MapError::Config(_) => {
                ErrorKind::MalformedData
            }
            MapError::Render(_) | MapError::Layer(_) => ErrorKind::RenderFailure,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::NetworkFailure => write!(f, "network failure"),
            ErrorKind::MalformedData => write!(f, "malformed data"),
            ErrorKind::RenderFailure => write!(f, "render failure"),
        }
    }
}

/// Error type alias for convenience
pub type Error = MapError;
