//! Prelude module for common quakemap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use quakemap::prelude::*;`

pub use crate::core::{
    config::{BaseLayerConfig, FeedPeriod, FetchConfig, MapConfig, OverlayConfig},
    geo::{LatLng, LatLngBounds},
    map::MapContext,
};

pub use crate::layers::{
    base::{LayerTrait, LayerType},
    group::{LayerGroup, OverlayStatus},
    manager::LayerManager,
    marker::{CircleMarker, Icon, IconMarker},
    tile::{TileLayer, TileLayerOptions},
    vector::{PathPrimitive, PathStyle},
};

pub use crate::data::{
    geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry},
    quake::Quake,
};

pub use crate::style::{
    encoder::{color_for_depth, radius_for_magnitude, StyleSpec},
    scale::{Color, DepthScale, DEPTH_SCALE},
};

pub use crate::render::{FeatureRenderer, GeometryHandler, RenderReport, RenderedPrimitive};

pub use crate::ui::{
    controls::{ControlAction, ControlEntry, LayerControl, Position},
    legend::{build_legend, Legend, LegendEntry},
    popup::Popup,
};

pub use crate::background::{
    pipeline::{run_pipeline, PipelineReport, Stage, StageReport},
    source::{FeatureSource, FetchOutcome, HttpFeatureSource},
};

pub use crate::{Error as MapError, ErrorKind, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
