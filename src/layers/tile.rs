use crate::layers::base::{LayerProperties, LayerTrait, LayerType};
use serde::{Deserialize, Serialize};

/// Configuration for a tile layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLayerOptions {
    /// URL template for tiles (e.g., "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png")
    pub url_template: String,
    /// Available subdomains for load balancing
    pub subdomains: Vec<String>,
    /// Attribution text
    pub attribution: String,
    /// Maximum zoom level for this tile source
    pub max_zoom: u8,
    /// Minimum zoom level for this tile source
    pub min_zoom: u8,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            subdomains: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            attribution: "© OpenStreetMap contributors".to_string(),
            max_zoom: 19,
            min_zoom: 0,
        }
    }
}

impl TileLayerOptions {
    /// OpenStreetMap standard tiles.
    pub fn openstreetmap() -> Self {
        Self::default()
    }

    /// Humanitarian OpenStreetMap Team tiles, hosted by OSM France.
    pub fn humanitarian() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors, Humanitarian OpenStreetMap Team"
                .to_string(),
            ..Self::default()
        }
    }
}

/// A background layer backed by a tile server.
///
/// Tiles are fetched and drawn by the map widget; this layer only carries the
/// URL template and attribution.
#[derive(Debug, Clone)]
pub struct TileLayer {
    properties: LayerProperties,
    options: TileLayerOptions,
}

impl TileLayer {
    /// Create a new tile layer with default OpenStreetMap tiles
    pub fn new(id: String, name: String) -> Self {
        Self::with_options(id, name, TileLayerOptions::default())
    }

    /// Create a new tile layer with custom options
    pub fn with_options(id: String, name: String, options: TileLayerOptions) -> Self {
        let properties = LayerProperties::new(id, name, LayerType::Tile);
        Self {
            properties,
            options,
        }
    }

    /// Create a tile layer for OpenStreetMap
    pub fn openstreetmap(id: String, name: String) -> Self {
        Self::with_options(id, name, TileLayerOptions::openstreetmap())
    }

    /// Create a tile layer for the Humanitarian OSM style
    pub fn humanitarian(id: String, name: String) -> Self {
        Self::with_options(id, name, TileLayerOptions::humanitarian())
    }

    pub fn tile_options(&self) -> &TileLayerOptions {
        &self.options
    }

    pub fn attribution(&self) -> &str {
        &self.options.attribution
    }

    /// Expands the URL template for one tile. Subdomains rotate on `x + y`.
    pub fn tile_url(&self, x: u32, y: u32, z: u8) -> String {
        let subdomain = if self.options.subdomains.is_empty() {
            ""
        } else {
            let idx = ((x as usize) + (y as usize)) % self.options.subdomains.len();
            self.options.subdomains[idx].as_str()
        };

        self.options
            .url_template
            .replace("{s}", subdomain)
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(properties);

    fn options(&self) -> serde_json::Value {
        let mut json = self.properties.to_json();
        json["url_template"] = serde_json::json!(self.options.url_template);
        json["subdomains"] = serde_json::json!(self.options.subdomains);
        json["attribution"] = serde_json::json!(self.options.attribution);
        json["min_zoom"] = serde_json::json!(self.options.min_zoom);
        json["max_zoom"] = serde_json::json!(self.options.max_zoom);
        json
    }
}
