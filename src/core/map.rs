use crate::{
    core::{
        config::MapConfig,
        geo::{LatLng, LatLngBounds},
    },
    layers::{group::LayerGroup, manager::LayerManager, tile::TileLayer},
    render::RenderedPrimitive,
    style::scale::DEPTH_SCALE,
    ui::{
        controls::{ControlAction, ControlEntry, LayerControl},
        legend::{build_legend, Legend},
    },
    ErrorKind, Result,
};

/// Everything the map widget displays, owned by the application root and
/// passed by reference to whatever mutates it.
///
/// Created once at startup with empty overlays; the loading pipeline fills
/// them in as data arrives.
#[derive(Debug)]
pub struct MapContext {
    config: MapConfig,
    center: LatLng,
    zoom: f64,
    layers: LayerManager,
    control: LayerControl,
    legend: Option<Legend>,
}

impl MapContext {
    /// Builds the map from a validated config: base layers registered with
    /// the configured default active, both overlays registered empty.
    pub fn new(config: MapConfig) -> Result<Self> {
        config.validate()?;

        let mut map = Self {
            center: config.center,
            zoom: config.zoom,
            layers: LayerManager::new(),
            control: LayerControl::new(config.control_position),
            legend: None,
            config,
        };

        let bases: Vec<TileLayer> = map
            .config
            .base_layers
            .iter()
            .enumerate()
            .map(|(i, base)| {
                TileLayer::with_options(format!("base-{}", i), base.name.clone(), base.options.clone())
            })
            .collect();
        map.register_base_layers(bases)?;
        let default_base = map.config.default_base.clone();
        map.layers.select_base(&default_base)?;

        let overlays = vec![
            LayerGroup::new("earthquakes".to_string(), map.config.earthquakes.name.clone()),
            LayerGroup::new("tectonic-plates".to_string(), map.config.tectonic_plates.name.clone()),
        ];
        map.register_overlays(overlays)?;

        log::info!(
            "map initialised at ({}, {}) zoom {} with {} layer(s)",
            map.center.lat,
            map.center.lng,
            map.zoom,
            map.layers.len()
        );
        Ok(map)
    }

    pub fn register_base_layers(&mut self, layers: impl IntoIterator<Item = TileLayer>) -> Result<()> {
        self.layers.register_base_layers(layers)
    }

    pub fn register_overlays(&mut self, groups: impl IntoIterator<Item = LayerGroup>) -> Result<()> {
        self.layers.register_overlays(groups)
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    /// Rows of the layer control.
    pub fn control_entries(&self) -> Vec<ControlEntry> {
        self.control.entries(&self.layers)
    }

    /// Routes a layer-control interaction.
    pub fn apply_control(&mut self, action: ControlAction) -> Result<()> {
        self.control.apply(&mut self.layers, action)
    }

    /// Adds rendered primitives to an overlay and shows it.
    pub fn populate_overlay(&mut self, name: &str, primitives: Vec<RenderedPrimitive>) -> Result<()> {
        let count = primitives.len();
        self.layers.overlay_mut(name)?.populate(primitives);
        log::info!("overlay '{}' populated with {} primitive(s)", name, count);
        Ok(())
    }

    /// Flags an overlay whose dataset could not be loaded.
    pub fn mark_overlay_unavailable(&mut self, name: &str, kind: ErrorKind, message: String) -> Result<()> {
        log::warn!("overlay '{}' unavailable ({}): {}", name, kind, message);
        self.layers.overlay_mut(name)?.mark_unavailable(kind, message);
        Ok(())
    }

    /// Adds the depth legend at the configured corner. Idempotent.
    pub fn add_legend(&mut self) -> &Legend {
        let position = self.config.legend_position;
        self.legend
            .get_or_insert_with(|| build_legend(&DEPTH_SCALE).with_position(position))
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    /// Bounds of the visible overlay data.
    pub fn data_bounds(&self) -> Option<LatLngBounds> {
        self.layers.overlay_bounds()
    }

    /// Serializable description of the whole map for a widget host.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "center": self.center,
            "zoom": self.zoom,
            "layers": self
                .layers
                .visible_layers()
                .iter()
                .map(|layer| layer.options())
                .collect::<Vec<_>>(),
            "control": {
                "position": self.control.position,
                "collapsed": self.control.collapsed,
                "entries": self.control_entries(),
            },
            "legend": self.legend.as_ref().map(|legend| serde_json::json!({
                "position": legend.position,
                "entries": legend.entries,
                "html": legend.to_html(),
            })),
            "bounds": self.data_bounds(),
        })
    }
}
