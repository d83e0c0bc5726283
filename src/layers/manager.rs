use crate::{
    core::geo::LatLngBounds,
    layers::{base::LayerTrait, group::LayerGroup, tile::TileLayer},
    prelude::{HashMap, HashSet},
    MapError, Result,
};

/// Overlays stack above base layers starting at this z-index.
const OVERLAY_Z_BASE: i32 = 100;

/// Holds the base and overlay layer sets behind the layer control.
///
/// Invariants: once a base layer is registered exactly one is active; base
/// layer names are unique, as are overlay names. Overlays are toggled
/// independently of each other and of the base layer.
#[derive(Debug, Default)]
pub struct LayerManager {
    base_layers: Vec<TileLayer>,
    base_index: HashMap<String, usize>,
    active_base: Option<usize>,
    overlays: Vec<LayerGroup>,
    overlay_index: HashMap<String, usize>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers base layers in order. The first base layer ever registered
    /// becomes active; every other one is hidden. A duplicate name rejects
    /// the whole batch.
    pub fn register_base_layers(&mut self, layers: impl IntoIterator<Item = TileLayer>) -> Result<()> {
        let layers: Vec<TileLayer> = layers.into_iter().collect();
        check_unique("base layer", &self.base_index, layers.iter().map(|l| l.name()))?;

        for mut layer in layers {
            let name = layer.name().to_string();
            let idx = self.base_layers.len();
            let activate = self.active_base.is_none();
            layer.set_visible(activate);
            layer.set_z_index(0);
            if activate {
                self.active_base = Some(idx);
            }

            log::debug!("registered base layer '{}' (active: {})", name, activate);
            self.base_index.insert(name, idx);
            self.base_layers.push(layer);
        }
        Ok(())
    }

    /// Registers overlay groups in order; later overlays stack above earlier
    /// ones. A duplicate name rejects the whole batch.
    pub fn register_overlays(&mut self, groups: impl IntoIterator<Item = LayerGroup>) -> Result<()> {
        let groups: Vec<LayerGroup> = groups.into_iter().collect();
        check_unique("overlay", &self.overlay_index, groups.iter().map(|g| g.name()))?;

        for mut group in groups {
            let name = group.name().to_string();
            let idx = self.overlays.len();
            group.set_z_index(OVERLAY_Z_BASE + idx as i32);
            log::debug!("registered overlay '{}'", name);
            self.overlay_index.insert(name, idx);
            self.overlays.push(group);
        }
        Ok(())
    }

    /// Makes `name` the active base layer and hides the previous one.
    pub fn select_base(&mut self, name: &str) -> Result<()> {
        let idx = *self
            .base_index
            .get(name)
            .ok_or_else(|| MapError::Layer(format!("unknown base layer '{}'", name)))?;

        if let Some(previous) = self.active_base {
            self.base_layers[previous].set_visible(false);
        }
        self.base_layers[idx].set_visible(true);
        self.active_base = Some(idx);
        log::info!("base layer switched to '{}'", name);
        Ok(())
    }

    pub fn set_overlay_visible(&mut self, name: &str, visible: bool) -> Result<()> {
        self.overlay_mut(name)?.set_visible(visible);
        Ok(())
    }

    /// Flips an overlay and returns its new visibility.
    pub fn toggle_overlay(&mut self, name: &str) -> Result<bool> {
        let group = self.overlay_mut(name)?;
        let visible = !group.is_visible();
        group.set_visible(visible);
        Ok(visible)
    }

    pub fn active_base(&self) -> Option<&TileLayer> {
        self.active_base.map(|idx| &self.base_layers[idx])
    }

    pub fn base_layers(&self) -> &[TileLayer] {
        &self.base_layers
    }

    pub fn overlays(&self) -> &[LayerGroup] {
        &self.overlays
    }

    pub fn overlay(&self, name: &str) -> Option<&LayerGroup> {
        self.overlay_index.get(name).map(|idx| &self.overlays[*idx])
    }

    pub fn overlay_mut(&mut self, name: &str) -> Result<&mut LayerGroup> {
        let idx = *self
            .overlay_index
            .get(name)
            .ok_or_else(|| MapError::Layer(format!("unknown overlay '{}'", name)))?;
        Ok(&mut self.overlays[idx])
    }

    /// Visible layers in draw order: the active base, then overlays by z-index.
    pub fn visible_layers(&self) -> Vec<&dyn LayerTrait> {
        let mut overlays: Vec<&LayerGroup> =
            self.overlays.iter().filter(|g| g.is_visible()).collect();
        overlays.sort_by_key(|g| g.z_index());

        self.active_base()
            .map(|base| base as &dyn LayerTrait)
            .into_iter()
            .chain(overlays.into_iter().map(|g| g as &dyn LayerTrait))
            .collect()
    }

    /// Bounds of every visible, non-empty overlay; what a host fits the view to.
    pub fn overlay_bounds(&self) -> Option<LatLngBounds> {
        self.overlays
            .iter()
            .filter(|g| g.is_visible())
            .map(|g| g.bounds())
            .fold(None, LatLngBounds::merge)
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.base_layers.len() + self.overlays.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.base_layers.is_empty() && self.overlays.is_empty()
    }
}

/// Fails if any of `names` is already registered or repeats within the batch.
fn check_unique<'a>(
    what: &str,
    registered: &HashMap<String, usize>,
    names: impl Iterator<Item = &'a str>,
) -> Result<()> {
    let mut seen = HashSet::default();
    for name in names {
        if registered.contains_key(name) || !seen.insert(name) {
            return Err(MapError::Layer(format!("duplicate {} '{}'", what, name)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::layers::marker::CircleMarker;
    use crate::render::RenderedPrimitive;
    use crate::style::encoder::StyleSpec;

    fn bases() -> Vec<TileLayer> {
        vec![
            TileLayer::openstreetmap("basemap".into(), "Basemap".into()),
            TileLayer::humanitarian("street".into(), "Street Map".into()),
        ]
    }

    fn active_count(manager: &LayerManager) -> usize {
        manager.base_layers().iter().filter(|l| l.is_visible()).count()
    }

    #[test]
    fn test_first_base_is_active() {
        let mut manager = LayerManager::new();
        manager.register_base_layers(bases()).unwrap();

        assert_eq!(manager.active_base().unwrap().name(), "Basemap");
        assert_eq!(active_count(&manager), 1);
    }

    #[test]
    fn test_base_switch_is_exclusive() {
        let mut manager = LayerManager::new();
        manager.register_base_layers(bases()).unwrap();

        for name in ["Street Map", "Street Map", "Basemap", "Street Map", "Basemap"] {
            manager.select_base(name).unwrap();
            assert_eq!(active_count(&manager), 1);
            assert_eq!(manager.active_base().unwrap().name(), name);
        }
    }

    #[test]
    fn test_duplicate_and_unknown_names() {
        let mut manager = LayerManager::new();
        manager.register_base_layers(bases()).unwrap();
        assert!(manager
            .register_base_layers(vec![TileLayer::new("b2".into(), "Basemap".into())])
            .is_err());
        assert!(manager.select_base("Nope").is_err());
        assert_eq!(manager.active_base().unwrap().name(), "Basemap");

        manager
            .register_overlays(vec![LayerGroup::new("q".into(), "Earthquakes".into())])
            .unwrap();
        assert!(manager
            .register_overlays(vec![LayerGroup::new("q2".into(), "Earthquakes".into())])
            .is_err());
        assert!(manager.toggle_overlay("Volcanoes").is_err());
    }

    #[test]
    fn test_duplicate_in_batch_registers_nothing() {
        let mut manager = LayerManager::new();
        let err = manager
            .register_base_layers(vec![
                TileLayer::openstreetmap("a".into(), "Basemap".into()),
                TileLayer::humanitarian("b".into(), "Street Map".into()),
                TileLayer::new("c".into(), "Basemap".into()),
            ])
            .unwrap_err();
        assert!(matches!(err, MapError::Layer(_)));
        assert!(manager.is_empty());
        assert!(manager.active_base().is_none());

        manager
            .register_overlays(vec![LayerGroup::new("q".into(), "Earthquakes".into())])
            .unwrap();
        assert!(manager
            .register_overlays(vec![
                LayerGroup::new("p".into(), "Tectonic Plates".into()),
                LayerGroup::new("q2".into(), "Earthquakes".into()),
            ])
            .is_err());
        assert_eq!(manager.overlays().len(), 1);
        assert!(manager.overlay("Tectonic Plates").is_none());

        // The same batch without the duplicate goes through.
        manager.register_base_layers(bases()).unwrap();
        assert_eq!(manager.active_base().unwrap().name(), "Basemap");
    }

    #[test]
    fn test_overlays_toggle_independently() {
        let mut manager = LayerManager::new();
        manager.register_base_layers(bases()).unwrap();
        manager
            .register_overlays(vec![
                LayerGroup::new("q".into(), "Earthquakes".into()),
                LayerGroup::new("p".into(), "Tectonic Plates".into()),
            ])
            .unwrap();

        assert!(manager.toggle_overlay("Earthquakes").unwrap());
        assert!(manager.toggle_overlay("Tectonic Plates").unwrap());
        assert!(!manager.toggle_overlay("Earthquakes").unwrap());
        assert!(manager.overlay("Tectonic Plates").unwrap().is_visible());
        assert_eq!(manager.active_base().unwrap().name(), "Basemap");
    }

    #[test]
    fn test_visible_layers_draw_order() {
        let mut manager = LayerManager::new();
        manager.register_base_layers(bases()).unwrap();
        manager
            .register_overlays(vec![
                LayerGroup::new("q".into(), "Earthquakes".into()),
                LayerGroup::new("p".into(), "Tectonic Plates".into()),
            ])
            .unwrap();
        manager.set_overlay_visible("Tectonic Plates", true).unwrap();
        manager.set_overlay_visible("Earthquakes", true).unwrap();

        let visible = manager.visible_layers();
        let names: Vec<&str> = visible.iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["Basemap", "Earthquakes", "Tectonic Plates"]);
    }

    #[test]
    fn test_overlay_bounds_ignore_hidden() {
        let mut manager = LayerManager::new();
        manager
            .register_overlays(vec![LayerGroup::new("q".into(), "Earthquakes".into())])
            .unwrap();
        assert!(manager.overlay_bounds().is_none());

        manager.overlay_mut("Earthquakes").unwrap().populate(vec![RenderedPrimitive::Marker(
            CircleMarker::new("a".into(), LatLng::new(1.0, 1.0), StyleSpec::default()),
        )]);
        assert!(manager.overlay_bounds().is_some());

        manager.toggle_overlay("Earthquakes").unwrap();
        assert!(manager.overlay_bounds().is_none());
    }
}
