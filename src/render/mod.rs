//! Turns GeoJSON features into styled map primitives with popups.
//!
//! Point features go through a [`GeometryHandler`] so the concrete marker
//! type stays swappable; lines and polygons become [`PathPrimitive`]s. Style
//! and popup are fixed when a primitive is created and never changed after.

use crate::{
    core::geo::LatLng,
    data::{geojson::GeoJsonFeature, quake::Quake},
    layers::{
        base::LayerTrait,
        marker::{CircleMarker, IconMarker},
        vector::{PathPrimitive, PathStyle},
    },
    style::encoder::{style_for_quake, StyleSpec},
    ui::popup::Popup,
    MapError, Result,
};

/// A drawable item produced by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedPrimitive {
    Marker(CircleMarker),
    Icon(IconMarker),
    Path(PathPrimitive),
}

impl RenderedPrimitive {
    pub fn as_layer(&self) -> &dyn LayerTrait {
        match self {
            RenderedPrimitive::Marker(marker) => marker as &dyn LayerTrait,
            RenderedPrimitive::Icon(icon) => icon as &dyn LayerTrait,
            RenderedPrimitive::Path(path) => path as &dyn LayerTrait,
        }
    }

    pub fn as_marker(&self) -> Option<&CircleMarker> {
        match self {
            RenderedPrimitive::Marker(marker) => Some(marker),
            _ => None,
        }
    }

    pub fn as_icon(&self) -> Option<&IconMarker> {
        match self {
            RenderedPrimitive::Icon(icon) => Some(icon),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&PathPrimitive> {
        match self {
            RenderedPrimitive::Path(path) => Some(path),
            _ => None,
        }
    }

    /// Popup bound to the primitive, if any.
    pub fn popup(&self) -> Option<&Popup> {
        match self {
            RenderedPrimitive::Marker(marker) => marker.popup(),
            RenderedPrimitive::Icon(icon) => icon.popup(),
            RenderedPrimitive::Path(_) => None,
        }
    }

    /// Binds `popup` to a marker. Paths carry no popup and are returned as-is.
    pub fn with_popup(self, popup: Popup) -> Self {
        match self {
            RenderedPrimitive::Marker(marker) => RenderedPrimitive::Marker(marker.with_popup(popup)),
            RenderedPrimitive::Icon(icon) => RenderedPrimitive::Icon(icon.with_popup(popup)),
            path @ RenderedPrimitive::Path(_) => path,
        }
    }
}

/// Places point features on the map. Implementations choose the concrete
/// marker type; the renderer only sees a [`RenderedPrimitive`].
pub trait GeometryHandler: Send + Sync {
    /// Builds the primitive for one event. The popup is bound by the renderer
    /// afterwards.
    fn point_to_layer(
        &self,
        id: String,
        feature: &GeoJsonFeature,
        position: LatLng,
        style: &StyleSpec,
    ) -> Result<RenderedPrimitive>;
}

/// Default handler: a circle marker with the computed style.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleMarkerHandler;

impl GeometryHandler for CircleMarkerHandler {
    fn point_to_layer(
        &self,
        id: String,
        _feature: &GeoJsonFeature,
        position: LatLng,
        style: &StyleSpec,
    ) -> Result<RenderedPrimitive> {
        if !position.is_valid() {
            return Err(MapError::Render(format!(
                "feature {} has out-of-range coordinates ({}, {})",
                id, position.lat, position.lng
            )));
        }
        Ok(RenderedPrimitive::Marker(CircleMarker::new(id, position, *style)))
    }
}

/// A feature that could not be rendered; the rest of the batch still is.
#[derive(Debug)]
pub struct RenderFailure {
    /// Position of the feature in its collection.
    pub index: usize,
    pub feature_id: Option<String>,
    pub error: MapError,
}

/// Output of one render pass.
#[derive(Debug, Default)]
pub struct RenderReport {
    pub primitives: Vec<RenderedPrimitive>,
    pub failures: Vec<RenderFailure>,
}

type StyleFn = Box<dyn Fn(&Quake) -> StyleSpec + Send + Sync>;
type PopupFn = Box<dyn Fn(&Quake) -> Popup + Send + Sync>;
type FilterFn = Box<dyn Fn(&GeoJsonFeature) -> bool + Send + Sync>;

/// Renders feature collections for one overlay.
pub struct FeatureRenderer {
    id_prefix: String,
    style_function: StyleFn,
    popup_function: Option<PopupFn>,
    path_style: PathStyle,
    handler: Box<dyn GeometryHandler>,
    filter: Option<FilterFn>,
}

impl FeatureRenderer {
    /// Renderer with depth/magnitude marker styling, quake popups and
    /// circle markers. `id_prefix` namespaces generated primitive ids.
    pub fn new(id_prefix: &str) -> Self {
        Self {
            id_prefix: id_prefix.to_string(),
            style_function: Box::new(|quake: &Quake| style_for_quake(quake.depth, quake.magnitude)),
            popup_function: Some(Box::new(Popup::for_quake)),
            path_style: PathStyle::default(),
            handler: Box::new(CircleMarkerHandler),
            filter: None,
        }
    }

    /// Renderer for boundary lines: plate outline style, no popups.
    pub fn for_plates(id_prefix: &str) -> Self {
        Self::new(id_prefix)
            .set_path_style(PathStyle::plate_boundary())
            .without_popups()
    }

    /// Sets a function to style point features
    pub fn set_style_function<F>(mut self, style_fn: F) -> Self
    where
        F: Fn(&Quake) -> StyleSpec + Send + Sync + 'static,
    {
        self.style_function = Box::new(style_fn);
        self
    }

    /// Sets the style used for every line and polygon
    pub fn set_path_style(mut self, style: PathStyle) -> Self {
        self.path_style = style;
        self
    }

    pub fn set_geometry_handler<H>(mut self, handler: H) -> Self
    where
        H: GeometryHandler + 'static,
    {
        self.handler = Box::new(handler);
        self
    }

    pub fn without_popups(mut self) -> Self {
        self.popup_function = None;
        self
    }

    /// Sets a filter function to skip features before rendering
    pub fn set_filter<F>(mut self, filter_fn: F) -> Self
    where
        F: Fn(&GeoJsonFeature) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter_fn));
        self
    }

    /// Renders a batch. Features that fail are reported, not fatal.
    pub fn render(&self, features: Vec<GeoJsonFeature>) -> RenderReport {
        let mut report = RenderReport::default();

        for (index, feature) in features.into_iter().enumerate() {
            if let Some(filter) = &self.filter {
                if !filter(&feature) {
                    continue;
                }
            }

            match self.render_feature(index, &feature) {
                Ok(primitive) => report.primitives.push(primitive),
                Err(error) => {
                    log::debug!("skipping feature #{}: {}", index, error);
                    report.failures.push(RenderFailure {
                        index,
                        feature_id: feature_id(&feature),
                        error,
                    });
                }
            }
        }

        if !report.failures.is_empty() {
            log::warn!(
                "{}: rendered {} feature(s), skipped {}",
                self.id_prefix,
                report.primitives.len(),
                report.failures.len()
            );
        }
        report
    }

    fn render_feature(&self, index: usize, feature: &GeoJsonFeature) -> Result<RenderedPrimitive> {
        let id = feature_id(feature)
            .map(|fid| format!("{}-{}", self.id_prefix, fid))
            .unwrap_or_else(|| format!("{}-{}", self.id_prefix, index));

        let geometry = feature
            .geometry
            .as_ref()
            .ok_or_else(|| MapError::Render(format!("feature {} has no geometry", id)))?;

        if !geometry.is_point() {
            return PathPrimitive::from_geometry(id, geometry, self.path_style)
                .map(RenderedPrimitive::Path);
        }

        let quake = Quake::from_feature(feature)?;
        let style = (self.style_function)(&quake);
        let primitive = self
            .handler
            .point_to_layer(id, feature, quake.position, &style)?;
        Ok(match &self.popup_function {
            Some(popup_fn) => primitive.with_popup(popup_fn(&quake)),
            None => primitive,
        })
    }
}

fn feature_id(feature: &GeoJsonFeature) -> Option<String> {
    match feature.id.as_ref()? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
