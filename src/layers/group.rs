use crate::{
    core::geo::LatLngBounds,
    layers::base::{LayerProperties, LayerTrait, LayerType},
    render::RenderedPrimitive,
    ErrorKind,
};
use serde::{Deserialize, Serialize};

/// Loading state of an overlay's backing dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OverlayStatus {
    /// Registered, data not arrived yet.
    Pending,
    /// Data arrived and was rendered.
    Ready,
    /// The dataset failed; the group stays empty.
    Unavailable { kind: ErrorKind, message: String },
}

impl OverlayStatus {
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            OverlayStatus::Unavailable { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// An overlay: a named group of rendered primitives toggled as one.
///
/// Groups are created empty and hidden; [`LayerGroup::populate`] fills them
/// and makes them visible once their data arrives.
#[derive(Debug, Clone)]
pub struct LayerGroup {
    properties: LayerProperties,
    primitives: Vec<RenderedPrimitive>,
    status: OverlayStatus,
}

impl LayerGroup {
    pub fn new(id: String, name: String) -> Self {
        let mut properties = LayerProperties::new(id, name, LayerType::Group);
        properties.visible = false;
        Self {
            properties,
            primitives: Vec::new(),
            status: OverlayStatus::Pending,
        }
    }

    /// Adds rendered primitives and marks the group ready and visible.
    pub fn populate(&mut self, primitives: Vec<RenderedPrimitive>) {
        self.primitives.extend(primitives);
        self.status = OverlayStatus::Ready;
        self.properties.visible = true;
    }

    /// Flags the dataset as failed. Contents are left as they were, so a
    /// group that never loaded stays empty.
    pub fn mark_unavailable(&mut self, kind: ErrorKind, message: String) {
        self.status = OverlayStatus::Unavailable { kind, message };
    }

    pub fn status(&self) -> &OverlayStatus {
        &self.status
    }

    pub fn primitives(&self) -> &[RenderedPrimitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl LayerTrait for LayerGroup {
    crate::impl_layer_trait!(properties);

    fn options(&self) -> serde_json::Value {
        let mut json = self.properties.to_json();
        json["status"] = serde_json::json!(self.status);
        json["features"] = serde_json::Value::Array(
            self.primitives.iter().map(|p| p.as_layer().options()).collect(),
        );
        json
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        self.primitives
            .iter()
            .map(|p| p.as_layer().bounds())
            .fold(None, LatLngBounds::merge)
    }
}
