// LayerTrait is the shared layer abstraction from `traits`
pub use crate::traits::LayerOperations as LayerTrait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerType {
    Tile,
    Group,
    CircleMarker,
    Marker,
    Path,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Tile => write!(f, "tile"),
            LayerType::Group => write!(f, "group"),
            LayerType::CircleMarker => write!(f, "circle_marker"),
            LayerType::Marker => write!(f, "marker"),
            LayerType::Path => write!(f, "path"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerProperties {
    pub id: String,
    pub name: String,
    pub layer_type: LayerType,
    pub z_index: i32,
    pub opacity: f32,
    pub visible: bool,
}

impl LayerProperties {
    pub fn new(id: String, name: String, layer_type: LayerType) -> Self {
        Self {
            id,
            name,
            layer_type,
            z_index: 0,
            opacity: 1.0,
            visible: true,
        }
    }

    /// Common fields of [`LayerTrait::options`].
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "layer_type": self.layer_type.to_string(),
            "z_index": self.z_index,
            "opacity": self.opacity,
            "visible": self.visible
        })
    }
}
