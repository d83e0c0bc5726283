use crate::{
    core::geo::{LatLng, LatLngBounds},
    layers::base::{LayerProperties, LayerTrait, LayerType},
    style::encoder::StyleSpec,
    ui::popup::Popup,
};
use serde::{Deserialize, Serialize};

/// A circle drawn at a fixed pixel radius around a geographic position.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleMarker {
    properties: LayerProperties,
    position: LatLng,
    style: StyleSpec,
    popup: Option<Popup>,
}

impl CircleMarker {
    pub fn new(id: String, position: LatLng, style: StyleSpec) -> Self {
        let mut properties =
            LayerProperties::new(id, "CircleMarker".to_string(), LayerType::CircleMarker);
        properties.opacity = style.opacity as f32;
        Self {
            properties,
            position,
            style,
            popup: None,
        }
    }

    pub fn with_popup(mut self, popup: Popup) -> Self {
        self.popup = Some(popup);
        self
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn style(&self) -> &StyleSpec {
        &self.style
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }
}

impl LayerTrait for CircleMarker {
    crate::impl_layer_trait!(properties);

    fn options(&self) -> serde_json::Value {
        let mut json = self.properties.to_json();
        json["position"] = serde_json::json!({
            "lat": self.position.lat,
            "lng": self.position.lng
        });
        json["style"] = serde_json::json!(self.style);
        json["popup"] = serde_json::json!(self.popup.as_ref().map(|p| &p.content));
        json
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        Some(LatLngBounds::new(self.position, self.position))
    }
}

/// Image used by an [`IconMarker`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    pub url: String,
    /// Width and height in pixels
    pub size: [u32; 2],
    /// Pixel of the image placed on the marker position
    pub anchor: [u32; 2],
}

impl Icon {
    /// Icon anchored at its bottom centre, like a map pin.
    pub fn pin(url: impl Into<String>, size: [u32; 2]) -> Self {
        Self {
            url: url.into(),
            size,
            anchor: [size[0] / 2, size[1]],
        }
    }
}

/// A marker drawn as an image at a geographic position.
#[derive(Debug, Clone, PartialEq)]
pub struct IconMarker {
    properties: LayerProperties,
    position: LatLng,
    icon: Icon,
    popup: Option<Popup>,
}

impl IconMarker {
    pub fn new(id: String, position: LatLng, icon: Icon) -> Self {
        let properties = LayerProperties::new(id, "Marker".to_string(), LayerType::Marker);
        Self {
            properties,
            position,
            icon,
            popup: None,
        }
    }

    pub fn with_popup(mut self, popup: Popup) -> Self {
        self.popup = Some(popup);
        self
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }
}

impl LayerTrait for IconMarker {
    crate::impl_layer_trait!(properties);

    fn options(&self) -> serde_json::Value {
        let mut json = self.properties.to_json();
        json["position"] = serde_json::json!({
            "lat": self.position.lat,
            "lng": self.position.lng
        });
        json["icon"] = serde_json::json!(self.icon);
        json["popup"] = serde_json::json!(self.popup.as_ref().map(|p| &p.content));
        json
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        Some(LatLngBounds::new(self.position, self.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::encoder::style_for_quake;

    #[test]
    fn test_marker_options() {
        let marker = CircleMarker::new("q1".into(), LatLng::new(1.0, 2.0), style_for_quake(40.0, 2.0))
            .with_popup(Popup::new("<h3>here</h3>".into()));

        let options = marker.options();
        assert_eq!(options["layer_type"], "circle_marker");
        assert_eq!(options["position"]["lng"], 2.0);
        assert_eq!(options["style"]["fill_color"], "#80ff00");
        assert_eq!(options["style"]["radius"], 8.0);
        assert_eq!(options["popup"], "<h3>here</h3>");
        assert_eq!(
            marker.bounds(),
            Some(LatLngBounds::new(LatLng::new(1.0, 2.0), LatLng::new(1.0, 2.0)))
        );
    }

    #[test]
    fn test_icon_marker_options() {
        let marker = IconMarker::new(
            "q2".into(),
            LatLng::new(-3.0, 4.0),
            Icon::pin("https://example.test/pin.png", [24, 36]),
        );

        assert_eq!(marker.icon().anchor, [12, 36]);
        let options = marker.options();
        assert_eq!(options["layer_type"], "marker");
        assert_eq!(options["icon"]["url"], "https://example.test/pin.png");
        assert_eq!(options["icon"]["size"][1], 36);
        assert!(options["popup"].is_null());
    }
}
