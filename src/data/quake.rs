//! Typed view over an earthquake feed feature.

use crate::core::geo::LatLng;
use crate::data::geojson::{GeoJsonFeature, GeoJsonGeometry};
use crate::{MapError, Result};

/// Place label used when the feed leaves `properties.place` empty or null.
pub const UNKNOWN_PLACE: &str = "Unknown location";

/// The attributes the map needs from one earthquake feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Quake {
    pub position: LatLng,
    /// Kilometres below sea level; negative above it.
    pub depth: f64,
    pub magnitude: f64,
    pub place: String,
}

impl Quake {
    /// Extracts the event from a feed feature.
    ///
    /// A missing or non-point geometry, or a point without a depth component,
    /// is a [`MapError::Render`]. A missing or non-numeric magnitude is
    /// [`MapError::MalformedData`]. A missing place falls back to
    /// [`UNKNOWN_PLACE`].
    pub fn from_feature(feature: &GeoJsonFeature) -> Result<Self> {
        let coordinates = match &feature.geometry {
            Some(GeoJsonGeometry::Point { coordinates }) => coordinates,
            Some(_) => {
                return Err(MapError::Render(
                    "earthquake feature is not a point".to_string(),
                ))
            }
            None => return Err(MapError::Render("feature has no geometry".to_string())),
        };

        let (position, depth) = match coordinates.as_slice() {
            [lng, lat, depth, ..] => (LatLng::new(*lat, *lng), *depth),
            _ => {
                return Err(MapError::Render(format!(
                    "point needs [lng, lat, depth], got {} coordinate(s)",
                    coordinates.len()
                )))
            }
        };

        let magnitude = feature
            .property("mag")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| MapError::MalformedData("missing numeric properties.mag".to_string()))?;

        let place = feature
            .property("place")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_PLACE)
            .to_string();

        Ok(Self {
            position,
            depth,
            magnitude,
            place,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn point(coordinates: Vec<f64>) -> GeoJsonFeature {
        GeoJsonFeature::new(GeoJsonGeometry::Point { coordinates })
    }

    #[test]
    fn test_extracts_attributes() {
        let feature = point(vec![142.3, 38.3, 29.0])
            .with_property("mag", 6.1)
            .with_property("place", "off the east coast of Honshu, Japan");

        let quake = Quake::from_feature(&feature).unwrap();
        assert_eq!(quake.position, LatLng::new(38.3, 142.3));
        assert_eq!(quake.depth, 29.0);
        assert_eq!(quake.magnitude, 6.1);
        assert_eq!(quake.place, "off the east coast of Honshu, Japan");
    }

    #[test]
    fn test_missing_depth_is_render_failure() {
        let err = Quake::from_feature(&point(vec![1.0, 2.0]).with_property("mag", 1.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RenderFailure);
    }

    #[test]
    fn test_missing_magnitude_is_malformed() {
        let err = Quake::from_feature(&point(vec![1.0, 2.0, 3.0])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData);

        let null_mag = point(vec![1.0, 2.0, 3.0]).with_property("mag", serde_json::Value::Null);
        assert!(Quake::from_feature(&null_mag).is_err());
    }

    #[test]
    fn test_missing_place_falls_back() {
        let quake = Quake::from_feature(&point(vec![1.0, 2.0, 3.0]).with_property("mag", 0.0)).unwrap();
        assert_eq!(quake.place, UNKNOWN_PLACE);
    }

    #[test]
    fn test_line_is_not_a_quake() {
        let feature = GeoJsonFeature::new(GeoJsonGeometry::LineString {
            coordinates: vec![vec![0.0, 0.0], vec![1.0, 1.0]],
        });
        assert_eq!(Quake::from_feature(&feature).unwrap_err().kind(), ErrorKind::RenderFailure);
    }
}
