use crate::core::geo::{LatLng, LatLngBounds};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A GeoJSON position: `[lng, lat]` or `[lng, lat, altitude]`.
///
/// Earthquake feeds put depth in km in the third slot.
pub type Position = Vec<f64>;

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: Position,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<HashMap<String, serde_json::Value>>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
}

impl GeoJson {
    /// Parses a GeoJSON document. Anything that is not a `Feature` or a
    /// `FeatureCollection` is rejected as malformed.
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| MapError::MalformedData(format!("Invalid GeoJSON: {}", e)))
    }

    /// Parses raw bytes, as returned by an HTTP body.
    pub fn parse_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| MapError::MalformedData(format!("Invalid GeoJSON: {}", e)))
    }

    /// Flattens the document into its features.
    pub fn into_features(self) -> Vec<GeoJsonFeature> {
        match self {
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::FeatureCollection { features } => features,
        }
    }
}

impl GeoJsonFeature {
    pub fn new(geometry: GeoJsonGeometry) -> Self {
        Self {
            id: None,
            geometry: Some(geometry),
            properties: None,
        }
    }

    pub fn with_property<V: Into<serde_json::Value>>(mut self, key: &str, value: V) -> Self {
        self.properties
            .get_or_insert_with(HashMap::new)
            .insert(key.to_string(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.as_ref()?.get(key)
    }

    /// Bounds of the feature geometry, if it has any coordinates.
    pub fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(&self.geometry.as_ref()?.to_lat_lng_points())
    }
}

impl GeoJsonGeometry {
    pub fn is_point(&self) -> bool {
        matches!(self, GeoJsonGeometry::Point { .. })
    }

    /// Converts coordinates to LatLng points, skipping malformed positions.
    pub fn to_lat_lng_points(&self) -> Vec<LatLng> {
        self.lines().into_iter().flatten().collect()
    }

    /// Coordinate runs of the geometry: one per line or ring, one
    /// single-point run per point. Positions with fewer than two components
    /// are dropped.
    pub fn lines(&self) -> Vec<Vec<LatLng>> {
        fn run(positions: &[Position]) -> Vec<LatLng> {
            positions
                .iter()
                .filter_map(|p| LatLng::from_position(p))
                .collect()
        }

        match self {
            GeoJsonGeometry::Point { coordinates } => {
                LatLng::from_position(coordinates).map(|p| vec![vec![p]]).unwrap_or_default()
            }
            GeoJsonGeometry::LineString { coordinates } => vec![run(coordinates)],
            GeoJsonGeometry::Polygon { coordinates } => {
                coordinates.iter().map(|ring| run(ring)).collect()
            }
            GeoJsonGeometry::MultiPoint { coordinates } => coordinates
                .iter()
                .filter_map(|p| LatLng::from_position(p))
                .map(|p| vec![p])
                .collect(),
            GeoJsonGeometry::MultiLineString { coordinates } => {
                coordinates.iter().map(|line| run(line)).collect()
            }
            GeoJsonGeometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .flat_map(|polygon| polygon.iter().map(|ring| run(ring)))
                .collect(),
            GeoJsonGeometry::GeometryCollection { geometries } => {
                geometries.iter().flat_map(|g| g.lines()).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geojson_parsing() {
        let geojson_str = r#"
        {
            "type": "FeatureCollection",
            "metadata": {"count": 1},
            "features": [
                {
                    "type": "Feature",
                    "properties": {"mag": 2.1, "place": "10 km SW of Somewhere"},
                    "geometry": {
                        "type": "Point",
                        "coordinates": [-117.5, 35.7, 8.4]
                    },
                    "id": "ci12345"
                }
            ]
        }
        "#;

        let features = GeoJson::parse(geojson_str).unwrap().into_features();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].property("mag"), Some(&serde_json::json!(2.1)));
        assert_eq!(
            features[0].geometry,
            Some(GeoJsonGeometry::Point {
                coordinates: vec![-117.5, 35.7, 8.4]
            })
        );
    }

    #[test]
    fn test_rejects_non_geojson() {
        let err = GeoJson::parse(r#"{"type": "Topology", "objects": {}}"#).unwrap_err();
        assert!(matches!(err, MapError::MalformedData(_)));

        let err = GeoJson::parse_slice(b"<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, MapError::MalformedData(_)));
    }

    #[test]
    fn test_null_geometry_and_properties() {
        let features = GeoJson::parse(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":null,"properties":null}
            ]}"#,
        )
        .unwrap()
        .into_features();

        assert!(features[0].geometry.is_none());
        assert!(features[0].property("place").is_none());
        assert!(features[0].bounds().is_none());
    }

    #[test]
    fn test_point_geometry() {
        let geometry = GeoJsonGeometry::Point {
            coordinates: vec![-74.0060, 40.7128],
        };

        let points = geometry.to_lat_lng_points();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0], LatLng::new(40.7128, -74.0060));
    }

    #[test]
    fn test_multi_line_runs() {
        let geometry = GeoJsonGeometry::MultiLineString {
            coordinates: vec![
                vec![vec![0.0, 0.0], vec![1.0, 1.0]],
                vec![vec![2.0, 2.0], vec![3.0], vec![4.0, 5.0]],
            ],
        };

        let lines = geometry.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], vec![LatLng::new(2.0, 2.0), LatLng::new(5.0, 4.0)]);
    }

    #[test]
    fn test_bounds_calculation() {
        let feature = GeoJsonFeature::new(GeoJsonGeometry::LineString {
            coordinates: vec![vec![-74.0060, 40.7128], vec![-73.9857, 40.7489]],
        });

        let bounds = feature.bounds().unwrap();
        assert_eq!(bounds.south_west.lat, 40.7128);
        assert_eq!(bounds.north_east.lat, 40.7489);
    }
}
