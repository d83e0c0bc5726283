use crate::{
    core::{
        constants::{PLATE_BOUNDARY_COLOR, PLATE_BOUNDARY_WEIGHT},
        geo::{LatLng, LatLngBounds},
    },
    data::geojson::GeoJsonGeometry,
    layers::base::{LayerProperties, LayerTrait, LayerType},
    style::scale::Color,
    MapError, Result,
};
use geo_types::{LineString, MultiLineString};
use serde::{Deserialize, Serialize};

/// Style for line and polygon outlines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub weight: f64,
    /// Opacity (0.0 to 1.0)
    pub opacity: f64,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(0x33, 0x88, 0xff),
            weight: 3.0,
            opacity: 1.0,
        }
    }
}

impl PathStyle {
    /// Orange outline used for tectonic plate boundaries.
    pub fn plate_boundary() -> Self {
        Self {
            color: PLATE_BOUNDARY_COLOR.parse().unwrap_or(Color::rgb(0xff, 0x65, 0x00)),
            weight: PLATE_BOUNDARY_WEIGHT,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    Line,
    Polygon,
}

/// A styled polyline or polygon outline built from a GeoJSON geometry.
///
/// Rings and line parts are kept as separate runs; polygons are drawn as
/// closed outlines without fill.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    properties: LayerProperties,
    kind: PathKind,
    geometry: MultiLineString<f64>,
    style: PathStyle,
}

impl PathPrimitive {
    /// Builds a path from a line or polygon geometry. Point geometries and
    /// geometries with no usable coordinates are rejected.
    pub fn from_geometry(id: String, geometry: &GeoJsonGeometry, style: PathStyle) -> Result<Self> {
        let kind = match geometry {
            GeoJsonGeometry::LineString { .. } | GeoJsonGeometry::MultiLineString { .. } => {
                PathKind::Line
            }
            GeoJsonGeometry::Polygon { .. } | GeoJsonGeometry::MultiPolygon { .. } => {
                PathKind::Polygon
            }
            GeoJsonGeometry::GeometryCollection { geometries }
                if !geometries.iter().any(|g| {
                    matches!(
                        g,
                        GeoJsonGeometry::Point { .. } | GeoJsonGeometry::MultiPoint { .. }
                    )
                }) =>
            {
                PathKind::Line
            }
            _ => {
                return Err(MapError::Render(format!(
                    "feature {} is not a line or polygon",
                    id
                )))
            }
        };

        let lines: Vec<LineString<f64>> = geometry
            .lines()
            .into_iter()
            .filter(|run| run.len() >= 2)
            .map(|run| run.into_iter().map(geo_types::Coord::<f64>::from).collect())
            .collect();

        if lines.is_empty() {
            return Err(MapError::Render(format!(
                "feature {} has no drawable coordinates",
                id
            )));
        }

        let mut properties = LayerProperties::new(id, "Path".to_string(), LayerType::Path);
        properties.opacity = style.opacity as f32;

        Ok(Self {
            properties,
            kind,
            geometry: MultiLineString::new(lines),
            style,
        })
    }

    pub fn kind(&self) -> PathKind {
        self.kind
    }

    pub fn style(&self) -> &PathStyle {
        &self.style
    }

    pub fn geometry(&self) -> &MultiLineString<f64> {
        &self.geometry
    }

    /// Coordinates of each run as `LatLng`s.
    pub fn runs(&self) -> Vec<Vec<LatLng>> {
        self.geometry
            .0
            .iter()
            .map(|line| line.coords().map(|c| LatLng::from(*c)).collect())
            .collect()
    }
}

impl LayerTrait for PathPrimitive {
    crate::impl_layer_trait!(properties);

    fn options(&self) -> serde_json::Value {
        let mut json = self.properties.to_json();
        json["kind"] = serde_json::json!(self.kind);
        json["style"] = serde_json::json!(self.style);
        json["runs"] = serde_json::json!(self
            .runs()
            .iter()
            .map(|run| run.iter().map(|p| [p.lng, p.lat]).collect::<Vec<_>>())
            .collect::<Vec<_>>());
        json
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        let points: Vec<LatLng> = self.runs().into_iter().flatten().collect();
        LatLngBounds::from_points(&points)
    }
}
