use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a coordinate from a GeoJSON position (`[lng, lat, ...]`).
    /// Returns `None` when fewer than two components are present.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lng, lat, ..] => Some(Self::new(*lat, *lng)),
            _ => None,
        }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<LatLng> for geo_types::Coord<f64> {
    fn from(value: LatLng) -> Self {
        geo_types::coord! { x: value.lng, y: value.lat }
    }
}

impl From<geo_types::Coord<f64>> for LatLng {
    fn from(value: geo_types::Coord<f64>) -> Self {
        LatLng::new(value.y, value.x)
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Smallest bounds containing every point, or `None` for an empty slice.
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self::new(*first, *first);
        for point in rest {
            bounds.extend(point);
        }
        Some(bounds)
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Returns the union of this bounds with another bounds
    pub fn union(&self, other: &LatLngBounds) -> LatLngBounds {
        let south = self.south_west.lat.min(other.south_west.lat);
        let west = self.south_west.lng.min(other.south_west.lng);
        let north = self.north_east.lat.max(other.north_east.lat);
        let east = self.north_east.lng.max(other.north_east.lng);

        LatLngBounds::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// Folds optional bounds together, skipping `None`s.
    pub fn merge(acc: Option<LatLngBounds>, next: Option<LatLngBounds>) -> Option<LatLngBounds> {
        match (acc, next) {
            (Some(a), Some(b)) => Some(a.union(&b)),
            (a, None) => a,
            (None, b) => b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(40.7128, -74.0060);
        assert_eq!(coord.lat, 40.7128);
        assert_eq!(coord.lng, -74.0060);
        assert!(coord.is_valid());
    }

    #[test]
    fn test_from_position_swaps_axis_order() {
        let coord = LatLng::from_position(&[-122.5, 38.1, 12.0]).unwrap();
        assert_eq!(coord, LatLng::new(38.1, -122.5));
        assert!(LatLng::from_position(&[1.0]).is_none());
    }

    #[test]
    fn test_bounds_from_points() {
        let bounds = LatLngBounds::from_points(&[
            LatLng::new(10.0, 20.0),
            LatLng::new(-5.0, 40.0),
            LatLng::new(3.0, -1.0),
        ])
        .unwrap();

        assert_eq!(bounds.south_west, LatLng::new(-5.0, -1.0));
        assert_eq!(bounds.north_east, LatLng::new(10.0, 40.0));
        assert!(bounds.contains(&LatLng::new(0.0, 0.0)));
        assert!(LatLngBounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_merge_skips_missing() {
        let a = LatLngBounds::new(LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0));
        let b = LatLngBounds::new(LatLng::new(-1.0, 2.0), LatLng::new(0.5, 3.0));

        assert_eq!(LatLngBounds::merge(None, Some(a.clone())), Some(a.clone()));
        let merged = LatLngBounds::merge(Some(a), Some(b)).unwrap();
        assert_eq!(merged.south_west, LatLng::new(-1.0, 0.0));
        assert_eq!(merged.north_east, LatLng::new(1.0, 3.0));
    }
}
