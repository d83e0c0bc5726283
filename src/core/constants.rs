//! Engine-wide constants: default view, feeds and marker encoding.
//! Keeping them in a single place makes it easier to tweak the magic numbers.

/// Default map center as `[lat, lng]`, a global view.
pub const DEFAULT_CENTER: [f64; 2] = [20.0, 0.0];

/// Default zoom level.
pub const DEFAULT_ZOOM: f64 = 2.0;

/// Marker radius per unit of magnitude.
pub const MAGNITUDE_SCALE_FACTOR: f64 = 4.0;

/// Radius used for magnitude-zero events so they stay visible.
pub const MIN_MARKER_RADIUS: f64 = 1.0;

/// Lowest depth printed in the legend. Shallower events (including negative
/// depths, above sea level) still fall into the first bin.
pub const LEGEND_DEPTH_FLOOR: f64 = -10.0;

/// USGS summary feed base; the file name selects the period.
pub const USGS_SUMMARY_FEED_BASE: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// PB2002 plate boundaries (Bird, 2003) as GeoJSON.
pub const TECTONIC_PLATES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

/// Stroke color for plate boundaries.
pub const PLATE_BOUNDARY_COLOR: &str = "#ff6500";

/// Stroke weight for plate boundaries.
pub const PLATE_BOUNDARY_WEIGHT: f64 = 2.0;

/// Default fetch timeout in milliseconds.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 30_000;

/// Layer names used by the default layer control.
pub const BASEMAP_LAYER_NAME: &str = "Basemap";
pub const STREET_LAYER_NAME: &str = "Street Map";
pub const EARTHQUAKES_LAYER_NAME: &str = "Earthquakes";
pub const TECTONIC_PLATES_LAYER_NAME: &str = "Tectonic Plates";
