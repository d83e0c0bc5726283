pub mod geojson;
pub mod quake;
