#[macro_use]
pub mod macros;

pub mod base;
pub mod group;
pub mod manager;
pub mod marker;
pub mod tile;
pub mod vector;
