//! Visual encoding of earthquake attributes.

pub mod encoder;
pub mod scale;
