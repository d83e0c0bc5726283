//! The depth color scale shared by the marker encoder and the legend.
//!
//! Both consumers read [`DEPTH_SCALE`]; neither re-encodes thresholds or colors.

use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque `#rrggbb` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.is_ascii())
            .ok_or_else(|| MapError::Config(format!("invalid color '{}', expected #rrggbb", s)))?;

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| MapError::Config(format!("invalid color '{}'", s)))
        };

        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = MapError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

/// One bin of the scale: every depth strictly greater than `threshold` (and
/// not claimed by a higher bin) gets `color`. The lowest bin has no threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthBin {
    pub threshold: Option<f64>,
    pub color: Color,
}

/// Ordered table of depth bins, lowest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthScale {
    bins: &'static [DepthBin],
}

/// Depth (km) to color scale used for earthquake markers and the legend.
pub const DEPTH_SCALE: DepthScale = DepthScale {
    bins: &[
        DepthBin { threshold: None, color: Color::rgb(0x00, 0xff, 0xff) },
        DepthBin { threshold: Some(10.0), color: Color::rgb(0x00, 0xff, 0x00) },
        DepthBin { threshold: Some(30.0), color: Color::rgb(0x80, 0xff, 0x00) },
        DepthBin { threshold: Some(50.0), color: Color::rgb(0xff, 0xff, 0x00) },
        DepthBin { threshold: Some(70.0), color: Color::rgb(0xff, 0x80, 0x00) },
        DepthBin { threshold: Some(90.0), color: Color::rgb(0xff, 0x00, 0x00) },
    ],
};

impl DepthScale {
    pub fn bins(&self) -> &'static [DepthBin] {
        self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Index of the bin a depth falls into.
    ///
    /// Thresholds are checked from the highest down with a strict `>`; the
    /// first match wins and anything left over lands in bin 0. NaN compares
    /// false everywhere, so it also lands in bin 0.
    pub fn bin_index(&self, depth: f64) -> usize {
        self.bins
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, bin)| match bin.threshold {
                Some(threshold) if depth > threshold => Some(i),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn color_for(&self, depth: f64) -> Color {
        self.bins[self.bin_index(depth)].color
    }

    /// Upper bound of bin `index`: the next bin's threshold, `None` for the last.
    pub fn upper_bound(&self, index: usize) -> Option<f64> {
        self.bins.get(index + 1).and_then(|bin| bin.threshold)
    }
}
