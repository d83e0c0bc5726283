//! Pure functions mapping earthquake attributes to marker styles.

use crate::core::constants::{MAGNITUDE_SCALE_FACTOR, MIN_MARKER_RADIUS};
use crate::style::scale::{Color, DEPTH_SCALE};
use serde::{Deserialize, Serialize};

/// Style information for a circle marker, fixed at render time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleSpec {
    /// Marker fill, chosen by depth
    pub fill_color: Color,
    /// Stroke color
    pub color: Color,
    /// Marker radius in pixels, chosen by magnitude
    pub radius: f64,
    /// Stroke opacity (0.0 to 1.0)
    pub opacity: f64,
    /// Fill opacity (0.0 to 1.0)
    pub fill_opacity: f64,
    /// Whether the outline is drawn
    pub stroke: bool,
    /// Stroke width in pixels
    pub weight: f64,
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self {
            fill_color: DEPTH_SCALE.color_for(0.0),
            color: Color::BLACK,
            radius: MIN_MARKER_RADIUS,
            opacity: 1.0,
            fill_opacity: 0.8,
            stroke: true,
            weight: 0.5,
        }
    }
}

/// Color for an event at `depth` km below sea level.
pub fn color_for_depth(depth: f64) -> Color {
    DEPTH_SCALE.color_for(depth)
}

/// Marker radius for a magnitude.
///
/// Exactly zero yields [`MIN_MARKER_RADIUS`]; everything else is scaled
/// linearly. Negative magnitudes pass through unclamped and NaN propagates.
pub fn radius_for_magnitude(magnitude: f64) -> f64 {
    if magnitude == 0.0 {
        MIN_MARKER_RADIUS
    } else {
        magnitude * MAGNITUDE_SCALE_FACTOR
    }
}

/// Full marker style for an event.
pub fn style_for_quake(depth: f64, magnitude: f64) -> StyleSpec {
    StyleSpec {
        fill_color: color_for_depth(depth),
        radius: radius_for_magnitude(magnitude),
        ..StyleSpec::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(depth: f64) -> String {
        color_for_depth(depth).to_hex()
    }

    #[test]
    fn test_color_bins() {
        assert_eq!(hex(-5.0), "#00ffff");
        assert_eq!(hex(5.0), "#00ffff");
        assert_eq!(hex(20.0), "#00ff00");
        assert_eq!(hex(40.0), "#80ff00");
        assert_eq!(hex(60.0), "#ffff00");
        assert_eq!(hex(80.0), "#ff8000");
        assert_eq!(hex(95.0), "#ff0000");
    }

    #[test]
    fn test_boundary_is_inclusive_on_lower_bin() {
        assert_eq!(color_for_depth(10.0), color_for_depth(9.999));
        assert_eq!(hex(10.0), "#00ffff");
        for (boundary, below) in [(30.0, "#00ff00"), (50.0, "#80ff00"), (70.0, "#ffff00"), (90.0, "#ff8000")] {
            assert_eq!(hex(boundary), below, "depth {}", boundary);
        }
    }

    #[test]
    fn test_every_depth_gets_one_of_six_colors() {
        let palette: Vec<Color> = DEPTH_SCALE.bins().iter().map(|b| b.color).collect();
        let mut depth = -50.0;
        while depth <= 200.0 {
            let color = color_for_depth(depth);
            assert_eq!(palette.iter().filter(|c| **c == color).count(), 1);
            depth += 0.25;
        }
    }

    #[test]
    fn test_colors_monotonic_across_bins() {
        let samples = [0.0, 10.5, 30.5, 50.5, 70.5, 90.5];
        let indices: Vec<usize> = samples.iter().map(|d| DEPTH_SCALE.bin_index(*d)).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_radius_for_magnitude() {
        assert_eq!(radius_for_magnitude(0.0), 1.0);
        assert_eq!(radius_for_magnitude(2.0), 8.0);
        assert_eq!(radius_for_magnitude(5.0), 20.0);
        assert!(radius_for_magnitude(f64::NAN).is_nan());
    }

    #[test]
    fn test_negative_magnitude_passes_through() {
        // Known edge case: small negative magnitudes from the feed are not clamped.
        assert_eq!(radius_for_magnitude(-1.0), -4.0);
    }

    #[test]
    fn test_style_for_quake() {
        let style = style_for_quake(95.0, 5.0);
        assert_eq!(style.fill_color.to_hex(), "#ff0000");
        assert_eq!(style.radius, 20.0);
        assert_eq!(style.color, Color::BLACK);
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.fill_opacity, 0.8);
        assert!(style.stroke);
        assert_eq!(style.weight, 0.5);
    }
}
