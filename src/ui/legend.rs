//! Depth legend derived from the shared color scale.

use crate::core::constants::LEGEND_DEPTH_FLOOR;
use crate::style::scale::{Color, DepthScale};
use crate::ui::controls::Position;
use serde::{Deserialize, Serialize};

/// One swatch of the legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub lower_bound: f64,
    /// `None` for the open-ended last bin.
    pub upper_bound: Option<f64>,
    pub color: Color,
}

impl LegendEntry {
    /// `"lower–upper"`, or `"lower+"` when open-ended.
    pub fn label(&self) -> String {
        self.range_label("\u{2013}")
    }

    /// The range text with `separator` between the bounds.
    pub fn range_label(&self, separator: &str) -> String {
        match self.upper_bound {
            Some(upper) => format!("{}{}{}", self.lower_bound, separator, upper),
            None => format!("{}+", self.lower_bound),
        }
    }
}

/// A static key mapping color swatches to depth ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub title: String,
    pub position: Position,
    pub entries: Vec<LegendEntry>,
}

/// Builds the depth legend from `scale`, one entry per bin.
///
/// The lowest bin has no threshold in the scale; it is labelled from
/// [`LEGEND_DEPTH_FLOOR`] even though shallower depths also map to it.
pub fn build_legend(scale: &DepthScale) -> Legend {
    let entries = scale
        .bins()
        .iter()
        .enumerate()
        .map(|(i, bin)| LegendEntry {
            lower_bound: bin.threshold.unwrap_or(LEGEND_DEPTH_FLOOR),
            upper_bound: scale.upper_bound(i),
            color: bin.color,
        })
        .collect();

    Legend {
        title: "Depth (km)".to_string(),
        position: Position::BottomRight,
        entries,
    }
}

impl Legend {
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Markup for an `info legend` control block.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<div class=\"info legend\">");
        for entry in &self.entries {
            html.push_str(&format!(
                "<i style=\"background: {}\"></i> {}<br>",
                entry.color,
                entry.range_label("&ndash;")
            ));
        }
        html.push_str("</div>");
        html
    }
}
