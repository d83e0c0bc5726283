use crate::data::quake::Quake;
use serde::{Deserialize, Serialize};

/// Display content bound to a primitive, shown when the user clicks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    pub content: String,
}

impl Popup {
    pub fn new(content: String) -> Self {
        Self { content }
    }

    /// Popup for an earthquake marker: place heading, magnitude and depth.
    pub fn for_quake(quake: &Quake) -> Self {
        Self::new(format!(
            "<h3>{}</h3><hr><p>Magnitude: {}</p><p>Depth: {} km</p>",
            escape_html(&quake.place),
            quake.magnitude,
            quake.depth
        ))
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    fn quake(place: &str, magnitude: f64, depth: f64) -> Quake {
        Quake {
            position: LatLng::new(0.0, 0.0),
            depth,
            magnitude,
            place: place.to_string(),
        }
    }

    #[test]
    fn test_quake_popup_content() {
        let popup = Popup::for_quake(&quake("5 km N of Ridgecrest, CA", 4.5, 10.25));
        assert_eq!(
            popup.content,
            "<h3>5 km N of Ridgecrest, CA</h3><hr><p>Magnitude: 4.5</p><p>Depth: 10.25 km</p>"
        );
    }

    #[test]
    fn test_integral_values_print_without_fraction() {
        let popup = Popup::for_quake(&quake("Fiji region", 5.0, -5.0));
        assert!(popup.content.contains("Magnitude: 5<"));
        assert!(popup.content.contains("Depth: -5 km"));
    }

    #[test]
    fn test_place_is_escaped() {
        let popup = Popup::for_quake(&quake("<script>alert(1)</script> & co", 1.0, 1.0));
        assert!(popup.content.starts_with("<h3>&lt;script&gt;alert(1)&lt;/script&gt; &amp; co</h3>"));
    }
}
