//! Map-widget facing artifacts: popups, the legend and the layer control.

pub mod controls;
pub mod legend;
pub mod popup;

pub use controls::{ControlAction, ControlEntry, LayerControl, Position};
pub use legend::{build_legend, Legend, LegendEntry};
pub use popup::Popup;
