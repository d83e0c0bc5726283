use crate::layers::{base::LayerTrait, manager::LayerManager};
use crate::{ErrorKind, Result};
use serde::{Deserialize, Serialize};

/// Map corner a control is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A user interaction with the layer control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlAction {
    /// Radio button: make this the active base layer.
    SelectBase(String),
    /// Checkbox: flip an overlay's visibility.
    ToggleOverlay(String),
    /// Checkbox with an explicit target state.
    SetOverlay(String, bool),
}

/// One row of the control as a host would draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlEntry {
    Base {
        name: String,
        active: bool,
    },
    Overlay {
        name: String,
        checked: bool,
        feature_count: usize,
        /// Set when the backing dataset failed to load.
        unavailable: Option<ErrorKind>,
    },
}

/// The layer switcher: radio buttons for base layers, checkboxes for overlays.
///
/// The control holds no layer state of its own; it reads from and writes to
/// the [`LayerManager`] so the one-active-base invariant lives in one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerControl {
    pub position: Position,
    pub collapsed: bool,
}

impl Default for LayerControl {
    fn default() -> Self {
        Self {
            position: Position::TopRight,
            collapsed: true,
        }
    }
}

impl LayerControl {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Current rows: base layers first, then overlays, in registration order.
    pub fn entries(&self, layers: &LayerManager) -> Vec<ControlEntry> {
        let active = layers.active_base().map(|l| l.name().to_string());

        let bases = layers.base_layers().iter().map(|layer| ControlEntry::Base {
            name: layer.name().to_string(),
            active: active.as_deref() == Some(layer.name()),
        });

        let overlays = layers.overlays().iter().map(|group| ControlEntry::Overlay {
            name: group.name().to_string(),
            checked: group.is_visible(),
            feature_count: group.len(),
            unavailable: group.status().error_kind(),
        });

        bases.chain(overlays).collect()
    }

    /// Applies a user action. Unknown layer names are rejected and leave the
    /// state untouched.
    pub fn apply(&self, layers: &mut LayerManager, action: ControlAction) -> Result<()> {
        log::debug!("layer control action: {:?}", action);
        match action {
            ControlAction::SelectBase(name) => layers.select_base(&name),
            ControlAction::ToggleOverlay(name) => layers.toggle_overlay(&name).map(|_| ()),
            ControlAction::SetOverlay(name, visible) => layers.set_overlay_visible(&name, visible),
        }
    }
}
