//! Comparison panel state machine
//!
//! ```text
//! Hidden → Visible → Closing → Hidden
//!             ↑         │
//!             └─────────┘ (new selection before the delayed clear)
//! ```

use ce_core::{events, EventData};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Visibility state of the comparison panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    /// Nothing selected, panel collapsed
    Hidden,
    /// Panel shown with the current selection
    Visible,
    /// Panel fading out; the selection is still held until the delayed clear
    Closing,
}

/// Error when an invalid panel transition is attempted
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid panel transition from {from} to {to}")]
pub struct InvalidTransition {
    pub from: PanelState,
    pub to: PanelState,
}

impl PanelState {
    /// Attempt a transition to a new state
    pub fn try_transition(self, to: PanelState) -> Result<PanelState, InvalidTransition> {
        use PanelState::*;

        let valid = matches!(
            (self, to),
            (Hidden, Visible) | (Visible, Closing) | (Closing, Hidden) | (Closing, Visible)
        );

        if valid {
            Ok(to)
        } else {
            Err(InvalidTransition { from: self, to })
        }
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition_to(self, to: PanelState) -> bool {
        self.try_transition(to).is_ok()
    }

    /// Whether the panel is shown
    ///
    /// Only `Visible` counts; a `Closing` panel is already fading out even
    /// though the selection still holds data.
    pub fn is_visible(self) -> bool {
        self == PanelState::Visible
    }
}

impl fmt::Display for PanelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PanelState::Hidden => "hidden",
            PanelState::Visible => "visible",
            PanelState::Closing => "closing",
        };
        f.write_str(name)
    }
}

/// Data for PANEL_STATE_CHANGED events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelStateChangedData {
    pub old_state: PanelState,
    pub new_state: PanelState,
    /// Close episode the transition belongs to
    pub generation: u64,
}

impl EventData for PanelStateChangedData {
    fn event_type() -> &'static str {
        events::PANEL_STATE_CHANGED
    }
}
