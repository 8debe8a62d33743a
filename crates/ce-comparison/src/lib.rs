//! Comparison panel for the countries explorer
//!
//! The panel shows up to two selected countries side by side. Its
//! visibility follows the selection, and closing it clears the selection
//! only after a delay so the content can fade out with the panel.
//! A generation counter makes sure a clear scheduled for an earlier close
//! never wipes a selection made after it.

mod panel;
mod state;

pub use panel::{ComparisonPanel, DEFAULT_CLOSE_DELAY};
pub use state::{InvalidTransition, PanelState, PanelStateChangedData};
