//! Core types for the countries explorer
//!
//! This crate provides the fundamental types used throughout the explorer:
//! the Country record as served by the REST Countries API, the URL-safe
//! name slug used for navigation, and the Event envelope carried by the
//! event bus.

mod country;
mod event;
mod slug;

pub use country::{Country, CountryName, Currency, Flags, Maps};
pub use event::{Event, EventData, EventType};
pub use slug::{decode_name, encode_name, SlugError};

/// Standard event types fired by the explorer
pub mod events {
    /// Event type for changes to the comparison selection
    pub const SELECTION_CHANGED: &str = "selection_changed";

    /// Event type for comparison panel state transitions
    pub const PANEL_STATE_CHANGED: &str = "panel_state_changed";

    /// Event type for a finished country list fetch
    pub const COUNTRIES_LOADED: &str = "countries_loaded";
}
