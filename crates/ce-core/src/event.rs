//! Events published on the explorer's event bus

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const MATCH_ALL: &str = "*";

/// Payload of an event; fixes the event type it travels under
pub trait EventData: Clone + Send + Sync + 'static {
    fn event_type() -> &'static str;
}

/// Name of an event kind, such as `selection_changed`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventType(String);

impl EventType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wildcard that subscribes to every event
    pub fn match_all() -> Self {
        Self::new(MATCH_ALL)
    }

    pub fn is_match_all(&self) -> bool {
        self.0 == MATCH_ALL
    }
}

impl From<&str> for EventType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for EventType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An event with its type and firing time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event<T = serde_json::Value> {
    pub event_type: EventType,
    pub data: T,
    pub time_fired: DateTime<Utc>,
}

impl<T> Event<T> {
    /// Stamp `data` with the current time
    pub fn new(event_type: impl Into<EventType>, data: T) -> Self {
        Self {
            event_type: event_type.into(),
            data,
            time_fired: Utc::now(),
        }
    }
}

impl<T: EventData> Event<T> {
    pub fn typed(data: T) -> Self {
        Self::new(T::event_type(), data)
    }
}
