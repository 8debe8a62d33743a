//! Capacity-2 comparison selection

use ce_core::{events, Country, EventData};
use ce_event_bus::EventBus;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// Maximum number of countries that can be compared side by side
pub const SELECTION_CAPACITY: usize = 2;

/// What a toggle did to the selection
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionChange {
    /// The country was appended; `len` is the new size (1 or 2)
    Added { len: usize },
    /// The country was already selected and has been removed
    Removed { now_empty: bool },
    /// The selection was full; the second entry was replaced
    Replaced { previous: Country },
}

impl SelectionChange {
    /// Whether this change left the selection empty
    pub fn emptied(&self) -> bool {
        matches!(self, SelectionChange::Removed { now_empty: true })
    }
}

/// Kind of selection change carried by [`SelectionChangedData`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionAction {
    Added,
    Removed,
    Replaced,
    Cleared,
}

/// Data for SELECTION_CHANGED events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionChangedData {
    pub action: SelectionAction,
    /// Country that was toggled (None for a clear)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Country that was replaced, for `Replaced`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    /// Common names in the selection after the change
    pub selection: Vec<String>,
}

impl EventData for SelectionChangedData {
    fn event_type() -> &'static str {
        events::SELECTION_CHANGED
    }
}

/// Ordered selection of at most [`SELECTION_CAPACITY`] countries
///
/// Countries are matched by common name. When the selection is full, a
/// toggle of an unselected country replaces the second entry and keeps the
/// first: the most recent pick wins the free slot.
pub struct SelectionManager {
    selected: Vec<Country>,
    event_bus: Arc<EventBus>,
}

impl SelectionManager {
    /// Create an empty selection that reports changes on `event_bus`
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        Self {
            selected: Vec::with_capacity(SELECTION_CAPACITY),
            event_bus,
        }
    }

    /// Toggle a country in or out of the selection
    #[instrument(skip(self, country), fields(country = %country.name.common))]
    pub fn toggle(&mut self, country: &Country) -> SelectionChange {
        let change = if let Some(index) = self.position(country.common_name()) {
            self.selected.remove(index);
            SelectionChange::Removed {
                now_empty: self.selected.is_empty(),
            }
        } else if self.selected.len() < SELECTION_CAPACITY {
            self.selected.push(country.clone());
            SelectionChange::Added {
                len: self.selected.len(),
            }
        } else {
            let previous = std::mem::replace(&mut self.selected[1], country.clone());
            SelectionChange::Replaced { previous }
        };

        debug!(?change, len = self.selected.len(), "Toggled selection");

        let (action, previous) = match &change {
            SelectionChange::Added { .. } => (SelectionAction::Added, None),
            SelectionChange::Removed { .. } => (SelectionAction::Removed, None),
            SelectionChange::Replaced { previous } => {
                (SelectionAction::Replaced, Some(previous.name.common.clone()))
            }
        };
        self.publish(action, Some(country.name.common.clone()), previous);

        change
    }

    /// Report that `country` is leaving the selection without dropping it yet
    ///
    /// Fires a `Removed` event whose `selection` is empty. The record stays
    /// until [`SelectionManager::clear`], so a closing panel can keep showing
    /// it; the later clear then fires `Cleared` as usual.
    pub fn announce_removal(&self, country: &Country) {
        trace!(country = %country.name.common, "Announcing deferred removal");
        self.event_bus.fire_typed(SelectionChangedData {
            action: SelectionAction::Removed,
            country: Some(country.name.common.clone()),
            previous: None,
            selection: Vec::new(),
        });
    }

    /// Remove every country, returning what was selected
    pub fn clear(&mut self) -> Vec<Country> {
        let cleared = std::mem::take(&mut self.selected);
        if !cleared.is_empty() {
            trace!(count = cleared.len(), "Clearing selection");
            self.publish(SelectionAction::Cleared, None, None);
        }
        cleared
    }

    /// Check whether a country with this common name is selected
    pub fn contains(&self, common_name: &str) -> bool {
        self.position(common_name).is_some()
    }

    /// Selected countries in selection order
    pub fn countries(&self) -> &[Country] {
        &self.selected
    }

    /// Common names in selection order
    pub fn names(&self) -> Vec<String> {
        self.selected.iter().map(|c| c.name.common.clone()).collect()
    }

    /// Number of selected countries, at most [`SELECTION_CAPACITY`]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether no more countries can be appended without replacement
    pub fn is_full(&self) -> bool {
        self.selected.len() >= SELECTION_CAPACITY
    }

    fn position(&self, common_name: &str) -> Option<usize> {
        self.selected
            .iter()
            .position(|c| c.common_name() == common_name)
    }

    fn publish(&self, action: SelectionAction, country: Option<String>, previous: Option<String>) {
        self.event_bus.fire_typed(SelectionChangedData {
            action,
            country,
            previous,
            selection: self.names(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager() -> (Arc<EventBus>, SelectionManager) {
        let event_bus = Arc::new(EventBus::new());
        let manager = SelectionManager::new(event_bus.clone());
        (event_bus, manager)
    }

    fn country(name: &str) -> Country {
        Country::new(name, name)
    }

    #[test]
    fn test_toggle_in_and_out() {
        let (_, mut sm) = make_manager();
        let france = country("France");

        assert_eq!(sm.toggle(&france), SelectionChange::Added { len: 1 });
        assert_eq!(sm.names(), vec!["France"]);

        let change = sm.toggle(&france);
        assert_eq!(change, SelectionChange::Removed { now_empty: true });
        assert!(change.emptied());
        assert!(sm.is_empty());
    }

    #[test]
    fn test_third_pick_replaces_second() {
        let (_, mut sm) = make_manager();

        sm.toggle(&country("France"));
        assert_eq!(sm.toggle(&country("Germany")), SelectionChange::Added { len: 2 });
        assert!(sm.is_full());

        let change = sm.toggle(&country("Japan"));
        assert_eq!(
            change,
            SelectionChange::Replaced {
                previous: country("Germany")
            }
        );
        assert_eq!(sm.names(), vec!["France", "Japan"]);

        // Replacement keeps hitting the second slot
        sm.toggle(&country("Brazil"));
        assert_eq!(sm.names(), vec!["France", "Brazil"]);
    }

    #[test]
    fn test_remove_from_full_keeps_order() {
        let (_, mut sm) = make_manager();
        sm.toggle(&country("France"));
        sm.toggle(&country("Germany"));

        let change = sm.toggle(&country("France"));
        assert_eq!(change, SelectionChange::Removed { now_empty: false });
        assert!(!change.emptied());
        assert_eq!(sm.names(), vec!["Germany"]);

        // A new pick is appended after the survivor
        sm.toggle(&country("Japan"));
        assert_eq!(sm.names(), vec!["Germany", "Japan"]);
    }

    #[test]
    fn test_match_by_common_name() {
        let (_, mut sm) = make_manager();
        sm.toggle(&Country::new("Japan", "Japan").with_size(125_000_000, 377_930.0));

        // A different record for the same country still toggles it out
        let change = sm.toggle(&Country::new("Japan", "Japan"));
        assert_eq!(change, SelectionChange::Removed { now_empty: true });
    }

    #[test]
    fn test_clear() {
        let (_, mut sm) = make_manager();
        sm.toggle(&country("France"));
        sm.toggle(&country("Japan"));

        let cleared = sm.clear();
        assert_eq!(cleared.len(), 2);
        assert!(sm.is_empty());
        assert!(!sm.contains("France"));

        assert!(sm.clear().is_empty());
    }

    #[tokio::test]
    async fn test_selection_changed_events() {
        let (bus, mut sm) = make_manager();
        let mut rx = bus.subscribe_typed::<SelectionChangedData>();

        sm.toggle(&country("France"));
        sm.toggle(&country("Germany"));
        sm.toggle(&country("Japan"));
        sm.clear();

        let added = rx.recv().await.unwrap().data;
        assert_eq!(added.action, SelectionAction::Added);
        assert_eq!(added.selection, vec!["France"]);

        let added = rx.recv().await.unwrap().data;
        assert_eq!(added.selection, vec!["France", "Germany"]);

        let replaced = rx.recv().await.unwrap().data;
        assert_eq!(replaced.action, SelectionAction::Replaced);
        assert_eq!(replaced.country.as_deref(), Some("Japan"));
        assert_eq!(replaced.previous.as_deref(), Some("Germany"));
        assert_eq!(replaced.selection, vec!["France", "Japan"]);

        let cleared = rx.recv().await.unwrap().data;
        assert_eq!(cleared.action, SelectionAction::Cleared);
        assert!(cleared.selection.is_empty());
    }

    #[test]
    fn test_announce_removal_keeps_record() {
        let (bus, mut sm) = make_manager();
        let mut rx = bus.subscribe_typed::<SelectionChangedData>();
        let france = country("France");
        sm.toggle(&france);

        sm.announce_removal(&france);
        assert_eq!(sm.names(), vec!["France"]);

        rx.try_recv().unwrap();
        let removed = rx.try_recv().unwrap().data;
        assert_eq!(removed.action, SelectionAction::Removed);
        assert_eq!(removed.country.as_deref(), Some("France"));
        assert!(removed.selection.is_empty());
    }
}
