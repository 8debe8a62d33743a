//! Comparison panel controller
//!
//! Couples the selection to the panel's visibility. Closing the panel hides
//! it right away but keeps the selected countries until a delayed clear
//! runs, so the panel can fade out with its content still in place.

use crate::state::{PanelState, PanelStateChangedData};
use ce_core::Country;
use ce_event_bus::EventBus;
use ce_selection::{SelectionChange, SelectionManager};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace, warn};

/// Delay between closing the panel and clearing its selection
pub const DEFAULT_CLOSE_DELAY: Duration = Duration::from_millis(300);

struct PanelInner {
    state: PanelState,
    selection: SelectionManager,
    /// Bumped on every close and every reopen; a delayed clear only runs if
    /// the generation it was scheduled with is still current
    generation: u64,
    pending_clear: Option<JoinHandle<()>>,
}

impl PanelInner {
    fn cancel_pending_clear(&mut self) {
        if let Some(handle) = self.pending_clear.take() {
            trace!(generation = self.generation, "Cancelling pending clear");
            handle.abort();
        }
    }

    fn transition(&mut self, to: PanelState, event_bus: &EventBus) {
        match self.state.try_transition(to) {
            Ok(new_state) => {
                let old_state = std::mem::replace(&mut self.state, new_state);
                debug!(%old_state, %new_state, generation = self.generation, "Panel transition");
                event_bus.fire_typed(PanelStateChangedData {
                    old_state,
                    new_state,
                    generation: self.generation,
                });
            }
            Err(e) => warn!(error = %e, "Ignoring panel transition"),
        }
    }

    fn finish_close(&mut self, event_bus: &EventBus) {
        self.pending_clear = None;
        self.selection.clear();
        self.transition(PanelState::Hidden, event_bus);
    }
}

/// Controller for the side-by-side comparison panel
///
/// All selection changes go through [`ComparisonPanel::toggle`] so the
/// panel can open when the first country is picked and close when the last
/// one is removed. Cloning yields another handle to the same panel.
#[derive(Clone)]
pub struct ComparisonPanel {
    inner: Arc<Mutex<PanelInner>>,
    event_bus: Arc<EventBus>,
    close_delay: Duration,
}

impl ComparisonPanel {
    /// Create a hidden panel with an empty selection
    ///
    /// A zero `close_delay` clears the selection as soon as the panel closes.
    pub fn new(event_bus: Arc<EventBus>, close_delay: Duration) -> Self {
        let inner = PanelInner {
            state: PanelState::Hidden,
            selection: SelectionManager::new(event_bus.clone()),
            generation: 0,
            pending_clear: None,
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
            event_bus,
            close_delay,
        }
    }

    /// Toggle a country in or out of the comparison
    ///
    /// While the panel is closing, a toggle cancels the pending clear and
    /// starts a fresh selection with just this country. Removing the last
    /// selected country closes the panel; with a non-zero delay the country
    /// stays in the selection until the delayed clear.
    #[instrument(skip(self, country), fields(country = %country.name.common))]
    pub fn toggle(&self, country: &Country) -> SelectionChange {
        let mut inner = self.lock();

        if inner.state == PanelState::Closing {
            inner.cancel_pending_clear();
            inner.generation += 1;
            inner.selection.clear();
        }

        let removes_last = inner.selection.len() == 1
            && inner.selection.contains(country.common_name());
        if removes_last && !self.close_delay.is_zero() {
            inner.selection.announce_removal(country);
            self.begin_close(&mut inner);
            return SelectionChange::Removed { now_empty: true };
        }

        let change = inner.selection.toggle(country);

        if change.emptied() {
            self.begin_close(&mut inner);
        } else if !inner.selection.is_empty() && inner.state != PanelState::Visible {
            inner.transition(PanelState::Visible, &self.event_bus);
        }

        change
    }

    /// Close the panel, as the panel's close control does
    ///
    /// No-op unless the panel is visible.
    pub fn close(&self) {
        let mut inner = self.lock();
        if inner.state == PanelState::Visible {
            self.begin_close(&mut inner);
        } else {
            trace!(state = %inner.state, "Close ignored");
        }
    }

    /// Current panel state
    pub fn state(&self) -> PanelState {
        self.lock().state
    }

    /// Whether the panel is shown
    pub fn is_visible(&self) -> bool {
        self.state().is_visible()
    }

    /// Snapshot of the selected countries, in selection order
    pub fn selection(&self) -> Vec<Country> {
        self.lock().selection.countries().to_vec()
    }

    /// Common names of the selected countries
    pub fn selected_names(&self) -> Vec<String> {
        self.lock().selection.names()
    }

    /// Check whether a country is in the selection
    pub fn contains(&self, common_name: &str) -> bool {
        self.lock().selection.contains(common_name)
    }

    /// Whether the selection is at capacity
    pub fn is_full(&self) -> bool {
        self.lock().selection.is_full()
    }

    /// Current close episode
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Whether a delayed clear is scheduled
    pub fn has_pending_clear(&self) -> bool {
        self.lock().pending_clear.is_some()
    }

    /// Configured delay between close and clear
    pub fn close_delay(&self) -> Duration {
        self.close_delay
    }

    fn lock(&self) -> MutexGuard<'_, PanelInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_close(&self, inner: &mut PanelInner) {
        inner.cancel_pending_clear();
        inner.generation += 1;
        inner.transition(PanelState::Closing, &self.event_bus);

        if self.close_delay.is_zero() {
            inner.finish_close(&self.event_bus);
            return;
        }

        let Ok(runtime) = Handle::try_current() else {
            warn!("No async runtime for the delayed clear, clearing now");
            inner.finish_close(&self.event_bus);
            return;
        };

        // Deadline is fixed now, not when the task first runs
        let deadline = tokio::time::Instant::now() + self.close_delay;
        let generation = inner.generation;
        let shared = Arc::clone(&self.inner);
        let event_bus = Arc::clone(&self.event_bus);

        debug!(generation, delay = ?self.close_delay, "Scheduling delayed clear");
        inner.pending_clear = Some(runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;

            let mut inner = shared.lock().unwrap_or_else(PoisonError::into_inner);
            if inner.generation != generation || inner.state != PanelState::Closing {
                trace!(
                    scheduled = generation,
                    current = inner.generation,
                    "Skipping stale delayed clear"
                );
                return;
            }
            inner.finish_close(&event_bus);
        }));
    }
}
