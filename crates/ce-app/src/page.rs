//! List and detail pages
//!
//! A page owns its view state and talks to the injected [`CountrySource`].
//! A fetch failure replaces the whole view with [`ViewState::Failed`]; no
//! partial list is ever shown next to an error.

use ce_api::CountrySource;
use ce_comparison::ComparisonPanel;
use ce_config::CompareControl;
use ce_core::{decode_name, events, Country, EventData};
use ce_event_bus::EventBus;
use ce_selection::{filter_countries, SelectionChange, SELECTION_CAPACITY};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::presentation::{project_rows, ComparisonCard, DetailView, RowView};

/// Lifecycle of a page's data
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// Data for COUNTRIES_LOADED events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountriesLoadedData {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EventData for CountriesLoadedData {
    fn event_type() -> &'static str {
        events::COUNTRIES_LOADED
    }
}

/// Why a toggle from the list was refused
#[derive(Debug, Error, PartialEq)]
pub enum ToggleError {
    #[error("the country list is not loaded")]
    NotLoaded,

    #[error("no country named '{0}' in the list")]
    UnknownCountry(String),

    #[error("two countries are already selected; deselect one to compare {0}")]
    SelectionFull(String),
}

/// The searchable country table with its comparison panel
pub struct ListPage {
    source: Arc<dyn CountrySource>,
    panel: ComparisonPanel,
    event_bus: Arc<EventBus>,
    compare_control: CompareControl,
    query: String,
    countries: ViewState<Vec<Country>>,
}

impl ListPage {
    pub fn new(
        source: Arc<dyn CountrySource>,
        panel: ComparisonPanel,
        event_bus: Arc<EventBus>,
        compare_control: CompareControl,
    ) -> Self {
        Self {
            source,
            panel,
            event_bus,
            compare_control,
            query: String::new(),
            countries: ViewState::Loading,
        }
    }

    /// Fetch the country list, replacing the current view state
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> &ViewState<Vec<Country>> {
        self.countries = ViewState::Loading;
        self.countries = match self.source.list_countries().await {
            Ok(countries) => {
                info!(count = countries.len(), "Loaded countries");
                self.event_bus.fire_typed(CountriesLoadedData {
                    count: countries.len(),
                    error: None,
                });
                ViewState::Ready(countries)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load countries");
                self.event_bus.fire_typed(CountriesLoadedData {
                    count: 0,
                    error: Some(e.to_string()),
                });
                ViewState::Failed(e.to_string())
            }
        };
        &self.countries
    }

    pub fn state(&self) -> &ViewState<Vec<Country>> {
        &self.countries
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Set the search text; the selection is left alone
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        debug!(query = %self.query, "Search query changed");
    }

    /// Countries matching the current query, in list order
    pub fn visible(&self) -> Vec<&Country> {
        match &self.countries {
            ViewState::Ready(countries) => filter_countries(countries, &self.query),
            _ => Vec::new(),
        }
    }

    /// Table rows for the countries matching the current query
    ///
    /// While the panel is closing its selection is on the way out, so rows
    /// show nothing selected and every compare control enabled.
    pub fn rows(&self) -> Vec<RowView> {
        project_rows(&self.visible(), &self.active_selection())
    }

    /// Names the compare controls reflect: the selection of a shown panel
    fn active_selection(&self) -> Vec<String> {
        if self.panel.is_visible() {
            self.panel.selected_names()
        } else {
            Vec::new()
        }
    }

    /// Look up a loaded country by common name, ignoring case
    pub fn find(&self, name: &str) -> Option<&Country> {
        let lowered = name.to_lowercase();
        self.countries.ready()?.iter().find(|c| {
            c.common_name() == name || c.common_name().to_lowercase() == lowered
        })
    }

    /// Toggle a country's compare control
    ///
    /// With [`CompareControl::Disabled`] a greyed-out row refuses the click
    /// instead of replacing the second selection.
    pub fn toggle(&mut self, name: &str) -> Result<SelectionChange, ToggleError> {
        if self.countries.ready().is_none() {
            return Err(ToggleError::NotLoaded);
        }
        let country = self
            .find(name)
            .cloned()
            .ok_or_else(|| ToggleError::UnknownCountry(name.to_string()))?;

        let active = self.active_selection();
        let greyed_out = active.len() >= SELECTION_CAPACITY
            && !active.iter().any(|n| n == country.common_name());
        if greyed_out && self.compare_control == CompareControl::Disabled {
            return Err(ToggleError::SelectionFull(country.name.common));
        }

        Ok(self.panel.toggle(&country))
    }

    /// Close the comparison panel
    pub fn close_panel(&self) {
        self.panel.close();
    }

    /// Cards for the comparison panel, or None while it is not shown
    pub fn comparison(&self) -> Option<Vec<ComparisonCard>> {
        if !self.panel.is_visible() {
            return None;
        }
        Some(
            self.panel
                .selection()
                .iter()
                .map(ComparisonCard::project)
                .collect(),
        )
    }

    pub fn panel(&self) -> &ComparisonPanel {
        &self.panel
    }

    pub fn compare_control(&self) -> CompareControl {
        self.compare_control
    }
}

/// A single country's detail view
pub struct DetailPage {
    name: String,
    state: ViewState<DetailView>,
}

impl DetailPage {
    /// Open the detail view for a common name or its URL slug
    pub fn new(name_or_slug: &str) -> Self {
        let name = decode_name(name_or_slug).unwrap_or_else(|_| name_or_slug.to_string());
        Self {
            name,
            state: ViewState::Loading,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &ViewState<DetailView> {
        &self.state
    }

    /// Fetch the country and project it for display
    #[instrument(skip(self, source), fields(name = %self.name))]
    pub async fn load(&mut self, source: &dyn CountrySource) -> &ViewState<DetailView> {
        self.state = ViewState::Loading;
        self.state = match source.get_country(&self.name).await {
            Ok(country) => ViewState::Ready(DetailView::project(&country)),
            Err(e) => {
                warn!(error = %e, "Failed to load country");
                ViewState::Failed(e.to_string())
            }
        };
        &self.state
    }
}
