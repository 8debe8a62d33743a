//! Countries explorer application layer
//!
//! Pages, view projections and the terminal session that sit on top of the
//! data source, the selection and the comparison panel. The
//! `countries-explorer` binary wires these together from configuration.

pub mod page;
pub mod presentation;
pub mod render;
pub mod session;

pub use page::{CountriesLoadedData, DetailPage, ListPage, ToggleError, ViewState};
pub use presentation::{ComparisonCard, DetailView, RowView};
pub use session::{spawn_panel_reporter, Command, CommandError, Outcome, Session};
