//! Search filter and comparison selection for the countries explorer
//!
//! This crate provides the two pieces of list logic that sit between the
//! fetched country list and the comparison panel:
//!
//! - [`filter_countries`], the case-insensitive name filter
//! - [`SelectionManager`], the ordered capacity-2 selection with its
//!   remove / append / replace-second toggle policy

mod filter;
mod manager;

pub use filter::{filter_countries, matches_query};
pub use manager::{
    SelectionAction, SelectionChange, SelectionChangedData, SelectionManager, SELECTION_CAPACITY,
};
