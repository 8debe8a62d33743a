//! Country data sources
//!
//! The explorer depends only on the [`CountrySource`] trait. Two
//! implementations are provided:
//!
//! - [`RestCountriesClient`] talks to the REST Countries API over HTTP
//! - [`MemorySource`] serves a fixed list, for tests and demos

mod error;
mod rest;
mod source;

pub use error::{ErrorKind, SourceError, SourceResult};
pub use rest::RestCountriesClient;
pub use source::{CountrySource, MemorySource};
