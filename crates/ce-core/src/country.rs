//! Country record as returned by the REST Countries API (v3.1)

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Common and official names of a country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    /// Short name, unique within one result set (e.g., "France")
    pub common: String,

    /// Official name (e.g., "French Republic")
    #[serde(default)]
    pub official: String,
}

/// Flag image URLs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub png: String,

    #[serde(default)]
    pub svg: String,

    /// Alt text describing the flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Currency descriptor keyed by ISO 4217 code in [`Country::currencies`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// Map links
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_street_maps: Option<String>,
}

/// A country as served by the data source
///
/// Records are immutable once fetched. `name.common` identifies a record
/// within one result set; selection and lookup rely on that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: CountryName,

    /// Capitals in the order the API lists them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,

    #[serde(default)]
    pub population: u64,

    /// Area in square kilometres
    #[serde(default)]
    pub area: f64,

    #[serde(default)]
    pub flags: Flags,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currencies: Option<IndexMap<String, Currency>>,

    /// Language names keyed by ISO 639-3 code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<IndexMap<String, String>>,

    /// cca3 codes of bordering countries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borders: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps: Option<Maps>,
}

impl Country {
    /// Create a record with only a name; every other field is empty
    pub fn new(common: impl Into<String>, official: impl Into<String>) -> Self {
        Self {
            name: CountryName {
                common: common.into(),
                official: official.into(),
            },
            capital: None,
            region: None,
            subregion: None,
            population: 0,
            area: 0.0,
            flags: Flags::default(),
            currencies: None,
            languages: None,
            borders: None,
            maps: None,
        }
    }

    /// Set the region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set population and area
    pub fn with_size(mut self, population: u64, area: f64) -> Self {
        self.population = population;
        self.area = area;
        self
    }

    /// Set the capitals
    pub fn with_capitals<I, S>(mut self, capitals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capital = Some(capitals.into_iter().map(Into::into).collect());
        self
    }

    /// The common name, used as the record's key
    pub fn common_name(&self) -> &str {
        &self.name.common
    }

    /// Check whether two records denote the same country
    pub fn same_country(&self, other: &Country) -> bool {
        self.name.common == other.name.common
    }

    /// First listed capital, if any
    pub fn first_capital(&self) -> Option<&str> {
        self.capital
            .as_ref()
            .and_then(|c| c.first())
            .map(String::as_str)
    }

    /// Google Maps link, if any
    pub fn google_maps(&self) -> Option<&str> {
        self.maps.as_ref().and_then(|m| m.google_maps.as_deref())
    }
}
