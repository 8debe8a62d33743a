//! Case-insensitive name filter

use ce_core::Country;

/// Check whether a country's common name contains `query`, ignoring case
///
/// The query is literal text; characters such as `.` or `(` have no
/// special meaning.
pub fn matches_query(country: &Country, query: &str) -> bool {
    country
        .common_name()
        .to_lowercase()
        .contains(&query.to_lowercase())
}

/// Narrow `countries` to those whose common name contains `query`
///
/// Relative order is preserved. An empty query returns every country.
pub fn filter_countries<'a>(countries: &'a [Country], query: &str) -> Vec<&'a Country> {
    if query.is_empty() {
        return countries.iter().collect();
    }

    let needle = query.to_lowercase();
    countries
        .iter()
        .filter(|c| c.common_name().to_lowercase().contains(&needle))
        .collect()
}
