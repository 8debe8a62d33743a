//! View projections for the country list, detail view and comparison panel
//!
//! Everything here is a pure function of a [`Country`] and the current
//! selection; rendering to text lives in [`crate::render`].

use ce_core::Country;
use serde::Serialize;

/// Placeholder for a missing value
pub const NOT_AVAILABLE: &str = "N/A";

/// Group the digits of `n` in threes with commas (`67391582` -> `67,391,582`)
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format an area in square kilometres
///
/// Whole part grouped like [`format_thousands`], at most three fraction
/// digits with trailing zeros dropped.
pub fn format_area(area: f64) -> String {
    let area = if area.is_finite() && area > 0.0 { area } else { 0.0 };
    let millis = (area * 1000.0).round() as u64;
    let whole = format_thousands(millis / 1000);
    let fraction = millis % 1000;

    if fraction == 0 {
        format!("{whole} km²")
    } else {
        let fraction = format!("{fraction:03}");
        format!("{whole}.{} km²", fraction.trim_end_matches('0'))
    }
}

fn join_or_na<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let joined = parts.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        joined
    }
}

/// One row of the country table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub name: String,
    pub flag: String,
    pub capital: String,
    pub region: String,
    pub population: String,
    /// The country is in the comparison
    pub selected: bool,
    /// Two other countries are already selected
    pub disabled: bool,
    pub action_label: &'static str,
}

impl RowView {
    pub fn project(country: &Country, selected_names: &[String], selection_full: bool) -> Self {
        let selected = selected_names.iter().any(|n| n == country.common_name());
        Self {
            name: country.common_name().to_string(),
            flag: country.flags.png.clone(),
            capital: country.first_capital().unwrap_or(NOT_AVAILABLE).to_string(),
            region: country.region.clone().unwrap_or_default(),
            population: format_thousands(country.population),
            selected,
            disabled: selection_full && !selected,
            action_label: if selected { "Selected" } else { "Compare" },
        }
    }
}

/// Project a filtered list into table rows
pub fn project_rows(countries: &[&Country], selected_names: &[String]) -> Vec<RowView> {
    let full = selected_names.len() >= ce_selection::SELECTION_CAPACITY;
    countries
        .iter()
        .map(|c| RowView::project(c, selected_names, full))
        .collect()
}

/// Everything the detail view shows for one country
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub name: String,
    pub official_name: String,
    pub flag: String,
    pub capital: String,
    pub region: String,
    pub subregion: String,
    pub population: String,
    pub area: String,
    pub languages: String,
    pub currencies: String,
    /// Empty when the country has no land borders
    pub borders: Vec<String>,
    pub google_maps: Option<String>,
}

impl DetailView {
    pub fn project(country: &Country) -> Self {
        let capital = join_or_na(country.capital.iter().flatten().map(String::as_str));
        let languages = join_or_na(
            country
                .languages
                .iter()
                .flat_map(|langs| langs.values())
                .map(String::as_str),
        );
        let currencies: Vec<String> = country
            .currencies
            .iter()
            .flat_map(|c| c.values())
            .map(|c| match &c.symbol {
                Some(symbol) => format!("{} ({})", c.name, symbol),
                None => c.name.clone(),
            })
            .collect();

        Self {
            name: country.common_name().to_string(),
            official_name: country.name.official.clone(),
            flag: country.flags.png.clone(),
            capital,
            region: country.region.clone().unwrap_or_default(),
            subregion: country
                .subregion
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            population: format_thousands(country.population),
            area: format_area(country.area),
            languages,
            currencies: join_or_na(currencies.iter().map(String::as_str)),
            borders: country.borders.clone().unwrap_or_default(),
            google_maps: country.google_maps().map(str::to_string),
        }
    }
}

/// One side of the comparison panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonCard {
    pub name: String,
    pub flag: String,
    pub population: String,
    pub area: String,
    pub region: String,
}

impl ComparisonCard {
    pub fn project(country: &Country) -> Self {
        Self {
            name: country.common_name().to_string(),
            flag: country.flags.png.clone(),
            population: format_thousands(country.population),
            area: format_area(country.area),
            region: country.region.clone().unwrap_or_default(),
        }
    }
}
