//! Plain-text rendering of the view projections

use crate::presentation::{ComparisonCard, DetailView, RowView};

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, to: usize) -> String {
    let mut out = s.to_string();
    out.extend(std::iter::repeat(' ').take(to.saturating_sub(width(s))));
    out
}

fn action_cell(row: &RowView) -> String {
    if row.disabled {
        format!("({})", row.action_label)
    } else {
        format!("[{}]", row.action_label)
    }
}

/// Render the country table
///
/// Selected rows are starred; greyed-out compare controls are shown in
/// parentheses instead of brackets.
pub fn render_table(rows: &[RowView]) -> String {
    if rows.is_empty() {
        return "No countries match.".to_string();
    }

    let headers = ["", "Name", "Capital", "Region", "Population", ""];
    let cells: Vec<[String; 6]> = rows
        .iter()
        .map(|row| {
            [
                if row.selected { "*" } else { " " }.to_string(),
                row.name.clone(),
                row.capital.clone(),
                row.region.clone(),
                row.population.clone(),
                action_cell(row),
            ]
        })
        .collect();

    let mut widths = headers.map(width);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(width(cell));
        }
    }

    let line = |cols: Vec<String>| cols.join("  ").trim_end().to_string();
    let mut lines = Vec::with_capacity(cells.len() + 2);
    lines.push(line(
        headers.iter().zip(widths).map(|(h, w)| pad(h, w)).collect(),
    ));
    lines.push(line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in &cells {
        lines.push(line(row.iter().zip(widths).map(|(c, w)| pad(c, w)).collect()));
    }
    lines.join("\n")
}

/// Render the detail view
pub fn render_detail(detail: &DetailView) -> String {
    let mut lines = vec![
        detail.name.clone(),
        "=".repeat(width(&detail.name)),
        format!("Official name: {}", detail.official_name),
        format!("Capital:       {}", detail.capital),
        format!("Region:        {}", detail.region),
        format!("Subregion:     {}", detail.subregion),
        format!("Population:    {}", detail.population),
        format!("Area:          {}", detail.area),
        format!("Languages:     {}", detail.languages),
        format!("Currencies:    {}", detail.currencies),
    ];
    if !detail.borders.is_empty() {
        lines.push(format!("Borders:       {}", detail.borders.join(" ")));
    }
    if let Some(url) = &detail.google_maps {
        lines.push(format!("Google Maps:   {}", url));
    }
    if !detail.flag.is_empty() {
        lines.push(format!("Flag:          {}", detail.flag));
    }
    lines.join("\n")
}

/// Render the comparison panel, one card per selected country
pub fn render_comparison(cards: &[ComparisonCard]) -> String {
    cards
        .iter()
        .map(|card| {
            format!(
                "{}\n  Population: {}\n  Area:       {}\n  Region:     {}",
                card.name, card.population, card.area, card.region
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, selected: bool, disabled: bool) -> RowView {
        RowView {
            name: name.to_string(),
            flag: String::new(),
            capital: "N/A".to_string(),
            region: "Europe".to_string(),
            population: "1,000".to_string(),
            selected,
            disabled,
            action_label: if selected { "Selected" } else { "Compare" },
        }
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&[row("France", true, false), row("Japan", false, true)]);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Name") && lines[0].contains("Population"));
        assert!(lines[2].starts_with("*  France"));
        assert!(lines[2].ends_with("[Selected]"));
        assert!(lines[3].ends_with("(Compare)"));
    }

    #[test]
    fn test_render_empty_table() {
        assert_eq!(render_table(&[]), "No countries match.");
    }

    #[test]
    fn test_render_detail_omits_empty_sections() {
        let detail = DetailView {
            name: "Japan".to_string(),
            official_name: "Japan".to_string(),
            flag: String::new(),
            capital: "Tokyo".to_string(),
            region: "Asia".to_string(),
            subregion: "Eastern Asia".to_string(),
            population: "125,836,021".to_string(),
            area: "377,930 km²".to_string(),
            languages: "Japanese".to_string(),
            currencies: "Japanese yen (¥)".to_string(),
            borders: Vec::new(),
            google_maps: None,
        };
        let text = render_detail(&detail);
        assert!(text.contains("Area:          377,930 km²"));
        assert!(!text.contains("Borders"));
        assert!(!text.contains("Google Maps"));
    }
}
