//! Terminal output helpers.

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Render typed rows as a table, or a placeholder when empty.
pub fn table<T: Tabled>(rows: Vec<T>) -> String {
    if rows.is_empty() {
        return "(sin resultados)".dimmed().to_string();
    }
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

/// Section heading for multi-block output.
pub fn heading(text: &str) -> String {
    text.bold().to_string()
}

/// Aligned key/value line for detail views.
pub fn field(name: &str, value: &str) -> String {
    format!("{:>14}  {value}", name.dimmed())
}
