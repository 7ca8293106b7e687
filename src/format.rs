//! Output formatting shared by every report.

use chrono::DateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::{Table, builder::Builder, settings::Style};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Headers plus string rows: the shape every tabular view reduces to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tabular {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Tabular {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A report result that can be printed in any [`OutputFormat`].
///
/// JSON is the serialized report itself, so the CLI prints the same
/// structure the MCP tools return.
pub trait Render: Serialize {
    /// Tabular view used for CSV and, unless overridden, table output.
    fn tabular(&self) -> Tabular;

    fn render_table(&self) -> String {
        format_table(&self.tabular())
    }

    fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => self.render_table(),
            OutputFormat::Csv => format_csv(&self.tabular()),
            OutputFormat::Json => serde_json::to_string_pretty(self)
                .unwrap_or_else(|e| serde_json::json!({"error": e.to_string()}).to_string()),
        }
    }
}

/// Apply consistent table styling
pub fn apply_table_style(table: &mut Table) {
    table.with(Style::rounded());
}

/// Styled text table followed by a row count.
pub fn format_table(data: &Tabular) -> String {
    if data.is_empty() {
        return "No data found.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(data.headers.iter().map(String::as_str));
    for row in &data.rows {
        builder.push_record(row.iter().map(String::as_str));
    }

    let mut table = builder.build();
    apply_table_style(&mut table);
    format!("{}\n\nTotal rows: {}", table, data.rows.len())
}

pub fn format_csv(data: &Tabular) -> String {
    let mut lines = Vec::with_capacity(data.rows.len() + 1);
    lines.push(csv_line(&data.headers));
    for row in &data.rows {
        lines.push(csv_line(row));
    }
    lines.join("\n")
}

fn csv_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Truncate a string with ellipsis if it exceeds max length
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// `0.0543` → `5.43%`
pub fn format_ctr(ctr: f64) -> String {
    format!("{:.2}%", ctr * 100.0)
}

/// Average position with one decimal.
pub fn format_position(position: f64) -> String {
    format!("{:.1}", position)
}

/// Counts arrive as doubles; print whole numbers without a fraction.
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// `1234567` → `1,234,567` (rounded to a whole number)
pub fn group_thousands(value: f64) -> String {
    let whole = value.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Always-signed integer: `+12`, `-3`, `+0`.
pub fn format_signed(value: i64) -> String {
    format!("{:+}", value)
}

/// First letter upper-cased, the rest lower-cased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// RFC 3339 timestamp → `YYYY-MM-DD HH:MM`; unparsable input is returned as-is.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Aligned `Label:  value` line, labels padded to a fixed width.
///
/// Labels too long for the column still get one space before the value.
pub fn labelled(label: &str, value: impl std::fmt::Display, width: usize) -> String {
    let label = format!("{}:", label);
    let width = width.max(label.chars().count() + 1);
    format!("{:<width$}{}", label, value, width = width)
}

pub const RULE: &str = "------------------------------------------------------------";

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;
