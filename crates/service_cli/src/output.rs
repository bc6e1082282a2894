//! Rendering of command results as a table or JSON.

use clap::ValueEnum;
use serde::Serialize;

use crate::Result;

/// Output format selected with `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Two-column text table
    Table,
    /// Pretty-printed JSON
    Json,
}

/// A command result that can be shown as a table.
pub trait Report: Serialize {
    /// Table heading
    fn title(&self) -> String;

    /// `(label, value)` rows in display order
    fn rows(&self) -> Vec<(&'static str, String)>;
}

/// Format `report` in the requested format
pub fn render<R: Report>(report: &R, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => Ok(table(&report.title(), &report.rows())),
    }
}

fn table(title: &str, rows: &[(&'static str, String)]) -> String {
    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);
    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0)
        .max(title.chars().count().saturating_sub(label_width + 3))
        .max(5);

    let bar = |left: &str, mid: &str, right: &str| {
        format!(
            "{}{}{}{}{}\n",
            left,
            "─".repeat(label_width + 2),
            mid,
            "─".repeat(value_width + 2),
            right
        )
    };

    let mut out = String::new();
    out.push_str(&bar("┌", "─", "┐"));
    out.push_str(&format!(
        "│ {:<width$} │\n",
        title,
        width = label_width + value_width + 3
    ));
    out.push_str(&bar("├", "┬", "┤"));
    for (label, value) in rows {
        out.push_str(&format!(
            "│ {:<lw$} │ {:>vw$} │\n",
            label,
            value,
            lw = label_width,
            vw = value_width
        ));
    }
    out.push_str(&bar("└", "┴", "┘"));
    out
}

/// Fixed-precision price formatting used across reports
pub fn price(value: f64) -> String {
    format!("{:.6}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        price: f64,
    }

    impl Report for Sample {
        fn title(&self) -> String {
            "Sample".to_string()
        }

        fn rows(&self) -> Vec<(&'static str, String)> {
            vec![("Price", price(self.price)), ("Model", "test".to_string())]
        }
    }

    #[test]
    fn test_table_contains_rows() {
        let text = render(&Sample { price: 1.5 }, OutputFormat::Table).unwrap();
        assert!(text.contains("Sample"));
        assert!(text.contains("Price"));
        assert!(text.contains("1.500000"));

        // Every line has the same display width.
        let widths: Vec<usize> = text.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{:?}", widths);
    }

    #[test]
    fn test_json_output() {
        let text = render(&Sample { price: 2.25 }, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["price"], 2.25);
    }
}
