//! Output formatting utilities for the CLI

use crate::OutputFormat;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table, presets};
use serde::Serialize;
use std::io::Write;

/// Create a table with the shared CLI style
pub fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_HORIZONTAL_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120)
        .set_header(headers.iter().map(|text| header_cell(text)));
    table
}

/// Style a table header cell
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Left)
}

/// Style a numeric cell (right-aligned)
pub fn numeric_cell(text: impl ToString) -> Cell {
    Cell::new(text.to_string()).set_alignment(CellAlignment::Right)
}

/// Format an optional statistic, leaving a dash for non-numeric blocks
pub fn format_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |value| format!("{value:.6}"))
}

/// Write a value as JSON in the requested style
pub fn write_json<T: Serialize>(
    out: &mut impl Write,
    value: &T,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if format == OutputFormat::JsonPretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_stat() {
        assert_eq!(format_stat(Some(1.5)), "1.500000");
        assert_eq!(format_stat(None), "-");
    }

    #[test]
    fn test_write_json_compact_and_pretty() {
        let mut compact = Vec::new();
        write_json(&mut compact, &vec![1, 2], OutputFormat::Json).unwrap();
        assert_eq!(String::from_utf8(compact).unwrap(), "[1,2]\n");

        let mut pretty = Vec::new();
        write_json(&mut pretty, &vec![1, 2], OutputFormat::JsonPretty).unwrap();
        assert_eq!(String::from_utf8(pretty).unwrap(), "[\n  1,\n  2\n]\n");
    }
}
