//! `adoflo grid`: TEO header and mesh counts

use crate::OutputFormat;
use crate::output::{create_table, numeric_cell, write_json};
use adoflo_formats::ado::Mode;
use adoflo_formats::teo::{self, Grid};
use anyhow::Context;
use comfy_table::Cell;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Header pairs and mesh counts of a grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridSummary {
    /// Header `key = value` pairs in file order
    pub header: Vec<(String, i64)>,
    /// Number of nodes
    pub nodes: usize,
    /// Number of triangular elements
    pub elements: usize,
    /// Number of source nodes
    pub source_nodes: usize,
    /// Number of river nodes
    pub river_nodes: usize,
    /// Number of boundary nodes
    pub boundary_nodes: usize,
}

impl From<&Grid> for GridSummary {
    fn from(grid: &Grid) -> Self {
        Self {
            header: grid.header.clone(),
            nodes: grid.node_count(),
            elements: grid.element_count(),
            source_nodes: grid.source_nodes.len(),
            river_nodes: grid.river_nodes.len(),
            boundary_nodes: grid.boundary_nodes.len(),
        }
    }
}

/// Handle `adoflo grid`
pub fn handle(path: &Path, format: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    let grid = teo::open(path, Mode::Read)
        .and_then(|mut file| file.read_grid())
        .with_context(|| format!("failed to read grid {}", path.display()))?;
    let summary = GridSummary::from(&grid);

    if format != OutputFormat::Text {
        return write_json(out, &summary, format);
    }

    let mut header = create_table(&["Header", "Value"]);
    for (key, value) in &summary.header {
        header.add_row(vec![Cell::new(key), numeric_cell(value)]);
    }
    writeln!(out, "{header}")?;

    let mut counts = create_table(&["Mesh", "Count"]);
    counts.add_row(vec![Cell::new("nodes"), numeric_cell(summary.nodes)]);
    counts.add_row(vec![Cell::new("elements"), numeric_cell(summary.elements)]);
    counts.add_row(vec![
        Cell::new("source nodes"),
        numeric_cell(summary.source_nodes),
    ]);
    counts.add_row(vec![
        Cell::new("river nodes"),
        numeric_cell(summary.river_nodes),
    ]);
    counts.add_row(vec![
        Cell::new("boundary nodes"),
        numeric_cell(summary.boundary_nodes),
    ]);
    writeln!(out, "{counts}")?;
    Ok(())
}
