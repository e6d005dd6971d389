//! `adoflo list`: one summary line per block

use crate::output::{create_table, format_stat, numeric_cell, write_json};
use crate::{OutputFormat, Variant};
use adoflo_formats::ado::{AdoFile, Block, BlockValue, Mode};
use adoflo_formats::flo::{SteadyFloFile, TransientFloFile};
use anyhow::Context;
use comfy_table::Cell;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Summary of one block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockSummary {
    /// Block name, cleaned for FLO variants
    pub name: String,
    /// Model time for transient blocks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    /// `scalar` or `array`
    pub kind: String,
    /// `int`, `float` or `text`
    pub element: String,
    /// Number of values
    pub count: usize,
    /// Smallest numeric value
    pub min: Option<f64>,
    /// Largest numeric value
    pub max: Option<f64>,
    /// Mean of the numeric values
    pub mean: Option<f64>,
}

impl BlockSummary {
    /// Summarize a block, with an optional model time
    pub fn new(block: &Block, time: Option<f64>) -> Self {
        let numbers = match &block.value {
            BlockValue::Scalar(scalar) => scalar.as_f64().map(|value| vec![value]),
            BlockValue::Array(values) => values.to_f64_vec(),
        }
        .unwrap_or_default();

        let (min, max, mean) = if numbers.is_empty() {
            (None, None, None)
        } else {
            let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
            let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            #[allow(clippy::cast_precision_loss)]
            let mean = numbers.iter().sum::<f64>() / numbers.len() as f64;
            (Some(min), Some(max), Some(mean))
        };

        Self {
            name: block.name.clone(),
            time,
            kind: block.kind().to_string(),
            element: block.value.element_kind().to_string(),
            count: block.value.len(),
            min,
            max,
            mean,
        }
    }
}

/// Read every block of a file as summaries
pub fn summarize(path: &Path, variant: Variant) -> anyhow::Result<Vec<BlockSummary>> {
    let summaries = match variant {
        Variant::Ado => {
            let mut file = AdoFile::open(path, Mode::Read)?;
            file.read()?
                .map(|block| block.map(|block| BlockSummary::new(&block, None)))
                .collect::<Result<Vec<_>, _>>()?
        }
        Variant::Steady => {
            let mut file = SteadyFloFile::open(path, Mode::Read)?;
            file.read()?
                .map(|block| block.map(|block| BlockSummary::new(&block, None)))
                .collect::<Result<Vec<_>, _>>()?
        }
        Variant::Transient => {
            let mut file = TransientFloFile::open(path, Mode::Read)?;
            file.read()?
                .map(|timed| timed.map(|timed| BlockSummary::new(&timed.block, Some(timed.time))))
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    debug!(path = %path.display(), blocks = summaries.len(), "summarized blocks");
    Ok(summaries)
}

/// Handle `adoflo list`
pub fn handle(
    path: &Path,
    variant: Variant,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let summaries =
        summarize(path, variant).with_context(|| format!("failed to list {}", path.display()))?;

    if format != OutputFormat::Text {
        return write_json(out, &summaries, format);
    }

    let timed = variant == Variant::Transient;
    let mut headers = vec!["Name"];
    if timed {
        headers.push("Time");
    }
    headers.extend(["Kind", "Type", "Count", "Min", "Max", "Mean"]);

    let mut table = create_table(&headers);
    for summary in &summaries {
        let mut row = vec![Cell::new(&summary.name)];
        if timed {
            row.push(numeric_cell(format_stat(summary.time)));
        }
        row.extend([
            Cell::new(&summary.kind),
            Cell::new(&summary.element),
            numeric_cell(summary.count),
            numeric_cell(format_stat(summary.min)),
            numeric_cell(format_stat(summary.max)),
            numeric_cell(format_stat(summary.mean)),
        ]);
        table.add_row(row);
    }
    writeln!(out, "{table}")?;
    Ok(())
}
