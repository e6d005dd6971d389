//! `adoflo import`: write JSON block records as an ADO file

use adoflo_formats::ado::{AdoFile, BlockRecord, LayoutOptions, Mode};
use anyhow::Context;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Read a JSON array of block records.
pub fn read_records(path: &Path) -> anyhow::Result<Vec<BlockRecord>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse block records from {}", path.display()))
}

/// Import records from `input` into a new ADO file and return the block count
pub fn import(
    input: &Path,
    output: &Path,
    options: &LayoutOptions,
    end_of_file: bool,
) -> anyhow::Result<usize> {
    let records = read_records(input)?;
    let count = records.len();

    let mut file = AdoFile::open(output, Mode::Write)?;
    file.write_records(records, options)
        .with_context(|| format!("failed to write {}", output.display()))?;
    if end_of_file {
        file.write_end_of_file()?;
    }
    file.close()?;

    info!(output = %output.display(), blocks = count, "imported records");
    Ok(count)
}
