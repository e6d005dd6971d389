//! `adoflo rewrite`: read a block file and write it back with a new layout

use crate::Variant;
use adoflo_formats::ado::{AdoFile, Block, LayoutOptions, Mode};
use adoflo_formats::flo::{SteadyFloFile, TimedBlock, TransientFloFile};
use anyhow::Context;
use std::path::Path;
use tracing::info;

/// Copy every block from `input` to `output` and return the block count.
///
/// Steady-state names keep their suffix so the output stays a steady FLO
/// file. The `END FILE GRIDFL` sentinel is appended when `end_of_file` is
/// set.
pub fn rewrite(
    input: &Path,
    output: &Path,
    variant: Variant,
    options: &LayoutOptions,
    end_of_file: bool,
) -> anyhow::Result<usize> {
    let count = match variant {
        Variant::Ado => {
            let blocks: Vec<Block> = AdoFile::open(input, Mode::Read)?
                .read()?
                .collect::<Result<_, _>>()
                .with_context(|| format!("failed to read {}", input.display()))?;
            let mut file = AdoFile::open(output, Mode::Write)?;
            file.write(&blocks, options)?;
            if end_of_file {
                file.write_end_of_file()?;
            }
            file.close()?;
            blocks.len()
        }
        Variant::Steady => {
            let mut source = SteadyFloFile::open(input, Mode::Read)?.with_clean_names(false);
            let blocks: Vec<Block> = source
                .read()?
                .collect::<Result<_, _>>()
                .with_context(|| format!("failed to read {}", input.display()))?;
            let mut file = SteadyFloFile::open(output, Mode::Write)?;
            file.write(&blocks, options)?;
            if end_of_file {
                file.write_end_of_file()?;
            }
            file.close()?;
            blocks.len()
        }
        Variant::Transient => {
            let blocks: Vec<TimedBlock> = TransientFloFile::open(input, Mode::Read)?
                .read_all()
                .with_context(|| format!("failed to read {}", input.display()))?;
            let mut file = TransientFloFile::open(output, Mode::Write)?;
            file.write(&blocks, options)?;
            if end_of_file {
                file.write_end_of_file()?;
            }
            file.close()?;
            blocks.len()
        }
    };

    info!(
        input = %input.display(),
        output = %output.display(),
        blocks = count,
        "rewrote file"
    );
    Ok(count)
}
