//! Block stream encoding

use crate::ado::block::Block;
use crate::ado::layout::{ArrayFormat, LayoutOptions};
use crate::ado::value::BlockValue;
use crate::ado::{END_OF_FILE, END_SET, END_TEXT, SEPARATOR, SET_MARKER, TEXT_MARKER};
use crate::error::Result;
use std::io::{BufWriter, Write};
use tracing::debug;

/// Block stream writer
///
/// Each block is encoded completely before any of it is written, so an
/// encoding failure leaves the output ending on a block boundary.
pub struct BlockWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> BlockWriter<W> {
    /// Create a new writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Write one block
    pub fn write_block(&mut self, block: &Block, options: &LayoutOptions) -> Result<()> {
        options.validate()?;
        let text = encode_block(block, options)?;
        self.writer.write_all(text.as_bytes())?;
        debug!(
            block = %block.name,
            kind = %block.kind(),
            count = block.value.len(),
            "wrote block"
        );
        Ok(())
    }

    /// Write blocks in order, returning how many were written
    pub fn write_blocks<'a, I>(&mut self, blocks: I, options: &LayoutOptions) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Block>,
    {
        options.validate()?;
        let mut written = 0;
        for block in blocks {
            self.write_block(block, options)?;
            written += 1;
        }
        Ok(written)
    }

    /// Write `count` bare separator lines
    pub fn write_separators(&mut self, count: usize) -> Result<()> {
        for _ in 0..count {
            writeln!(self.writer, "{SEPARATOR}")?;
        }
        Ok(())
    }

    /// Write the `END FILE GRIDFL` sentinel
    pub fn write_end_of_file(&mut self) -> Result<()> {
        writeln!(self.writer, "{END_OF_FILE}")?;
        Ok(())
    }

    /// Flush buffered output
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and get the inner writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|err| err.into_error().into())
    }
}

/// Encode one block, including its leading separator and trailing newline
///
/// Names are written uppercased. Text payloads use the `*TEXT*`/`ENDTEXT`
/// pair, everything else `*SET*`/`ENDSET`.
pub fn encode_block(block: &Block, options: &LayoutOptions) -> Result<String> {
    let (marker, end) = if block.value.is_text() {
        (TEXT_MARKER, END_TEXT)
    } else {
        (SET_MARKER, END_SET)
    };

    let mut text = String::new();
    text.push_str(SEPARATOR);
    text.push('\n');
    text.push_str(marker);
    text.push_str(&block.name.to_uppercase());
    text.push('\n');
    text.push_str(&block.kind().code().to_string());
    text.push('\n');

    match &block.value {
        BlockValue::Scalar(value) => {
            text.push_str(&value.encode());
            text.push('\n');
        }
        BlockValue::Array(values) => {
            let format = ArrayFormat::for_kind(values.element_kind(), options);
            text.push_str(&format.header_line(values.len()));
            text.push('\n');
            text.push_str(&format.encode_rows(values)?);
        }
    }

    text.push_str(end);
    text.push('\n');
    Ok(text)
}

/// Format blocks as ADO text
pub fn format(blocks: &[Block], options: &LayoutOptions) -> Result<String> {
    options.validate()?;
    let mut text = String::new();
    for block in blocks {
        text.push_str(&encode_block(block, options)?);
    }
    Ok(text)
}
