//! Steady-state result files

use super::{STEADY_HEADER_LINES, STEADY_SUFFIX};
use crate::ado::{AdoFile, Block, BlockReader, BlockRecord, LayoutOptions, Mode};
use crate::error::Result;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::iter::FusedIterator;
use std::path::Path;

/// Strip the steady-state suffix from a block name
///
/// ```
/// use adoflo_formats::flo::clean_steady_name;
///
/// assert_eq!(clean_steady_name("PHI1, STEADY-STATE=="), "PHI1");
/// ```
pub fn clean_steady_name(name: &str) -> String {
    name.replace(STEADY_SUFFIX, "").trim().to_string()
}

/// Iterator adapter that cleans steady-state block names
pub struct SteadyBlocks<I> {
    inner: I,
    clean_names: bool,
}

impl<I> SteadyBlocks<I> {
    /// Wrap a block iterator, cleaning names
    pub const fn new(inner: I) -> Self {
        Self {
            inner,
            clean_names: true,
        }
    }

    /// Wrap a block iterator, passing names through unchanged
    pub const fn raw(inner: I) -> Self {
        Self {
            inner,
            clean_names: false,
        }
    }
}

impl<I> Iterator for SteadyBlocks<I>
where
    I: Iterator<Item = Result<Block>>,
{
    type Item = Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        let clean_names = self.clean_names;
        self.inner.next().map(|block| {
            block.map(|mut block| {
                if clean_names {
                    block.name = clean_steady_name(&block.name);
                }
                block
            })
        })
    }
}

impl<I> FusedIterator for SteadyBlocks<I> where I: FusedIterator<Item = Result<Block>> {}

/// Steady-state FLO file handle
///
/// Reading skips the separator header and cleans block names unless
/// [`with_clean_names(false)`](Self::with_clean_names) is set. Writing emits
/// the separator header once, before the first block.
#[derive(Debug)]
pub struct SteadyFloFile {
    file: AdoFile,
    header_lines: usize,
    clean_names: bool,
    header_written: bool,
}

impl SteadyFloFile {
    /// Open a steady-state file in the given mode
    pub fn open(path: impl AsRef<Path>, mode: Mode) -> Result<Self> {
        Ok(Self {
            file: AdoFile::open(path, mode)?,
            header_lines: STEADY_HEADER_LINES,
            clean_names: true,
            header_written: false,
        })
    }

    /// Set the number of header lines skipped on read and written on write
    #[must_use]
    pub const fn with_header_lines(mut self, header_lines: usize) -> Self {
        self.header_lines = header_lines;
        self
    }

    /// Choose whether the steady-state suffix is removed from names on read
    #[must_use]
    pub const fn with_clean_names(mut self, clean_names: bool) -> Self {
        self.clean_names = clean_names;
        self
    }

    /// Path the file was opened with
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Mode the file was opened in
    pub const fn mode(&self) -> Mode {
        self.file.mode()
    }

    /// Rewind to the start of the file
    pub fn reset(&mut self) -> Result<()> {
        self.file.reset()
    }

    /// Iterate over the blocks of the file from the beginning
    pub fn read(&mut self) -> Result<SteadyBlocks<BlockReader<&mut BufReader<File>>>> {
        let origin = self.file.origin();
        let header_lines = self.header_lines;
        let clean_names = self.clean_names;

        let mut reader = BlockReader::new(self.file.rewound_reader("read")?, origin);
        reader.lines_mut().skip(header_lines, "result file header")?;
        Ok(if clean_names {
            SteadyBlocks::new(reader)
        } else {
            SteadyBlocks::raw(reader)
        })
    }

    /// Read every block into a name to block map, last writer wins
    pub fn read_as_mapping(&mut self) -> Result<BTreeMap<String, Block>> {
        let mut mapping = BTreeMap::new();
        for block in self.read()? {
            let block = block?;
            mapping.insert(block.name.clone(), block);
        }
        Ok(mapping)
    }

    /// Write blocks, preceded by the header on the first write
    pub fn write<'a, I>(&mut self, blocks: I, options: &LayoutOptions) -> Result<()>
    where
        I: IntoIterator<Item = &'a Block>,
    {
        options.validate()?;
        self.write_header()?;
        self.file.write(blocks, options)
    }

    /// Write block records, preceded by the header on the first write
    pub fn write_records<I>(&mut self, records: I, options: &LayoutOptions) -> Result<()>
    where
        I: IntoIterator<Item = BlockRecord>,
    {
        let blocks = records
            .into_iter()
            .map(Block::try_from)
            .collect::<Result<Vec<_>>>()?;
        self.write(&blocks, options)
    }

    /// Write the `END FILE GRIDFL` sentinel
    pub fn write_end_of_file(&mut self) -> Result<()> {
        self.file.write_end_of_file()
    }

    /// Flush pending output and release the file
    pub fn close(self) -> Result<()> {
        self.file.close()
    }

    fn write_header(&mut self) -> Result<()> {
        let writer = self.file.writer("write")?;
        if !self.header_written {
            writer.write_separators(self.header_lines)?;
            self.header_written = true;
        }
        Ok(())
    }
}
