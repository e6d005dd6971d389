//! Transient result files with a time embedded in every block name

use super::TIME_PREFIX;
use crate::ado::{
    AdoFile, Block, BlockKind, BlockReader, BlockValue, LayoutOptions, Location, Mode,
    check_record_kind,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::iter::FusedIterator;
use std::path::Path;

/// A block together with the model time it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedBlock {
    /// Block with the time part removed from its name
    pub block: Block,
    /// Model time
    pub time: f64,
}

impl TimedBlock {
    /// Attach a time to a block
    pub const fn new(block: Block, time: f64) -> Self {
        Self { block, time }
    }

    /// Split a raw block name into the plain name and its time
    ///
    /// `location` is used in the error when the name carries no valid time.
    pub fn from_raw(mut block: Block, location: Location) -> Result<Self> {
        let (name, time) = decode_timed_name(&block.name).ok_or_else(|| Error::Format {
            location: location.in_block(block.name.clone()),
            reason: format!(
                "expected block name of the form <name>,{TIME_PREFIX} <time>, found {:?}",
                block.name
            ),
        })?;
        block.name = name;
        Ok(Self { block, time })
    }

    /// Block with the time embedded in its name, ready for encoding
    pub fn to_raw(&self) -> Block {
        Block {
            name: encode_timed_name(&self.block.name, self.time),
            value: self.block.value.clone(),
        }
    }

    /// Block kind implied by the payload
    pub const fn kind(&self) -> BlockKind {
        self.block.kind()
    }

    /// Convert into a record with an explicit block type code
    pub fn to_record(&self) -> TimedRecord {
        TimedRecord {
            name: self.block.name.clone(),
            time: self.time,
            blocktype: self.kind().code(),
            values: self.block.value.clone(),
        }
    }
}

/// Serializable transient block description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedRecord {
    /// Block name without the time part
    pub name: String,
    /// Model time
    pub time: f64,
    /// Block type code: 1 for scalar, 2 for array
    pub blocktype: i64,
    /// Block payload
    pub values: BlockValue,
}

impl TryFrom<TimedRecord> for TimedBlock {
    type Error = Error;

    fn try_from(record: TimedRecord) -> Result<Self> {
        check_record_kind(&record.name, record.blocktype, &record.values)?;
        Ok(Self::new(Block::new(record.name, record.values), record.time))
    }
}

/// Split `<name>,TIME: <time>` into the trimmed name and the time
///
/// ```
/// use adoflo_formats::flo::decode_timed_name;
///
/// assert_eq!(
///     decode_timed_name("PHI1,TIME:    12.5000"),
///     Some(("PHI1".to_string(), 12.5))
/// );
/// assert_eq!(decode_timed_name("PHI1"), None);
/// ```
pub fn decode_timed_name(raw: &str) -> Option<(String, f64)> {
    let (name, suffix) = raw.split_once(',')?;
    let time = suffix.replace(TIME_PREFIX, "").trim().parse::<f64>().ok()?;
    Some((name.trim().to_string(), time))
}

/// Join a name and a time as `<name>,TIME:<time>` with the time in a 10.4 field
pub fn encode_timed_name(name: &str, time: f64) -> String {
    format!("{name},{TIME_PREFIX}{time:10.4}")
}

/// Iterator adapter that splits the time out of every block name
pub struct TransientBlocks<I> {
    inner: I,
    origin: String,
    locate: fn(&I) -> Option<Location>,
    failed: bool,
}

impl<I> TransientBlocks<I> {
    /// Wrap a block iterator
    pub fn new(inner: I) -> Self {
        Self::with_origin(inner, "<blocks>")
    }

    /// Wrap a block iterator, labelling errors with `origin`
    pub fn with_origin(inner: I, origin: impl Into<String>) -> Self {
        Self {
            inner,
            origin: origin.into(),
            locate: |_| None,
            failed: false,
        }
    }
}

impl<R: std::io::BufRead> TransientBlocks<BlockReader<R>> {
    /// Wrap a block reader, taking error locations from it
    pub fn from_reader(reader: BlockReader<R>) -> Self {
        let origin = reader.origin().to_string();
        Self {
            locate: |reader| Some(reader.location()),
            ..Self::with_origin(reader, origin)
        }
    }
}

impl<I> Iterator for TransientBlocks<I>
where
    I: Iterator<Item = Result<Block>>,
{
    type Item = Result<TimedBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let block = self.inner.next()?;
        let location = (self.locate)(&self.inner)
            .unwrap_or_else(|| Location::new(self.origin.clone(), 0));
        let item = block.and_then(|block| TimedBlock::from_raw(block, location));
        self.failed = item.is_err();
        Some(item)
    }
}

impl<I> FusedIterator for TransientBlocks<I> where I: FusedIterator<Item = Result<Block>> {}

/// Transient FLO file handle
#[derive(Debug)]
pub struct TransientFloFile {
    file: AdoFile,
    header_lines: usize,
}

impl TransientFloFile {
    /// Open a transient file in the given mode
    pub fn open(path: impl AsRef<Path>, mode: Mode) -> Result<Self> {
        Ok(Self {
            file: AdoFile::open(path, mode)?,
            header_lines: 0,
        })
    }

    /// Set the number of leading lines skipped before the first block
    #[must_use]
    pub const fn with_header_lines(mut self, header_lines: usize) -> Self {
        self.header_lines = header_lines;
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

    /// Iterate over the timed blocks of the file from the beginning
    pub fn read(&mut self) -> Result<TransientBlocks<BlockReader<&mut BufReader<File>>>> {
        let origin = self.file.origin();
        let header_lines = self.header_lines;
        let mut reader = BlockReader::new(self.file.rewound_reader("read")?, origin);
        reader.lines_mut().skip(header_lines, "result file header")?;
        Ok(TransientBlocks::from_reader(reader))
    }

    /// Read every timed block into a vector
    pub fn read_all(&mut self) -> Result<Vec<TimedBlock>> {
        self.read()?.collect()
    }

    /// Read every timed block into a map keyed by the plain block name
    ///
    /// When a name occurs at more than one time the last block wins.
    pub fn read_as_mapping(&mut self) -> Result<BTreeMap<String, TimedBlock>> {
        let mut mapping = BTreeMap::new();
        for timed in self.read()? {
            let timed = timed?;
            mapping.insert(timed.block.name.clone(), timed);
        }
        Ok(mapping)
    }

    /// Write timed blocks with the time embedded in each name
    pub fn write<'a, I>(&mut self, blocks: I, options: &LayoutOptions) -> Result<()>
    where
        I: IntoIterator<Item = &'a TimedBlock>,
    {
        self.file.writer("write")?;
        let raw: Vec<Block> = blocks.into_iter().map(TimedBlock::to_raw).collect();
        self.file.write(&raw, options)
    }

    /// Write transient records, checking every record before writing any
    pub fn write_records<I>(&mut self, records: I, options: &LayoutOptions) -> Result<()>
    where
        I: IntoIterator<Item = TimedRecord>,
    {
        self.file.writer("write")?;
        let blocks = records
            .into_iter()
            .map(TimedBlock::try_from)
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
}
