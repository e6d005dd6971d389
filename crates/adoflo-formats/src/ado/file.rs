//! ADO file handles

use crate::ado::block::{Block, BlockRecord};
use crate::ado::layout::LayoutOptions;
use crate::ado::reader::BlockReader;
use crate::ado::writer::BlockWriter;
use crate::ado::Mode;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::debug;

enum Handle {
    Read(BufReader<File>),
    Write(BlockWriter<File>),
}

/// A block file opened for reading or for writing
///
/// The handle owns the OS file. Reading methods fail with [`Error::Mode`] on
/// a handle opened for writing and vice versa, before touching the file.
pub struct AdoFile {
    path: PathBuf,
    handle: Handle,
}

impl AdoFile {
    /// Open `path` in the given mode
    ///
    /// Write mode creates the file or truncates an existing one.
    pub fn open(path: impl AsRef<Path>, mode: Mode) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let handle = match mode {
            Mode::Read => Handle::Read(BufReader::new(File::open(&path)?)),
            Mode::Write => Handle::Write(BlockWriter::new(File::create(&path)?)),
        };
        debug!(path = %path.display(), %mode, "opened block file");
        Ok(Self { path, handle })
    }

    /// Path the file was opened with
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mode the file was opened in
    pub const fn mode(&self) -> Mode {
        match self.handle {
            Handle::Read(_) => Mode::Read,
            Handle::Write(_) => Mode::Write,
        }
    }

    /// Rewind to the start of the file
    pub fn reset(&mut self) -> Result<()> {
        self.reader("reset")?.seek(SeekFrom::Start(0))?;
        Ok(())
    }

    /// Iterate over the blocks of the file from the beginning
    pub fn read(&mut self) -> Result<BlockReader<&mut BufReader<File>>> {
        let origin = self.origin();
        let reader = self.rewound_reader("read")?;
        Ok(BlockReader::new(reader, origin))
    }

    /// Read every block into a name to block map, last writer wins
    pub fn read_as_mapping(&mut self) -> Result<BTreeMap<String, Block>> {
        self.read()?.read_as_mapping()
    }

    /// Write blocks in order
    pub fn write<'a, I>(&mut self, blocks: I, options: &LayoutOptions) -> Result<()>
    where
        I: IntoIterator<Item = &'a Block>,
    {
        let written = self.writer("write")?.write_blocks(blocks, options)?;
        debug!(path = %self.path.display(), blocks = written, "wrote blocks");
        Ok(())
    }

    /// Write block records, checking every record before writing any
    pub fn write_records<I>(&mut self, records: I, options: &LayoutOptions) -> Result<()>
    where
        I: IntoIterator<Item = BlockRecord>,
    {
        self.writer("write")?;
        let blocks = records
            .into_iter()
            .map(Block::try_from)
            .collect::<Result<Vec<_>>>()?;
        self.write(&blocks, options)
    }

    /// Write the `END FILE GRIDFL` sentinel
    pub fn write_end_of_file(&mut self) -> Result<()> {
        self.writer("write")?.write_end_of_file()
    }

    /// Flush pending output and release the file
    pub fn close(mut self) -> Result<()> {
        if let Handle::Write(writer) = &mut self.handle {
            writer.flush()?;
        }
        debug!(path = %self.path.display(), "closed block file");
        Ok(())
    }

    pub(crate) fn origin(&self) -> String {
        self.path.display().to_string()
    }

    pub(crate) fn rewound_reader(
        &mut self,
        operation: &'static str,
    ) -> Result<&mut BufReader<File>> {
        let reader = self.reader(operation)?;
        reader.seek(SeekFrom::Start(0))?;
        Ok(reader)
    }

    pub(crate) fn reader(&mut self, operation: &'static str) -> Result<&mut BufReader<File>> {
        match &mut self.handle {
            Handle::Read(reader) => Ok(reader),
            Handle::Write(_) => Err(mode_error(&self.path, Mode::Write, operation)),
        }
    }

    pub(crate) fn writer(&mut self, operation: &'static str) -> Result<&mut BlockWriter<File>> {
        match &mut self.handle {
            Handle::Write(writer) => Ok(writer),
            Handle::Read(_) => Err(mode_error(&self.path, Mode::Read, operation)),
        }
    }
}

fn mode_error(path: &Path, mode: Mode, operation: &'static str) -> Error {
    Error::Mode {
        path: path.display().to_string(),
        mode,
        operation,
    }
}

impl std::fmt::Debug for AdoFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdoFile")
            .field("path", &self.path)
            .field("mode", &self.mode())
            .finish()
    }
}
