//! TEO header parsing and grid file handle

use super::grid::Grid;
use super::names::GridField;
use crate::ado::{AdoFile, BlockReader, LineSource, Mode, SEPARATOR_PREFIX};
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info};

/// Read the TEO preamble: a title line, then `key = value` lines up to a separator
pub fn read_header<R: BufRead>(lines: &mut LineSource<R>) -> Result<Vec<(String, i64)>> {
    lines.skip(1, "grid title")?;

    let mut header = Vec::new();
    loop {
        let line = lines.require("grid header entry or separator")?;
        if line.starts_with(SEPARATOR_PREFIX) {
            return Ok(header);
        }
        let entry = line.split_once('=').and_then(|(key, value)| {
            let value = value.trim().parse::<i64>().ok()?;
            Some((key.trim().to_string(), value))
        });
        match entry {
            Some(entry) => {
                debug!(key = %entry.0, value = entry.1, "grid header entry");
                header.push(entry);
            }
            None => {
                return Err(Error::Format {
                    location: lines.location(),
                    reason: format!("expected <key> = <integer>, found {line:?}"),
                });
            }
        }
    }
}

/// Read and assemble a grid from a TEO stream
pub fn read_grid<R: BufRead>(reader: R, origin: impl Into<String>) -> Result<Grid> {
    let mut lines = LineSource::new(reader, origin);
    let header = read_header(&mut lines)?;
    let mut blocks = BlockReader::from_lines(lines);

    let mut fields = BTreeMap::new();
    while let Some(block) = blocks.read_block()? {
        let field = GridField::from_block_name(&block.name).ok_or_else(|| {
            Error::UnknownBlockName {
                location: blocks.location(),
                name: block.name.clone(),
            }
        })?;
        fields.insert(field, block.value);
    }

    let grid = Grid::from_blocks(blocks.origin(), header, fields)?;
    info!(
        origin = blocks.origin(),
        nodes = grid.node_count(),
        elements = grid.element_count(),
        "assembled grid"
    );
    Ok(grid)
}

/// TEO grid file handle
#[derive(Debug)]
pub struct TeoFile {
    file: AdoFile,
}

impl TeoFile {
    /// Open a grid file in the given mode
    pub fn open(path: impl AsRef<Path>, mode: Mode) -> Result<Self> {
        Ok(Self {
            file: AdoFile::open(path, mode)?,
        })
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

    /// Read and assemble the grid from the beginning of the file
    pub fn read_grid(&mut self) -> Result<Grid> {
        let origin = self.file.origin();
        read_grid(self.file.rewound_reader("read")?, origin)
    }

    /// Writing grids is not supported
    pub fn write(&mut self, _grid: &Grid) -> Result<()> {
        self.file.writer("write")?;
        Err(Error::NotImplemented("writing TEO grid files"))
    }

    /// Release the file
    pub fn close(self) -> Result<()> {
        self.file.close()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ado::{Block, LayoutOptions, format};

    #[test]
    fn test_read_header() {
        let content = "GRID TITLE\nNUMBER NODES = 46274\nNUMBER ELEMENTS= 91250\n----\n";
        let mut lines = LineSource::new(content.as_bytes(), "grid.teo");
        let header = read_header(&mut lines).unwrap();
        assert_eq!(
            header,
            vec![
                ("NUMBER NODES".to_string(), 46274),
                ("NUMBER ELEMENTS".to_string(), 91250),
            ]
        );
        assert_eq!(lines.line_number(), 4);
    }

    #[test]
    fn test_header_needs_integer() {
        let content = "TITLE\nNUMBER NODES = many\n---\n";
        let mut lines = LineSource::new(content.as_bytes(), "grid.teo");
        let err = read_header(&mut lines).unwrap_err();
        assert_eq!(
            err.to_string(),
            "grid.teo:2: expected <key> = <integer>, found \"NUMBER NODES = many\""
        );
    }

    #[test]
    fn test_header_without_separator() {
        let mut lines = LineSource::new("TITLE\nA = 1\n".as_bytes(), "grid.teo");
        assert!(matches!(read_header(&mut lines), Err(Error::Format { .. })));
    }

    #[test]
    fn test_unknown_block_name() {
        let content = "TITLE\nA = 1\n---\n*SET*MYSTERY\n1\n1\nENDSET\n";
        let err = read_grid(content.as_bytes(), "grid.teo").unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownBlockName { ref name, .. } if name == "MYSTERY"
        ));
    }

    fn square_teo() -> String {
        let blocks = vec![
            Block::array("X-COORDINATES NODES=", vec![0.0, 1.0, 1.0, 0.0]),
            Block::array("Y-COORDINATES NODES=", vec![0.0, 0.0, 1.0, 1.0]),
            Block::array("ELEMENT NODES 1=====", vec![1_i64, 1]),
            Block::array("ELEMENT NODES 2=====", vec![2_i64, 3]),
            Block::array("ELEMENT NODES 3=====", vec![3_i64, 4]),
            Block::array("ELEMENT AREA========", vec![0.5, 0.5]),
            Block::array("NODE INFLUENCE AREA=", vec![0.25; 4]),
            Block::array("SOURCE NODES========", Vec::<i64>::new()),
            Block::array("NUMBER NODES/RIVER==", vec![2_i64]),
            Block::array("LIST RIVER NODES====", vec![3_i64, 4]),
            Block::array("LIST BOUNDARY NODES=", vec![1_i64, 2, 3, 4]),
            Block::array("BOUNDARY SEGMENTS===", vec![4_i64]),
            Block::array("RIVERID", vec!["WAAL".to_string()]),
        ];
        let mut text = String::from("SQUARE\nNUMBER NODES = 4\nNUMBER ELEMENTS = 2\n");
        text.push_str(&format(&blocks, &LayoutOptions::default()).unwrap());
        text
    }

    #[test]
    fn test_read_square_grid() {
        let grid = read_grid(square_teo().as_bytes(), "square.teo").unwrap();
        assert_eq!(grid.header_value("NUMBER ELEMENTS"), Some(2));
        assert_eq!(grid.elem3, vec![2, 3]);
        assert!(grid.source_nodes.is_empty());
        assert_eq!(grid.riverid.as_texts(), Some(&["WAAL".to_string()][..]));
        assert!(grid.rivernumber.is_empty());
    }

    #[test]
    fn test_file_modes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.teo");
        std::fs::write(&path, square_teo()).unwrap();

        let mut file = TeoFile::open(&path, Mode::Read).unwrap();
        let grid = file.read_grid().unwrap();
        assert_eq!(file.read_grid().unwrap(), grid);
        assert!(matches!(file.write(&grid), Err(Error::Mode { .. })));

        let out = dir.path().join("out.teo");
        let mut file = TeoFile::open(&out, Mode::Write).unwrap();
        assert!(matches!(file.read_grid(), Err(Error::Mode { .. })));
        assert!(matches!(file.write(&grid), Err(Error::NotImplemented(_))));
    }

    #[test]
    fn test_missing_block() {
        let err = read_grid("TITLE\n---\n".as_bytes(), "empty.teo").unwrap_err();
        assert!(matches!(err, Error::MissingBlock { .. }));
    }
}
