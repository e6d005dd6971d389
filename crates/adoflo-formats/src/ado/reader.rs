//! Block stream decoding

use crate::ado::block::{Block, BlockKind};
use crate::ado::layout::{ArrayFormat, PREALLOCATE_LIMIT};
use crate::ado::lines::{LineSource, Location};
use crate::ado::value::{BlockValue, Scalar};
use crate::ado::{END_OF_FILE, END_SET, END_TEXT, SEPARATOR_PREFIX, SET_MARKER, TEXT_MARKER};
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::iter::FusedIterator;
use tracing::debug;

/// Lazy, forward-only reader of blocks from a line stream
///
/// The reader is also an iterator of `Result<Block>`. Iteration ends at the
/// `END FILE GRIDFL` sentinel, at end of input between blocks, or right after
/// the first error.
pub struct BlockReader<R> {
    lines: LineSource<R>,
    finished: bool,
}

impl<R: BufRead> BlockReader<R> {
    /// Create a reader, labelling the source `origin` in errors
    pub fn new(reader: R, origin: impl Into<String>) -> Self {
        Self::from_lines(LineSource::new(reader, origin))
    }

    /// Create a reader over an existing line source
    pub const fn from_lines(lines: LineSource<R>) -> Self {
        Self {
            lines,
            finished: false,
        }
    }

    /// Underlying line source, for callers that consume a preamble first
    pub const fn lines_mut(&mut self) -> &mut LineSource<R> {
        &mut self.lines
    }

    /// Label of the source
    pub fn origin(&self) -> &str {
        self.lines.origin()
    }

    /// Location of the most recently read line
    pub fn location(&self) -> Location {
        self.lines.location()
    }

    /// Read the next block, or `None` at the end of the stream
    pub fn read_block(&mut self) -> Result<Option<Block>> {
        let Some(name) = self.read_name()? else {
            return Ok(None);
        };

        let kind = self.read_kind(&name)?;
        let value = match kind {
            BlockKind::Scalar => {
                let line = self.require(&name, "scalar value")?;
                BlockValue::Scalar(Scalar::decode(&line))
            }
            BlockKind::Array => self.read_array(&name)?,
        };
        self.read_end_marker(&name)?;

        debug!(
            block = %name,
            kind = %kind,
            element = %value.element_kind(),
            count = value.len(),
            "read block"
        );
        Ok(Some(Block { name, value }))
    }

    /// Read the remaining blocks into a name to block map
    ///
    /// When a name occurs more than once the last block wins.
    pub fn read_as_mapping(self) -> Result<BTreeMap<String, Block>> {
        let mut mapping = BTreeMap::new();
        for block in self {
            let block = block?;
            mapping.insert(block.name.clone(), block);
        }
        Ok(mapping)
    }

    fn read_name(&mut self) -> Result<Option<String>> {
        loop {
            let Some(line) = self.lines.next_line()? else {
                debug!(
                    origin = self.lines.origin(),
                    line = self.lines.line_number(),
                    "end of input without {END_OF_FILE} sentinel"
                );
                return Ok(None);
            };
            if line.starts_with(SEPARATOR_PREFIX) {
                continue;
            }
            if line.trim_end() == END_OF_FILE {
                return Ok(None);
            }
            return Ok(Some(line.replace(SET_MARKER, "").replace(TEXT_MARKER, "")));
        }
    }

    fn read_kind(&mut self, name: &str) -> Result<BlockKind> {
        let line = self.require(name, "block kind")?;
        let code = line.trim().parse::<i64>().map_err(|_| Error::Format {
            location: self.block_location(name),
            reason: format!("expected block kind 1 or 2, found {line:?}"),
        })?;
        BlockKind::from_code(code).ok_or_else(|| Error::UnknownBlockKind {
            location: self.block_location(name),
            kind: code,
        })
    }

    fn read_array(&mut self, name: &str) -> Result<BlockValue> {
        let header = self.require(name, "array header")?;
        let (count, format) =
            ArrayFormat::parse_header(&header).map_err(|err| err.at(self.block_location(name)))?;

        let first_row = self.lines.line_number() + 1;
        let row_count = format.row_count(count);
        let mut rows = Vec::with_capacity(row_count.min(PREALLOCATE_LIMIT));
        for _ in 0..row_count {
            rows.push(self.require(name, "array row")?);
        }

        let values = format
            .decode_rows(count, rows.iter().map(String::as_str))
            .map_err(|err| {
                let line = err
                    .row()
                    .map_or_else(|| self.lines.line_number(), |row| first_row + row);
                err.at(Location::new(self.lines.origin(), line).in_block(name))
            })?;
        Ok(BlockValue::Array(values))
    }

    fn read_end_marker(&mut self, name: &str) -> Result<()> {
        let line = self.require(name, "end marker")?;
        if line != END_SET && line != END_TEXT {
            return Err(Error::Format {
                location: self.block_location(name),
                reason: format!("expected {END_SET} or {END_TEXT}, found {line:?}"),
            });
        }
        Ok(())
    }

    fn require(&mut self, name: &str, expected: &str) -> Result<String> {
        match self.lines.next_line()? {
            Some(line) => Ok(line),
            None => Err(Error::Format {
                location: self.block_location(name),
                reason: format!("unexpected end of input, expected {expected}"),
            }),
        }
    }

    fn block_location(&self, name: &str) -> Location {
        self.lines.location().in_block(name)
    }
}

impl<R: BufRead> Iterator for BlockReader<R> {
    type Item = Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_block() {
            Ok(Some(block)) => Some(Ok(block)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for BlockReader<R> {}

/// Parse all blocks from a string
pub fn parse(content: &str) -> Result<Vec<Block>> {
    BlockReader::new(content.as_bytes(), "<string>").collect()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ado::value::ArrayValues;
    use crate::ado::SEPARATOR;

    fn reader(content: &str) -> BlockReader<&[u8]> {
        BlockReader::new(content.as_bytes(), "test.ado")
    }

    #[test]
    fn test_read_scalar_blocks() {
        let content = format!(
            "{SEPARATOR}\n*SET*NODES\n1\n46274\nENDSET\n{SEPARATOR}\n*TEXT*TITLE\n1\nGRID 1\nENDTEXT\n"
        );
        let blocks = parse(&content).unwrap();
        assert_eq!(
            blocks,
            vec![
                Block::scalar("NODES", 46274_i64),
                Block::scalar("TITLE", "GRID 1"),
            ]
        );
    }

    #[test]
    fn test_read_array_block() {
        let content = "---\n*SET*IDS\n2\n4         (3I5)\n    1    2    3\n    4\nENDSET\n";
        let blocks = parse(content).unwrap();
        assert_eq!(blocks, vec![Block::array("IDS", vec![1_i64, 2, 3, 4])]);
    }

    #[test]
    fn test_sentinel_ends_stream() {
        let content = "---\n*SET*A\n1\n1\nENDSET\nEND FILE GRIDFL\n*SET*B\n1\n2\nENDSET\n";
        let blocks = parse(content).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].name, "A");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("------\n---\n").unwrap().is_empty());
    }

    #[test]
    fn test_empty_array() {
        let content = "---\n*TEXT*NAMES\n2\n0         (6A14)\nENDTEXT\n";
        let blocks = parse(content).unwrap();
        assert_eq!(blocks[0].value, BlockValue::Array(ArrayValues::Text(Vec::new())));
    }

    #[test]
    fn test_bad_end_marker_names_location() {
        let content = "---\n*SET*RL1\n1\n1.5\nENDSTE\n";
        let err = parse(content).unwrap_err();
        assert_eq!(
            err.to_string(),
            "<string>:5 (block 'RL1'): expected ENDSET or ENDTEXT, found \"ENDSTE\""
        );
    }

    #[test]
    fn test_unknown_block_kind() {
        let err = parse("---\n*SET*X\n3\n1\nENDSET\n").unwrap_err();
        assert!(matches!(err, Error::UnknownBlockKind { kind: 3, .. }));
    }

    #[test]
    fn test_non_integer_block_kind() {
        let err = parse("---\n*SET*X\none\n1\nENDSET\n").unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
    }

    #[test]
    fn test_unsupported_element_type() {
        let err = parse("---\n*SET*X\n2\n1 (1F10.2)\n      1.00\nENDSET\n").unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedElementType { element: 'F', .. }
        ));
    }

    #[test]
    fn test_short_row_reports_row_line() {
        let content = "---\n*SET*IDS\n2\n4 (3I5)\n    1    2    3\n   4\nENDSET\n";
        let err = parse(content).unwrap_err();
        match err {
            Error::Format { location, .. } => {
                assert_eq!(location.line, 6);
                assert_eq!(location.block.as_deref(), Some("IDS"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_truncated_block() {
        let err = parse("---\n*SET*IDS\n2\n7 (6I5)\n    1    2    3    4    5    6\n").unwrap_err();
        assert!(err.to_string().contains("unexpected end of input, expected array row"));
    }

    #[test]
    fn test_huge_count_with_missing_rows() {
        let err = parse("---\n*SET*X\n2\n99999999999999999 (6I14)\n     1\nENDSET\n").unwrap_err();
        match err {
            Error::Format { location, reason } => {
                assert_eq!(location.block.as_deref(), Some("X"));
                assert_eq!(location.line, 6);
                assert!(reason.contains("expected array row"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_overflowing_row_width_is_format_error() {
        let err = parse("---\n*SET*X\n2\n2 (2I18446744073709551615)\n1\nENDSET\n").unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
        assert!(err.to_string().contains("row width out of range"), "{err}");
    }

    #[test]
    fn test_iteration_stops_after_error() {
        let content = "---\n*SET*A\n9\n---\n*SET*B\n1\n2\nENDSET\n";
        let mut blocks = reader(content);
        assert!(blocks.next().unwrap().is_err());
        assert!(blocks.next().is_none());
        assert!(blocks.next().is_none());
    }

    #[test]
    fn test_read_as_mapping_last_wins() {
        let content = "---\n*SET*A\n1\n1\nENDSET\n---\n*SET*B\n1\n2\nENDSET\n---\n*SET*A\n1\n3\nENDSET\n";
        let mapping = reader(content).read_as_mapping().unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping["A"], Block::scalar("A", 3_i64));
    }
}
