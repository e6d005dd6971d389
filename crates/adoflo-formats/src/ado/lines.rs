//! Sequential line source with position tracking

use crate::error::{Error, Result};
use std::fmt;
use std::io::BufRead;

/// Position of a line within a named source, used in error messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Label of the source, usually a file path
    pub origin: String,
    /// 1-based line number (0 before the first line is read)
    pub line: usize,
    /// Name of the block being decoded, if known
    pub block: Option<String>,
}

impl Location {
    /// Create a location outside any block
    pub fn new(origin: impl Into<String>, line: usize) -> Self {
        Self {
            origin: origin.into(),
            line,
            block: None,
        }
    }

    /// Attach the name of the block being decoded
    #[must_use]
    pub fn in_block(mut self, name: impl Into<String>) -> Self {
        self.block = Some(name.into());
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.origin, self.line)?;
        if let Some(block) = &self.block {
            write!(f, " (block '{block}')")?;
        }
        Ok(())
    }
}

/// Forward-only source of lines with line endings removed
///
/// Every line handed out has its trailing `\n` and `\r` stripped. The source
/// counts lines so that decoders can report where a fault was found.
pub struct LineSource<R> {
    reader: R,
    origin: String,
    line: usize,
    buffer: String,
}

impl<R: BufRead> LineSource<R> {
    /// Wrap a buffered reader, labelling it `origin` in errors
    pub fn new(reader: R, origin: impl Into<String>) -> Self {
        Self {
            reader,
            origin: origin.into(),
            line: 0,
            buffer: String::new(),
        }
    }

    /// Read the next line, or `None` at end of input
    pub fn next_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        if self.reader.read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        let trimmed = self.buffer.trim_end_matches(['\n', '\r']);
        Ok(Some(trimmed.to_string()))
    }

    /// Read the next line, treating end of input as a format error
    pub fn require(&mut self, expected: &str) -> Result<String> {
        match self.next_line()? {
            Some(line) => Ok(line),
            None => Err(Error::Format {
                location: self.location(),
                reason: format!("unexpected end of input, expected {expected}"),
            }),
        }
    }

    /// Discard `count` lines, failing if the input ends first
    pub fn skip(&mut self, count: usize, expected: &str) -> Result<()> {
        for _ in 0..count {
            let text = self.require(expected)?;
            tracing::trace!(line = self.line, "skipped {expected}: {text}");
        }
        Ok(())
    }

    /// Location of the most recently read line
    pub fn location(&self) -> Location {
        Location::new(self.origin.clone(), self.line)
    }

    /// Label of this source
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Number of lines read so far
    pub const fn line_number(&self) -> usize {
        self.line
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_line_endings() {
        let mut source = LineSource::new("first\r\nsecond\nthird".as_bytes(), "mem");
        assert_eq!(source.next_line().unwrap().as_deref(), Some("first"));
        assert_eq!(source.next_line().unwrap().as_deref(), Some("second"));
        assert_eq!(source.next_line().unwrap().as_deref(), Some("third"));
        assert_eq!(source.next_line().unwrap(), None);
        assert_eq!(source.line_number(), 3);
    }

    #[test]
    fn test_keeps_trailing_spaces() {
        let mut source = LineSource::new("abc   \n".as_bytes(), "mem");
        assert_eq!(source.next_line().unwrap().as_deref(), Some("abc   "));
    }

    #[test]
    fn test_require_at_end_of_input() {
        let mut source = LineSource::new("only\n".as_bytes(), "grid.teo");
        source.require("title").unwrap();
        let err = source.require("header").unwrap_err();
        assert_eq!(
            err.to_string(),
            "grid.teo:1: unexpected end of input, expected header"
        );
    }

    #[test]
    fn test_skip() {
        let mut source = LineSource::new("a\nb\nc\n".as_bytes(), "mem");
        source.skip(2, "header line").unwrap();
        assert_eq!(source.next_line().unwrap().as_deref(), Some("c"));
        assert!(source.skip(1, "header line").is_err());
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::new("a.ado", 3).to_string(), "a.ado:3");
        assert_eq!(
            Location::new("a.ado", 3).in_block("PHI1").to_string(),
            "a.ado:3 (block 'PHI1')"
        );
    }
}
