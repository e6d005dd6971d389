//! Error types for reading and writing block-structured files

use crate::ado::lines::Location;
use crate::ado::Mode;
use thiserror::Error;

/// Result type for block file operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing ADO, FLO and TEO files
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed separator, end marker, array header, data row or value
    #[error("{location}: {reason}")]
    Format {
        /// Where the offending line was read
        location: Location,
        /// What was wrong with it
        reason: String,
    },

    /// Block kind line held an integer other than 1 (scalar) or 2 (array)
    #[error("{location}: unknown block kind {kind}")]
    UnknownBlockKind {
        /// Where the kind line was read
        location: Location,
        /// The integer found
        kind: i64,
    },

    /// Array header declared an element type other than A, E or I
    #[error("{location}: unsupported array element type '{element}'")]
    UnsupportedElementType {
        /// Where the array header was read
        location: Location,
        /// The type letter found
        element: char,
    },

    /// Block record carried a block type outside {1, 2}
    #[error("block '{name}' has unknown block type {kind}")]
    UnknownRecordKind {
        /// Block name from the record
        name: String,
        /// The block type found
        kind: i64,
    },

    /// Block record declared a block type that disagrees with its values
    #[error("block '{name}' declares block type {kind} but holds {found} values")]
    KindMismatch {
        /// Block name from the record
        name: String,
        /// Declared block type
        kind: i64,
        /// Shape of the values actually supplied
        found: &'static str,
    },

    /// TEO block name missing from the grid name table
    #[error("{location}: unknown grid block name '{name}'")]
    UnknownBlockName {
        /// Where the block ended
        location: Location,
        /// The block name found
        name: String,
    },

    /// TEO file lacks a block the grid cannot be assembled without
    #[error("{origin}: missing grid block '{name}'")]
    MissingBlock {
        /// Label of the grid source
        origin: String,
        /// The block name expected
        name: &'static str,
    },

    /// TEO blocks were read but do not form a consistent mesh
    #[error("{origin}: invalid grid: {reason}")]
    InvalidGrid {
        /// Label of the grid source
        origin: String,
        /// What is inconsistent
        reason: String,
    },

    /// Handle opened in one mode was used for the other direction
    #[error("cannot {operation} {path}: file is open in {mode} mode")]
    Mode {
        /// File path
        path: String,
        /// Mode the file was opened in
        mode: Mode,
        /// Operation that was attempted
        operation: &'static str,
    },

    /// Operation exists in the API but the format does not support it
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// Encoded array element does not fit its fixed-width field
    #[error("value {value} does not fit in a field of width {width}")]
    FieldOverflow {
        /// The formatted value
        value: String,
        /// Field width it had to fit
        width: usize,
    },

    /// Layout options cannot describe a valid array format
    #[error("invalid layout options: {0}")]
    InvalidLayout(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_message() {
        let err = Error::Format {
            location: Location::new("RL1.ado", 12).in_block("RL1"),
            reason: "expected ENDSET or ENDTEXT, found \"ENDSTE\"".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "RL1.ado:12 (block 'RL1'): expected ENDSET or ENDTEXT, found \"ENDSTE\""
        );
    }

    #[test]
    fn test_mode_error_message() {
        let err = Error::Mode {
            path: "out.ado".to_string(),
            mode: Mode::Write,
            operation: "read",
        };
        assert_eq!(
            err.to_string(),
            "cannot read out.ado: file is open in write mode"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
