//! ADO block format support
//!
//! ADO is the base block-structured text format shared by the grid (TEO) and
//! result (FLO) files. A file is a sequence of named blocks, each holding
//! either one scalar value or one fixed-width array.
//!
//! # Format Overview
//!
//! Every block is framed by the same five parts:
//!
//! ```text
//! ------------------------------------------------------------------------
//! *SET*RL1
//! 2
//! 7         (6E14.6)
//!  +1.000000E+00 +2.000000E+00 +3.000000E+00 +4.000000E+00 +5.000000E+00 +6.000000E+00
//!  +7.000000E+00
//! ENDSET
//! ```
//!
//! - a separator line of dashes
//! - the name, prefixed by `*SET*` (numbers) or `*TEXT*` (text)
//! - the block kind, `1` for scalars and `2` for arrays
//! - the value: one line for a scalar, an array header plus data rows otherwise
//! - the end marker `ENDSET` or `ENDTEXT`
//!
//! A stream may be terminated by an `END FILE GRIDFL` line.
//!
//! # Example
//!
//! ```
//! use adoflo_formats::ado::{format, parse, Block, LayoutOptions};
//!
//! let blocks = vec![
//!     Block::scalar("NODES", 3_i64),
//!     Block::array("RL1", vec![1.0, 2.5, -3.0]),
//! ];
//! let text = format(&blocks, &LayoutOptions::default()).expect("encodable blocks");
//! assert!(text.contains("*SET*NODES\n1\n3\nENDSET"));
//!
//! let decoded = parse(&text).expect("valid ADO text");
//! assert_eq!(decoded, blocks);
//! ```

mod block;
mod file;
mod layout;
pub(crate) mod lines;
mod reader;
mod value;
mod writer;

use std::fmt;

pub use block::{Block, BlockKind, BlockRecord};
pub(crate) use block::check_record_kind;
pub use file::AdoFile;
pub use layout::{
    ArrayFormat, DEFAULT_COLUMN_COUNT, DEFAULT_FIELD_WIDTH, DEFAULT_PRECISION, LayoutError,
    LayoutOptions, format_scientific,
};
pub use lines::{LineSource, Location};
pub use reader::{BlockReader, parse};
pub use value::{ArrayValues, BlockValue, ElementKind, Scalar};
pub use writer::{BlockWriter, encode_block, format};

/// Separator line written before every block
pub const SEPARATOR: &str =
    "------------------------------------------------------------------------";
/// Any line starting with this prefix is a separator on read
pub const SEPARATOR_PREFIX: &str = "---";
/// Name prefix of blocks holding numbers
pub const SET_MARKER: &str = "*SET*";
/// Name prefix of blocks holding text
pub const TEXT_MARKER: &str = "*TEXT*";
/// End marker of blocks holding numbers
pub const END_SET: &str = "ENDSET";
/// End marker of blocks holding text
pub const END_TEXT: &str = "ENDTEXT";
/// Sentinel line terminating a block stream
pub const END_OF_FILE: &str = "END FILE GRIDFL";

/// Direction a file handle was opened for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Decode blocks from an existing file
    Read,
    /// Encode blocks into a new file, truncating any existing one
    Write,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::Write => f.write_str("write"),
        }
    }
}

/// Open an ADO file for reading or writing
pub fn open(path: impl AsRef<std::path::Path>, mode: Mode) -> crate::Result<AdoFile> {
    AdoFile::open(path, mode)
}
