//! Named blocks and their serializable record form

use crate::ado::value::{ArrayValues, BlockValue, Scalar};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Block kind tag, stored on the line after the block name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Kind `1`: one value on one line
    Scalar,
    /// Kind `2`: array header followed by data rows
    Array,
}

impl BlockKind {
    /// Integer code used in files and records
    pub const fn code(self) -> i64 {
        match self {
            Self::Scalar => 1,
            Self::Array => 2,
        }
    }

    /// Map an integer code to a block kind
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Scalar),
            2 => Some(Self::Array),
            _ => None,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.write_str("scalar"),
            Self::Array => f.write_str("array"),
        }
    }
}

/// One named unit of data in a block-structured file
///
/// The block kind is implied by the payload, so a scalar block can never
/// hold an array and vice versa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block name with the `*SET*`/`*TEXT*` marker removed
    pub name: String,
    /// Block payload
    pub value: BlockValue,
}

impl Block {
    /// Create a block from a name and payload
    pub fn new(name: impl Into<String>, value: impl Into<BlockValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a scalar block
    ///
    /// # Examples
    ///
    /// ```
    /// use adoflo_formats::ado::{Block, BlockKind};
    ///
    /// let block = Block::scalar("NODES", 46274_i64);
    /// assert_eq!(block.kind(), BlockKind::Scalar);
    /// ```
    pub fn scalar(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::new(name, BlockValue::Scalar(value.into()))
    }

    /// Create an array block
    pub fn array(name: impl Into<String>, values: impl Into<ArrayValues>) -> Self {
        Self::new(name, BlockValue::Array(values.into()))
    }

    /// Block kind implied by the payload
    pub const fn kind(&self) -> BlockKind {
        self.value.kind()
    }

    /// Convert into a record with an explicit block type code
    pub fn to_record(&self) -> BlockRecord {
        BlockRecord {
            name: self.name.clone(),
            blocktype: self.kind().code(),
            values: self.value.clone(),
        }
    }

    /// Create a block from a record, checking the block type against the values
    pub fn from_record(record: BlockRecord) -> Result<Self> {
        check_record_kind(&record.name, record.blocktype, &record.values)?;
        Ok(Self {
            name: record.name,
            value: record.values,
        })
    }
}

/// Serializable block description: name, block type code and values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// Block name
    pub name: String,
    /// Block type code: 1 for scalar, 2 for array
    pub blocktype: i64,
    /// Block payload
    pub values: BlockValue,
}

impl TryFrom<BlockRecord> for Block {
    type Error = Error;

    fn try_from(record: BlockRecord) -> Result<Self> {
        Self::from_record(record)
    }
}

impl From<Block> for BlockRecord {
    fn from(block: Block) -> Self {
        Self {
            name: block.name,
            blocktype: block.value.kind().code(),
            values: block.value,
        }
    }
}

/// Validate that a record's block type code matches its payload
pub(crate) fn check_record_kind(name: &str, blocktype: i64, values: &BlockValue) -> Result<()> {
    let kind = BlockKind::from_code(blocktype).ok_or_else(|| Error::UnknownRecordKind {
        name: name.to_string(),
        kind: blocktype,
    })?;
    if kind != values.kind() {
        return Err(Error::KindMismatch {
            name: name.to_string(),
            kind: blocktype,
            found: match values {
                BlockValue::Scalar(_) => "scalar",
                BlockValue::Array(_) => "array",
            },
        });
    }
    Ok(())
}
