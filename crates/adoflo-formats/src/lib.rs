//! Readers and writers for block-structured groundwater model files
//!
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::doc_markdown)] // Block names and format letters don't need backticks
#![allow(clippy::cast_precision_loss)] // Integer arrays read as coordinates
#![allow(clippy::missing_errors_doc)] // Every fallible operation returns crate::Error
#![allow(clippy::return_self_not_must_use)] // Builder patterns
//! This crate reads and writes a family of fixed-width, block-structured
//! text formats used to exchange grid and result data of groundwater models.
//!
//! # Supported Formats
//!
//! - **ADO**: the base block format, a sequence of named scalar and array
//!   blocks with fixed-width array layouts
//! - **FLO**: result files, either steady-state or transient with a model
//!   time embedded in every block name
//! - **TEO**: triangular mesh grids, assembled into a single [`teo::Grid`]
//!
//! # Design Principles
//!
//! - **Lazy Reading**: blocks are decoded one at a time from any `BufRead`
//! - **Exact Layout**: array headers, field widths and row wrapping are
//!   reproduced on write
//! - **Located Errors**: every read error names the source, line and block
//! - **Round-Trip Guarantee**: parse(format(blocks)) == blocks, with floats
//!   kept to the written precision

#![warn(missing_docs)]

/// ADO block format: scalar and array codecs, block reader and writer
///
/// See the [`ado`] module for the block grammar and usage examples.
pub mod ado;
/// Error types shared by all formats
pub mod error;
/// FLO result files, steady-state and transient
pub mod flo;
/// TEO triangular mesh grids
pub mod teo;

pub use error::{Error, Result};
