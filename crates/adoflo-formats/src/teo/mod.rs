//! TEO grid file support
//!
//! A TEO file describes a triangular finite-element mesh. It starts with a
//! title line and a header of `key = integer` lines closed by a separator,
//! followed by ADO blocks whose names come from a fixed table (see
//! [`GridField`]). The blocks are folded into one [`Grid`].
//!
//! Node numbers are one-based in the file and zero-based on [`Grid`].
//! Writing grids is not supported.

mod grid;
mod names;
mod reader;

pub use grid::Grid;
pub use names::GridField;
pub use reader::{TeoFile, read_grid, read_header};

/// Open a TEO grid file
pub fn open(path: impl AsRef<std::path::Path>, mode: crate::ado::Mode) -> crate::Result<TeoFile> {
    TeoFile::open(path, mode)
}
