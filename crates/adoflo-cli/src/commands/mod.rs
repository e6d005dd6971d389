//! Command handlers for the `adoflo` binary

pub mod grid;
pub mod import;
pub mod list;
pub mod rewrite;
