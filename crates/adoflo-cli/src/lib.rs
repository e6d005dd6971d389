//! adoflo command-line library
//!
//! Command handlers and output helpers behind the `adoflo` binary. Each
//! handler writes to a caller-supplied sink so it can be driven from tests.

pub mod commands;
pub mod config;
pub mod output;

pub use config::LayoutArgs;

/// Output format options for the CLI
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text tables
    Text,
    /// JSON output
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

/// Which flavour of block file to read or write
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// Plain ADO block file
    #[default]
    Ado,
    /// Steady-state FLO result file with a separator header
    Steady,
    /// Transient FLO result file with a time in every block name
    Transient,
}
