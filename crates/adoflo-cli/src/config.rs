//! Array layout configuration.
//!
//! Layout options come from CLI arguments, then environment variables, then
//! the library defaults (`6E14.6` for floats).
//!
//! # Example
//!
//! ```
//! use adoflo_cli::LayoutArgs;
//! use clap::Parser;
//!
//! #[derive(Parser)]
//! struct Cli {
//!     #[command(flatten)]
//!     layout: LayoutArgs,
//! }
//!
//! let cli = Cli::parse_from(["adoflo", "--column-count", "4"]);
//! let options = cli.layout.to_options().unwrap();
//! assert_eq!(options.column_count, 4);
//! ```

use adoflo_formats::ado::{
    DEFAULT_COLUMN_COUNT, DEFAULT_FIELD_WIDTH, DEFAULT_PRECISION, LayoutOptions,
};
use clap::Args;

/// Layout flags shared by every command that writes files
#[derive(Debug, Clone, Copy, Args)]
pub struct LayoutArgs {
    /// Fields per array row
    #[arg(
        long,
        global = true,
        env = "ADOFLO_COLUMN_COUNT",
        default_value_t = DEFAULT_COLUMN_COUNT
    )]
    pub column_count: usize,

    /// Characters per array field
    #[arg(
        long,
        global = true,
        env = "ADOFLO_FIELD_WIDTH",
        default_value_t = DEFAULT_FIELD_WIDTH
    )]
    pub field_width: usize,

    /// Fractional digits for float arrays
    #[arg(
        long,
        global = true,
        env = "ADOFLO_PRECISION",
        default_value_t = DEFAULT_PRECISION
    )]
    pub precision: usize,
}

impl Default for LayoutArgs {
    fn default() -> Self {
        Self {
            column_count: DEFAULT_COLUMN_COUNT,
            field_width: DEFAULT_FIELD_WIDTH,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl LayoutArgs {
    /// Build validated layout options.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLayout` if the column count or field width is zero.
    pub fn to_options(&self) -> adoflo_formats::Result<LayoutOptions> {
        let options = LayoutOptions::default()
            .with_column_count(self.column_count)
            .with_field_width(self.field_width)
            .with_precision(self.precision);
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use adoflo_formats::Error;

    #[test]
    fn test_defaults_match_library() {
        let options = LayoutArgs::default().to_options().unwrap();
        assert_eq!(options, LayoutOptions::default());
    }

    #[test]
    fn test_zero_width_rejected() {
        let args = LayoutArgs {
            field_width: 0,
            ..LayoutArgs::default()
        };
        assert!(matches!(args.to_options(), Err(Error::InvalidLayout(_))));
    }
}
