//! FLO result file support
//!
//! FLO files carry model results in ADO blocks with decorated names. Two
//! variants exist:
//!
//! - **Steady**: five separator lines precede the first block, and block names
//!   end in `, STEADY-STATE==`.
//! - **Transient**: each block name embeds the output time as
//!   `<name>,TIME: <float>`.
//!
//! Both variants are thin adapters around the ADO block iterator that rewrite
//! block names on the way in and out.
//!
//! # Example
//!
//! ```
//! use adoflo_formats::ado::BlockReader;
//! use adoflo_formats::flo::TransientBlocks;
//!
//! let content = "---\n*SET*PHI1,TIME:    12.5000\n1\n0.25\nENDSET\n";
//! let blocks = BlockReader::new(content.as_bytes(), "phi.flo");
//! let timed = TransientBlocks::new(blocks)
//!     .collect::<Result<Vec<_>, _>>()
//!     .expect("valid transient block");
//! assert_eq!(timed[0].block.name, "PHI1");
//! assert_eq!(timed[0].time, 12.5);
//! ```

mod steady;
mod transient;

pub use steady::{SteadyBlocks, SteadyFloFile, clean_steady_name};
pub use transient::{
    TimedBlock, TimedRecord, TransientBlocks, TransientFloFile, decode_timed_name,
    encode_timed_name,
};

/// Suffix appended to block names in steady-state result files
pub const STEADY_SUFFIX: &str = ", STEADY-STATE==";
/// Prefix of the time part of transient block names
pub const TIME_PREFIX: &str = "TIME:";
/// Separator lines preceding the first block of a steady-state file
pub const STEADY_HEADER_LINES: usize = 5;
