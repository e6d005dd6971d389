//! adoflo binary entry point.
//!
//! Parses command-line arguments, initializes logging and dispatches to the
//! command handlers in the `adoflo_cli` library.

use adoflo_cli::{LayoutArgs, OutputFormat, Variant, commands};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "adoflo",
    about = "Inspect and rewrite ADO, FLO and TEO groundwater model files",
    version,
    long_about = "A command-line tool for the fixed-width block formats used to exchange groundwater model grids (TEO), model data (ADO) and results (FLO)."
)]
struct Cli {
    /// Set the logging level
    #[arg(short, long, value_enum, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Output format
    #[arg(short = 'o', long, value_enum, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the blocks of an ADO or FLO file
    List {
        /// File to read
        file: PathBuf,

        /// File variant
        #[arg(short, long, value_enum, default_value = "ado")]
        variant: Variant,
    },

    /// Show the header and mesh counts of a TEO grid file
    Grid {
        /// Grid file to read
        file: PathBuf,
    },

    /// Read a block file and write it again with the configured layout
    Rewrite {
        /// File to read
        input: PathBuf,

        /// File to write
        output: PathBuf,

        /// File variant
        #[arg(short, long, value_enum, default_value = "ado")]
        variant: Variant,

        /// Append the END FILE GRIDFL sentinel
        #[arg(long)]
        end_of_file: bool,
    },

    /// Write a JSON array of block records as an ADO file
    Import {
        /// JSON file with block records
        input: PathBuf,

        /// ADO file to write
        output: PathBuf,

        /// Append the END FILE GRIDFL sentinel
        #[arg(long)]
        end_of_file: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level: Level = cli.log_level.into();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.as_str())),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::List { file, variant } => {
            commands::list::handle(&file, variant, cli.format, &mut stdout)?;
        }
        Commands::Grid { file } => {
            commands::grid::handle(&file, cli.format, &mut stdout)?;
        }
        Commands::Rewrite {
            input,
            output,
            variant,
            end_of_file,
        } => {
            let options = cli.layout.to_options()?;
            let count =
                commands::rewrite::rewrite(&input, &output, variant, &options, end_of_file)?;
            writeln!(stdout, "wrote {count} blocks to {}", output.display())?;
        }
        Commands::Import {
            input,
            output,
            end_of_file,
        } => {
            let options = cli.layout.to_options()?;
            let count = commands::import::import(&input, &output, &options, end_of_file)?;
            writeln!(stdout, "wrote {count} blocks to {}", output.display())?;
        }
    }

    Ok(())
}
