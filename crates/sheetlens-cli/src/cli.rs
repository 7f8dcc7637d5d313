//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SheetLens: analytical reports for spreadsheet data
#[derive(Parser)]
#[command(name = "sheetlens")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON configuration file with parser and analysis settings
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum data rows to load
    #[arg(long, global = true)]
    pub max_rows: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a data file and export the report
    Analyze {
        /// Path to the data file (CSV/TSV/XLSX/XLS/ODS)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output directory for report sheets (default: <file>_analysis)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export only the first sheet whose name contains this text
        #[arg(long, value_name = "QUERY")]
        only: Option<String>,

        /// Print the report as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Show basic information about a data file
    Info {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
