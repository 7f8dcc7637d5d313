//! SheetLens CLI - analytical reports for spreadsheet data.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "sheetlens=debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Analyze {
            file,
            output,
            only,
            json,
        } => commands::analyze::run(
            file,
            output,
            only,
            json,
            cli.config.as_deref(),
            cli.max_rows,
            cli.verbose,
        ),

        Commands::Info { file, json } => {
            commands::info::run(file, json, cli.config.as_deref(), cli.max_rows)
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "file analysis failed:".red().bold(), e);
        std::process::exit(1);
    }
}
