//! Analyze command - run every analysis and export the report.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use sheetlens::report::select_sheet;
use tracing::debug;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    only: Option<String>,
    json_output: bool,
    config: Option<&Path>,
    max_rows: Option<usize>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let lens = super::lens(config, max_rows)?;

    if !json_output {
        println!(
            "{} {}",
            "Analyzing".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let outcome = lens.analyze(&file)?;

    let output_dir = output.unwrap_or_else(|| {
        let mut p = file.clone();
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        p.set_file_name(format!("{}_analysis", stem));
        p
    });
    debug!(dir = %output_dir.display(), "exporting report");

    if let Some(query) = only {
        let sheets = outcome.sheets();
        let sheet = select_sheet(&sheets, &query).ok_or("Report has no sheets")?;
        fs::create_dir_all(&output_dir)?;
        let path = output_dir.join(format!("{}.csv", sheet.name));
        sheet.write_csv(&path)?;
        if !json_output {
            println!(
                "{} {}",
                "Saved".green().bold(),
                path.display().to_string().white()
            );
        }
    } else {
        let written = outcome.export(&output_dir)?;
        if !json_output {
            println!(
                "{} {} files to {}",
                "Saved".green().bold(),
                written.len(),
                output_dir.display().to_string().white()
            );
        }
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "{} rows, {} columns, {} missing cells",
        outcome.summary.rows.to_string().white().bold(),
        outcome.summary.columns.to_string().white().bold(),
        outcome.summary.missing_total.to_string().yellow()
    );

    for (category, entries) in &outcome.report.categories {
        if entries.is_empty() {
            continue;
        }
        println!();
        println!("{}", category.label().to_uppercase().yellow().bold());

        for (name, entry) in entries {
            println!("  {}", name.cyan().bold());
            if verbose {
                println!(
                    "    {} rows x {} columns",
                    entry.data.row_count(),
                    entry.data.columns.len()
                );
            }
            for insight in &entry.insights {
                println!("    {} {}", "•".blue(), insight);
            }
            for recommendation in &entry.recommendations {
                println!("    {} {}", "→".green(), recommendation);
            }
        }
    }

    Ok(())
}
