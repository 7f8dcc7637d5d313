//! Info command - show the dataset summary.

use std::path::{Path, PathBuf};

use colored::Colorize;

pub fn run(
    file: PathBuf,
    json_output: bool,
    config: Option<&Path>,
    max_rows: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let lens = super::lens(config, max_rows)?;
    let (summary, source) = lens.summarize(&file)?;

    if json_output {
        let info = serde_json::json!({
            "source": source,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Dataset".cyan().bold(),
        source.file.white()
    );
    println!();
    println!("  Format:        {}", source.format);
    println!("  Rows:          {}", summary.rows.to_string().white().bold());
    println!("  Columns:       {}", summary.columns.to_string().white().bold());
    println!("  Missing cells: {}", summary.missing_total.to_string().yellow());
    println!("  Columns:       {}", summary.column_names.join(", "));

    if summary.has_date_columns {
        println!("  Date columns:  {}", summary.date_columns.join(", ").green());
    } else {
        println!("  Date columns:  {}", "none".dimmed());
    }

    Ok(())
}
