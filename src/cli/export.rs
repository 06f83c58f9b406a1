//! CLI commands for data export and import

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::Local;
use clap::{Args, ValueEnum};

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_expenses_csv, export_yaml, suggested_filename};
use crate::services::Tracker;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON exchange document (importable)
    Json,
    /// YAML rendition of the exchange document
    Yaml,
    /// CSV (expenses only)
    Csv,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Csv => "csv",
        }
    }
}

/// Arguments of `expense export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path (defaults to <prefix>_<YYYY-MM-DD>.<ext> in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Write to standard output instead of a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

/// Arguments of `expense import`
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON file produced by `expense export`
    pub file: PathBuf,
}

/// Handle `expense export`
pub fn handle_export(tracker: &Tracker, settings: &Settings, args: ExportArgs) -> ExpenseResult<()> {
    if args.stdout {
        let stdout = std::io::stdout();
        let mut writer = stdout.lock();
        write_export(tracker, args.format, &mut writer)?;
        return writer.flush().map_err(|e| ExpenseError::Export(e.to_string()));
    }

    let output = args.output.unwrap_or_else(|| {
        PathBuf::from(suggested_filename(
            &settings.export_prefix,
            Local::now().date_naive(),
            args.format.extension(),
        ))
    });

    let file = File::create(&output).map_err(|e| {
        ExpenseError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    write_export(tracker, args.format, &mut writer)?;
    writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    match args.format {
        ExportFormat::Csv => {
            println!(
                "Exported {} expenses to: {}",
                tracker.expenses.expenses().len(),
                output.display()
            );
            println!("Note: CSV holds expenses only. Use JSON for a file that can be imported.");
        }
        ExportFormat::Json | ExportFormat::Yaml => {
            println!("Data exported to: {}", output.display());
        }
    }

    Ok(())
}

fn write_export<W: Write>(tracker: &Tracker, format: ExportFormat, writer: &mut W) -> ExpenseResult<()> {
    match format {
        ExportFormat::Json => {
            tracker.exchange().write_json(writer, true)?;
            writer
                .write_all(b"\n")
                .map_err(|e| ExpenseError::Export(e.to_string()))
        }
        ExportFormat::Yaml => export_yaml(&tracker.exchange(), writer),
        ExportFormat::Csv => export_expenses_csv(
            tracker.expenses.categories(),
            tracker.expenses.expenses(),
            writer,
        ),
    }
}

/// Handle `expense import`
pub fn handle_import(tracker: &mut Tracker, args: ImportArgs) -> ExpenseResult<()> {
    let text = std::fs::read_to_string(&args.file).map_err(|e| {
        ExpenseError::Import(format!("Failed to read {}: {}", args.file.display(), e))
    })?;

    let outcome = tracker.import_data(&text)?;

    println!("Data imported from: {}", args.file.display());
    println!("  Categories: {}", outcome.category_count);
    println!("  Expenses:   {}", outcome.expense_count);
    match &outcome.shopping_lists {
        Some(lists) => println!("  Shopping lists: {}", lists.len()),
        None => println!("  Shopping lists: unchanged (none in file)"),
    }
    if outcome.corrected_references > 0 {
        println!(
            "  Repaired {} inconsistent category reference(s)",
            outcome.corrected_references
        );
    }

    Ok(())
}
