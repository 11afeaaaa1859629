// Import engine entry point: parses one spreadsheet and prints a review summary.
use anyhow::Context;
use clap::Parser;
use delivery_import::config::settings::ImportSettings;
use delivery_import::services::import_service::review_export::write_review_csv;
use delivery_import::services::ImportService;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "delivery-import", version, about = "Normalize a delivery spreadsheet for review before import")]
struct Cli {
    /// Spreadsheet to import (xlsx, xls, xlsb, ods or csv)
    file: PathBuf,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the parsed rows to this CSV file for review
    #[arg(long)]
    review_csv: Option<PathBuf>,

    /// Print the full parse result as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = ImportSettings::load(cli.config.as_deref()).context("Failed to load import settings")?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    info!(file = %cli.file.display(), "Starting delivery import");

    let service = ImportService::new(settings);
    let outcome = service
        .import_file(&cli.file)
        .await
        .with_context(|| format!("Import of '{}' failed", cli.file.display()))?;

    if let Some(path) = &cli.review_csv {
        write_review_csv(&outcome.result, path)
            .with_context(|| format!("Failed to write review sheet '{}'", path.display()))?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome.result)?);
    } else {
        let summary = &outcome.summary;
        println!("Rows parsed:         {}", summary.total_rows);
        println!("Parsing errors:      {}", summary.error_count);
        println!("Rows needing review: {}", summary.rows_needing_review);
        for (status, count) in &summary.status_counts {
            println!("  {:<10} {}", status, count);
        }
        println!("  {:<10} {}", "(none)", summary.rows_without_status);
        println!("Total value:         {:.2}", summary.total_value);
        if outcome.result.has_errors() {
            println!("Errors:");
            for error in &outcome.result.errors {
                println!(
                    "  line {}{}: {}",
                    error.line,
                    error.field.as_deref().map(|f| format!(" [{}]", f)).unwrap_or_default(),
                    error.message
                );
            }
        }
    }

    Ok(())
}
