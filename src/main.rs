use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use value_eval::config::Config;
use value_eval::constants::{expected_value_column, mapped_column_for, ANNOTATION_CATEGORIES};
use value_eval::logging;
use value_eval::PredictionLoader;

#[derive(Parser)]
#[command(name = "value-eval")]
#[command(about = "Load and normalize value-category prediction CSVs")]
#[command(version = "0.1.0")]
struct Cli {
    /// Configuration file (defaults are used if it doesn't exist)
    #[arg(long, global = true, default_value = "value_eval.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a predictions CSV and summarize it
    Load {
        /// Path to the predictions CSV
        csv: PathBuf,
        /// Name to attach to the predictions (overrides the config file)
        #[arg(long)]
        model: Option<String>,
        /// Print the full prediction set as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the canonical categories and their value-column headers
    Categories,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let _guard = logging::init_logging(&config.logging);

    match cli.command {
        Commands::Load { csv, model, json } => {
            let mut loader_config = config.loader.clone();
            if let Some(model) = model {
                loader_config.model_name = model;
            }
            let loader = PredictionLoader::from_config(&loader_config)?;

            let outcome = loader
                .load_with_report(&csv)
                .with_context(|| format!("loading predictions from {}", csv.display()))?;
            info!("Load finished");

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.predictions)?);
                return Ok(());
            }

            let report = &outcome.report;
            println!("\n📊 Predictions for {}:", outcome.predictions.model_name);
            println!(
                "   Layout: linked={}, value_columns={}",
                report.layout.linked, report.layout.value_columns
            );
            println!("   Rows read: {}", report.rows_read);
            println!("   Loaded: {}", outcome.predictions.len());
            println!("   Skipped (no video id): {}", report.skipped_rows);
            println!("   Parse errors: {}", report.parse_errors.len());
            println!("   Unexpected values: {}", report.unexpected_values.len());

            if !report.column_mismatches.is_empty() {
                println!("\n⚠️  Column case mismatches:");
                for mismatch in &report.column_mismatches {
                    println!(
                        "   - {}: expected '{}', found '{}'",
                        mismatch.category, mismatch.expected, mismatch.found
                    );
                }
            }
            if !report.unresolved_categories.is_empty() {
                println!(
                    "\n   Categories without a column (read as 0): {}",
                    report.unresolved_categories.join(", ")
                );
            }
            if report.has_losses() {
                warn!(
                    "{} of {} rows were not loaded",
                    report.skipped_rows + report.parse_errors.len(),
                    report.rows_read
                );
            }
        }
        Commands::Categories => {
            for category in ANNOTATION_CATEGORIES {
                let column = mapped_column_for(category)
                    .map(str::to_string)
                    .unwrap_or_else(|| expected_value_column(category));
                println!("{:<28} {}", category, column);
            }
        }
    }

    Ok(())
}
