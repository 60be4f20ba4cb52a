use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use configuration::{Config, RunOverrides, init_logging, load_config, load_config_from};
use export::TableRow;
use std::path::{Path, PathBuf};

/// The main entry point for the synthetic equity fixture generator.
fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let overrides = match &cli.command {
        Commands::Generate(args) => &args.overrides,
        Commands::Preview(args) => &args.overrides,
    };
    let config = prepare_config(cli.config.as_deref(), overrides)?;

    // Dropping the guard flushes any buffered file output.
    let _log_guard = init_logging(&config.logging).context("Failed to initialise logging")?;

    // Execute the appropriate command
    match cli.command {
        Commands::Generate(_) => handle_generate(&config),
        Commands::Preview(args) => handle_preview(&config, args.rows),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Generates reproducible synthetic equity fixtures: daily prices, quarterly
/// financials and production/delivery counts.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults to `config.toml` if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the three datasets and write them as CSV files.
    Generate(GenerateArgs),
    /// Generate the datasets and print the first rows of each table.
    Preview(PreviewArgs),
}

#[derive(Parser)]
struct GenerateArgs {
    #[command(flatten)]
    overrides: RunOverrides,
}

#[derive(Parser)]
struct PreviewArgs {
    #[command(flatten)]
    overrides: RunOverrides,

    /// Number of rows shown per table.
    #[arg(long, default_value_t = 5)]
    rows: usize,
}

/// Layers file, environment and command-line settings, then re-validates.
fn prepare_config(path: Option<&Path>, overrides: &RunOverrides) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => load_config().context("Failed to load configuration")?,
    };
    config.apply_overrides(overrides);
    config.validate().context("Invalid configuration after command-line overrides")?;
    Ok(config)
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Runs the pipeline and writes the CSV files into the output directory.
fn handle_generate(config: &Config) -> anyhow::Result<()> {
    let dataset = pipeline::generate_dataset(config).context("Dataset generation failed")?;
    let files = export::write_dataset(&config.output, &dataset).with_context(|| {
        format!("Failed to write dataset to {}", config.output.directory.display())
    })?;
    tracing::info!(directory = %config.output.directory.display(), "Fixtures written");

    println!("{}", dataset.summary());
    for path in files.iter() {
        println!("wrote {}", path.display());
    }
    Ok(())
}

/// Runs the pipeline and prints the head of each table without touching disk.
fn handle_preview(config: &Config, rows: usize) -> anyhow::Result<()> {
    let dataset = pipeline::generate_dataset(config).context("Dataset generation failed")?;

    println!("{}\n", dataset.summary());
    println!("Prices\n{}\n", render(&dataset.prices, rows)?);
    println!("Financials\n{}\n", render(&dataset.financials, rows)?);
    println!("Operations\n{}", render(&dataset.operations, rows)?);
    Ok(())
}

/// Builds a terminal table of the first `limit` rows, formatted exactly as
/// they would appear in the exported file.
fn render<T: TableRow>(rows: &[T], limit: usize) -> anyhow::Result<Table> {
    let head = &rows[..rows.len().min(limit)];

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(T::COLUMNS.to_vec());
    for record in export::to_records(head)? {
        table.add_row(record.iter().collect::<Vec<_>>());
    }
    Ok(table)
}
