use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use txn_onboarder::config::Config;
use txn_onboarder::csv_io;
use txn_onboarder::db::{LoadSink, TransactionStore};
use txn_onboarder::domain::{CLEAN_COLUMNS, REJECTED_COLUMNS};
use txn_onboarder::logging;
use txn_onboarder::mapping::FieldMapping;
use txn_onboarder::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "txn_onboarder")]
#[command(about = "Transaction feed onboarding: map, validate, partition, load")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the raw transaction CSV feed
    input: PathBuf,

    /// Field mapping resource (JSON object: source column -> standardized column)
    #[arg(long, default_value = "field_mappings.json")]
    mapping: PathBuf,

    /// Directory for clean.csv and rejected.csv
    #[arg(long, default_value = "data/output")]
    output_dir: PathBuf,

    /// Write the CSV outputs but skip the database load
    #[arg(long)]
    skip_load: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::from_env();

    // Mapping must be available before any row is processed
    let mapping = FieldMapping::load(&cli.mapping)?;
    let raw_rows = csv_io::read_raw_rows(&cli.input)?;
    let source_file = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.input.display().to_string());

    let pipeline = Pipeline::new(mapping);
    let partition = pipeline.run(&raw_rows, &source_file);

    csv_io::write_records(
        &cli.output_dir.join("clean.csv"),
        &CLEAN_COLUMNS,
        &partition.clean,
    )?;
    csv_io::write_records(
        &cli.output_dir.join("rejected.csv"),
        &REJECTED_COLUMNS,
        &partition.rejected,
    )?;

    // CSV outputs stay on disk even if the load below fails
    if cli.skip_load {
        info!("Skipping database load");
    } else {
        let store = TransactionStore::connect(&config).await?;
        store.run_migrations().await?;
        store.load(&partition.clean).await?;
    }

    info!("Rejected rows: {}", partition.rejected.len());

    println!("\n📊 Onboarding results for {}:", source_file);
    println!("   Total rows:    {}", partition.total());
    println!("   Clean rows:    {}", partition.clean.len());
    println!("   Rejected rows: {}", partition.rejected.len());
    println!("   Output dir:    {}", cli.output_dir.display());

    Ok(())
}
