//! firecsv - Firestore to CSV exporter
//!
//! Exports Cloud Firestore collections into one CSV file per collection.
//! Columns are the sorted union of field names observed across the
//! collection's documents, prefixed by a synthetic `__document_id__`
//! column; nested values render as compact JSON.
//!
//! # Usage
//!
//! ```bash
//! # Export every top-level collection
//! firecsv --project my-project --output ./exports
//!
//! # Export selected collections against the emulator
//! firecsv --project demo --emulator-host localhost:8080 -c users,orders
//! ```

use tracing::{Level, info};

use firecsv::cli::CliInterface;
use firecsv::error::{ExportError, Result};
use firecsv::export::{CsvSinkFactory, ExportDriver};
use firecsv::store::FirestoreRestStore;

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Create the output directory and the store client (setup failures
///    abort the whole run here)
/// 4. Run the export driver and print the run summary
///
/// Returns an error when setup or collection resolution fails, or when
/// one or more collections failed — the process exits non-zero either
/// way, with the failed collection names in the message.
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;
    initialize_logging(&cli);

    let output_dir = cli.config().export.output_dir.clone();
    tokio::fs::create_dir_all(&output_dir).await?;

    let store = FirestoreRestStore::connect(cli.store_settings())?;
    let sinks = CsvSinkFactory::new(&output_dir);
    let driver = ExportDriver::new(&store, &sinks, cli.export_options());

    let summary = driver.run().await?;

    println!("Export summary:");
    print!("{}", summary.render());

    if !summary.succeeded() {
        let failed = summary.failed_collections().join(", ");
        return Err(ExportError::CollectionsFailed(failed).into());
    }

    info!("Export completed successfully.");
    Ok(())
}

/// Initialize logging system based on verbosity level
fn initialize_logging(cli: &CliInterface) {
    let level = if cli.args().very_verbose {
        Level::TRACE
    } else if cli.args().verbose {
        Level::DEBUG
    } else if cli.args().quiet {
        Level::WARN
    } else {
        cli.config().logging.level.to_tracing_level()
    };

    // Build subscriber with level filter
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    // Configure timestamps
    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
