//! firecsv library
//!
//! Core functionality for exporting Cloud Firestore collections to CSV
//! files: one file per collection, columns derived from the union of
//! field names observed across that collection's documents.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `export`: Collection exporter, export driver, and row sinks
//! - `schema`: Per-collection column schema accumulation
//! - `store`: Document-store traits and the Firestore REST client
//! - `value`: Document value model and converter strategies
//!
//! # Example
//!
//! ```no_run
//! use firecsv::export::{CsvSinkFactory, ExportDriver, ExportOptions};
//! use firecsv::store::{FirestoreRestStore, StoreSettings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FirestoreRestStore::connect(StoreSettings {
//!         project_id: "my-project".to_string(),
//!         database_id: "(default)".to_string(),
//!         access_token: None,
//!         emulator_host: Some("localhost:8080".to_string()),
//!         timeout: std::time::Duration::from_secs(30),
//!         page_size: 300,
//!     })?;
//!     let sinks = CsvSinkFactory::new(".");
//!
//!     let driver = ExportDriver::new(&store, &sinks, ExportOptions::default());
//!     let summary = driver.run().await?;
//!     print!("{}", summary.render());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod schema;
pub mod store;
pub mod value;

// Re-export commonly used types
pub use config::Config;
pub use error::{FirecsvError, Result};
pub use export::{CollectionExporter, CollectionOutcome, ExportDriver, ExportOptions, RunSummary};
pub use schema::{DOCUMENT_ID_COLUMN, SchemaAccumulator};
pub use store::{DocumentStore, DocumentStream, FirestoreRestStore, StoreSettings};
pub use value::{Document, DocumentValue, GeoPoint, PlainTextConverter, ValueConverter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
