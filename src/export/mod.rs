//! Export pipeline
//!
//! This module turns collections of documents into CSV files:
//!
//! 1. **CollectionExporter**: drains one collection into memory while
//!    accumulating its column schema, then renders header and rows
//! 2. **ExportDriver**: resolves which collections to process, runs them
//!    strictly sequentially, and aggregates outcomes into a run summary
//! 3. **RowSink / SinkFactory**: the output side, with a CSV
//!    implementation applying standard quoting
//! 4. **ProgressTracker**: per-collection feedback while draining
//!
//! The buffer-then-render two-pass design is deliberate: the header
//! depends on having seen every document, so no row can be written until
//! the stream is exhausted.

pub mod collection;
pub mod driver;
pub mod progress;
pub mod sink;

pub use collection::{CollectionExporter, CollectionOutcome};
pub use driver::{ExportDriver, ExportOptions, RunSummary};
pub use progress::ProgressTracker;
pub use sink::{CsvSink, CsvSinkFactory, RowSink, SinkFactory};
