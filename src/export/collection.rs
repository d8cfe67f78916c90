//! Per-collection export
//!
//! Exporting one collection is a two-pass operation. The first pass
//! drains the document stream completely into memory, feeding every field
//! name into the schema accumulator, because the header cannot be written
//! until every document has been seen. The second pass renders the header
//! and one row per buffered document, in read order.
//!
//! Failures are caught at the collection boundary: whatever goes wrong
//! while streaming, creating the sink, or writing rows ends up as the
//! failure detail of this collection's outcome and never aborts the rest
//! of the run. Buffered documents are discarded on failure; a partially
//! written file is left as-is.

use std::path::PathBuf;

use tracing::info;

use crate::error::{FirecsvError, Result};
use crate::schema::SchemaAccumulator;
use crate::store::DocumentStore;
use crate::value::{Document, PlainTextConverter, ValueConverter};

use super::progress::ProgressTracker;
use super::sink::SinkFactory;

/// Result of one collection's export. Produced exactly once per
/// collection; immutable afterwards.
#[derive(Debug)]
pub struct CollectionOutcome {
    /// Collection name as resolved by the driver.
    pub collection: String,
    /// Number of documents exported.
    pub documents: usize,
    /// Number of distinct field names across those documents.
    pub distinct_fields: usize,
    /// Output file path; absent for empty (skipped) collections and
    /// failures.
    pub output_path: Option<PathBuf>,
    /// Failure detail when the export aborted.
    pub failure: Option<FirecsvError>,
}

impl CollectionOutcome {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    fn empty(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            documents: 0,
            distinct_fields: 0,
            output_path: None,
            failure: None,
        }
    }

    fn failed(collection: &str, failure: FirecsvError) -> Self {
        Self {
            collection: collection.to_string(),
            documents: 0,
            distinct_fields: 0,
            output_path: None,
            failure: Some(failure),
        }
    }
}

/// Exports single collections against a store and a sink factory.
pub struct CollectionExporter<'a> {
    store: &'a dyn DocumentStore,
    sinks: &'a dyn SinkFactory,
    limit: usize,
    show_progress: bool,
}

impl<'a> CollectionExporter<'a> {
    /// Create an exporter.
    ///
    /// # Arguments
    /// * `limit` - Per-collection document cap; 0 means unbounded
    /// * `show_progress` - Display a spinner while draining
    pub fn new(
        store: &'a dyn DocumentStore,
        sinks: &'a dyn SinkFactory,
        limit: usize,
        show_progress: bool,
    ) -> Self {
        Self {
            store,
            sinks,
            limit,
            show_progress,
        }
    }

    /// Export one collection.
    ///
    /// Never returns an error: failures are converted into the outcome's
    /// failure detail.
    pub async fn export(&self, collection: &str) -> CollectionOutcome {
        match self.run(collection).await {
            Ok(outcome) => outcome,
            Err(failure) => CollectionOutcome::failed(collection, failure),
        }
    }

    async fn run(&self, collection: &str) -> Result<CollectionOutcome> {
        info!("Exporting collection {:?}...", collection);

        let mut stream = self.store.stream_documents(collection, self.limit).await?;
        let mut schema = SchemaAccumulator::new();
        let mut buffered: Vec<Document> = Vec::new();
        let tracker = ProgressTracker::new(self.show_progress);

        'drain: while let Some(batch) = stream.next_batch().await? {
            for doc in batch {
                schema.observe(&doc);
                buffered.push(doc);
                if self.limit > 0 && buffered.len() >= self.limit {
                    break 'drain;
                }
            }
            tracker.update(buffered.len() as u64);
        }
        tracker.finish();

        if buffered.is_empty() {
            info!("Collection {:?} is empty, skipping.", collection);
            return Ok(CollectionOutcome::empty(collection));
        }

        let distinct_fields = schema.distinct_fields();
        info!(
            "Read {} documents from {:?} with {} unique fields.",
            buffered.len(),
            collection,
            distinct_fields
        );

        let columns = schema.finalize();
        let (mut sink, path) = self.sinks.create(collection).await?;
        sink.write_row(&columns).await?;

        let renderer = PlainTextConverter::new();
        for doc in &buffered {
            let mut row = Vec::with_capacity(columns.len());
            row.push(doc.id.clone());
            for column in &columns[1..] {
                row.push(renderer.convert_optional(doc.fields.get(column)));
            }
            sink.write_row(&row).await?;
        }
        sink.finalize().await?;

        info!("Wrote {} ({} rows)", path.display(), buffered.len());

        Ok(CollectionOutcome {
            collection: collection.to_string(),
            documents: buffered.len(),
            distinct_fields,
            output_path: Some(path),
            failure: None,
        })
    }
}
