//! Export driver
//!
//! Resolves which collections to process (explicit filter vs. full
//! discovery), runs them strictly sequentially in resolved order, and
//! aggregates the per-collection outcomes into a run summary. A failing
//! collection never prevents later collections from being attempted; the
//! overall run fails if any single collection failed.

use std::fmt::Write as _;

use tracing::{error, info};

use crate::error::{ExportError, Result};
use crate::store::DocumentStore;

use super::collection::{CollectionExporter, CollectionOutcome};
use super::sink::SinkFactory;

/// Per-run options.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Comma-separated collection filter; `None` means discover all
    /// top-level collections from the store.
    pub collections: Option<String>,
    /// Per-collection document cap; 0 means unbounded.
    pub limit: usize,
    /// Display a progress spinner per collection.
    pub progress: bool,
}

/// Aggregated result of one export run.
#[derive(Debug)]
pub struct RunSummary {
    /// One outcome per resolved collection, in run order.
    pub outcomes: Vec<CollectionOutcome>,
}

impl RunSummary {
    /// True when every collection exported without error.
    pub fn succeeded(&self) -> bool {
        self.outcomes.iter().all(CollectionOutcome::succeeded)
    }

    /// Names of the collections whose export failed, in run order.
    pub fn failed_collections(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.succeeded())
            .map(|outcome| outcome.collection.as_str())
            .collect()
    }

    /// Render the user-facing per-run summary text.
    pub fn render(&self) -> String {
        let mut text = String::new();
        for outcome in &self.outcomes {
            match (&outcome.failure, &outcome.output_path) {
                (Some(failure), _) => {
                    let _ = writeln!(text, "  {}: FAILED ({failure})", outcome.collection);
                }
                (None, Some(path)) => {
                    let _ = writeln!(
                        text,
                        "  {}: {} documents, {} fields -> {}",
                        outcome.collection,
                        outcome.documents,
                        outcome.distinct_fields,
                        path.display()
                    );
                }
                (None, None) => {
                    let _ = writeln!(text, "  {}: empty, skipped", outcome.collection);
                }
            }
        }
        text
    }
}

/// Drives one full export run against a store.
pub struct ExportDriver<'a> {
    store: &'a dyn DocumentStore,
    sinks: &'a dyn SinkFactory,
    options: ExportOptions,
}

impl<'a> ExportDriver<'a> {
    pub fn new(
        store: &'a dyn DocumentStore,
        sinks: &'a dyn SinkFactory,
        options: ExportOptions,
    ) -> Self {
        Self {
            store,
            sinks,
            options,
        }
    }

    /// Run the export.
    ///
    /// Returns `Err` only for resolution failures (discovery yielding
    /// nothing, or the store being unreachable); per-collection failures
    /// are captured in the summary instead.
    pub async fn run(&self) -> Result<RunSummary> {
        let names = self.resolve_collections().await?;
        info!(
            "Exporting {} collection(s): {}",
            names.len(),
            names.join(", ")
        );

        let exporter = CollectionExporter::new(
            self.store,
            self.sinks,
            self.options.limit,
            self.options.progress,
        );

        let mut outcomes = Vec::with_capacity(names.len());
        for name in &names {
            let outcome = exporter.export(name).await;
            if let Some(failure) = &outcome.failure {
                error!("ERROR exporting {:?}: {}", name, failure);
            }
            outcomes.push(outcome);
        }

        Ok(RunSummary { outcomes })
    }

    /// Resolve the collection list.
    ///
    /// An explicit filter is used verbatim, with no existence check
    /// against the store: a non-existent collection reads as empty and
    /// is skipped, not an error. Discovery order is whatever the store
    /// reports; it is not re-sorted here.
    async fn resolve_collections(&self) -> Result<Vec<String>> {
        if let Some(filter) = self.options.collections.as_deref() {
            let names = parse_collection_filter(filter);
            if !names.is_empty() {
                return Ok(names);
            }
        }

        let names = self.store.list_collection_ids().await?;
        if names.is_empty() {
            return Err(ExportError::NoCollectionsFound.into());
        }
        Ok(names)
    }
}

/// Split a comma-separated collection filter, trimming surrounding
/// whitespace and dropping entries that trim to empty.
fn parse_collection_filter(filter: &str) -> Vec<String> {
    filter
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
