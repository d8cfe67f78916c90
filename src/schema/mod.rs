//! Per-collection column schema accumulation
//!
//! The store reports no schema up front, so the column set is discovered
//! empirically: every document streamed from a collection feeds its field
//! names into an accumulator, and only after the collection is exhausted
//! is the final column list known. This forces the exporter's two-pass
//! design: accumulate while reading, finalize, then render rows.

use std::collections::BTreeSet;

use crate::value::Document;

/// Synthetic identifier column prepended to every collection's schema.
pub const DOCUMENT_ID_COLUMN: &str = "__document_id__";

/// Collects the set of distinct field names seen across one collection.
///
/// Single-use: create one per collection, feed every document through
/// [`observe`](Self::observe), then call [`finalize`](Self::finalize)
/// exactly once. Never shared or merged across collections.
#[derive(Debug, Default)]
pub struct SchemaAccumulator {
    fields: BTreeSet<String>,
}

impl SchemaAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the top-level field names of one document.
    pub fn observe(&mut self, doc: &Document) {
        for name in doc.fields.keys() {
            if !self.fields.contains(name) {
                self.fields.insert(name.clone());
            }
        }
    }

    /// Number of distinct field names recorded so far.
    pub fn distinct_fields(&self) -> usize {
        self.fields.len()
    }

    /// Produce the final column list: the identifier column followed by
    /// the recorded field names in ascending byte-wise lexicographic order.
    pub fn finalize(self) -> Vec<String> {
        let mut columns = Vec::with_capacity(self.fields.len() + 1);
        columns.push(DOCUMENT_ID_COLUMN.to_string());
        columns.extend(self.fields);
        columns
    }
}
