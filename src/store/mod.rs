//! Document-store access
//!
//! The export core consumes the store through two small traits:
//!
//! 1. **DocumentStore**: lists top-level collection names and opens
//!    per-collection document streams
//! 2. **DocumentStream**: a finite, single-pass, pull-based batch stream;
//!    not restartable, and it may fail mid-stream on transport errors
//!
//! The production implementation speaks the Firestore REST v1 protocol
//! (see [`rest`]); tests substitute in-memory mocks behind the same
//! traits.

pub mod rest;
pub mod wire;

pub use rest::{FirestoreRestStore, StoreSettings};

use async_trait::async_trait;

use crate::error::Result;
use crate::value::Document;

/// A hierarchical, schema-less document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List the names of every top-level collection.
    async fn list_collection_ids(&self) -> Result<Vec<String>>;

    /// Open a document stream over one collection.
    ///
    /// A `limit` greater than zero caps how many documents the stream
    /// yields in total; zero means unbounded.
    async fn stream_documents(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Box<dyn DocumentStream>>;
}

/// Pull-based batch stream of documents from one collection.
#[async_trait]
pub trait DocumentStream: Send {
    /// Fetch the next batch of documents, or `None` once exhausted.
    async fn next_batch(&mut self) -> Result<Option<Vec<Document>>>;
}
