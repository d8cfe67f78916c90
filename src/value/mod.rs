//! Document value model
//!
//! This module defines the closed, recursive value type that a Firestore
//! document field may hold, plus the in-memory document representation
//! used by the export pipeline.
//!
//! # Design
//!
//! The store reports dynamically-typed values; this crate re-architects
//! them as a closed sum type so that normalization is an exhaustive match
//! over variants with compile-time completeness checking, instead of
//! runtime type inspection.
//!
//! Map values preserve key insertion order as received from the store.
//! This is deliberate: nested JSON rendering keeps wire order, while CSV
//! column order (a separate concern, see the `schema` module) is always
//! sorted.

mod convert;
mod helpers;

pub use convert::{PlainJsonConverter, PlainTextConverter, ValueConverter};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// Any value a document field may hold.
///
/// The recursion through [`DocumentValue::Array`] and [`DocumentValue::Map`]
/// is acyclic (the store guarantees tree-shaped values) and may nest to
/// arbitrary depth.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentValue {
    /// Explicit null. An absent field is treated identically.
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit IEEE binary float.
    Float(f64),
    /// UTF-8 string.
    Text(String),
    /// Instant with nanosecond resolution, UTC.
    Timestamp(DateTime<Utc>),
    /// Opaque byte sequence.
    Bytes(Vec<u8>),
    /// Geographic point.
    GeoPoint(GeoPoint),
    /// Fully-qualified path of another document. Opaque, never dereferenced.
    Reference(String),
    /// Ordered sequence of values.
    Array(Vec<DocumentValue>),
    /// Field-name to value mapping, keys unique, insertion order preserved.
    Map(IndexMap<String, DocumentValue>),
}

/// Geographic point with latitude and longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One document read from the store.
///
/// Immutable once read; held only for the lifetime of its collection's
/// export and released after the file is written.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Identifier, unique within the document's collection.
    pub id: String,
    /// Top-level field values, in wire order.
    pub fields: IndexMap<String, DocumentValue>,
}

impl Document {
    /// Create a document from an identifier and its top-level fields.
    pub fn new(id: impl Into<String>, fields: IndexMap<String, DocumentValue>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests;
