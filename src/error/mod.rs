//! Error handling module for firecsv.
//!
//! This module provides the crate-wide error taxonomy:
//! - Setup and transport failures that abort the whole run
//! - Per-collection export failures that are caught at the collection
//!   boundary and reported in the run summary
//! - Configuration errors
//!
//! # Example
//!
//! ```rust,no_run
//! use firecsv::error::{FirecsvError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     // Fallible operations return the crate-wide Result alias
//!     Ok(())
//! }
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, ExportError, FirecsvError, Result, StoreError};
