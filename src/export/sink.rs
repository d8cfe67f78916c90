//! Row sinks for export output
//!
//! The exporter hands each sink an ordered sequence of string cells per
//! row; the sink owns serialization. The CSV implementation quotes fields
//! containing the delimiter, quote character, or line breaks, doubling
//! internal quotes, and flushes on finalize. A sink left mid-write after
//! a failure stays in whatever partial state it reached; there is no
//! rollback of partially-written files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::error::{ExportError, Result};

/// A writable row sink.
#[async_trait]
pub trait RowSink: Send {
    /// Write one row of cells.
    async fn write_row(&mut self, cells: &[String]) -> Result<()>;

    /// Flush buffers and close out the output.
    async fn finalize(&mut self) -> Result<()>;
}

/// Creates one sink per collection.
#[async_trait]
pub trait SinkFactory: Send + Sync {
    /// Create the output sink for one collection, returning the sink and
    /// the path it writes to.
    async fn create(&self, collection: &str) -> Result<(Box<dyn RowSink>, PathBuf)>;
}

/// Factory producing `{directory}/{collection}.csv` sinks.
///
/// File names are derived from collection names verbatim; uniqueness is
/// assumed, not enforced.
pub struct CsvSinkFactory {
    directory: PathBuf,
}

impl CsvSinkFactory {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

#[async_trait]
impl SinkFactory for CsvSinkFactory {
    async fn create(&self, collection: &str) -> Result<(Box<dyn RowSink>, PathBuf)> {
        let path = self.directory.join(format!("{collection}.csv"));
        let sink = CsvSink::create(&path).await?;
        Ok((Box::new(sink), path))
    }
}

/// Writer for CSV format.
pub struct CsvSink {
    /// Buffered file writer
    writer: BufWriter<File>,
    /// Path to the output file
    path: PathBuf,
    /// Number of rows written, header included
    rows: usize,
}

impl CsvSink {
    /// Create a new CSV sink writing to `path`.
    pub async fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).await.map_err(|e| {
            ExportError::SinkCreation(format!("{}: {e}", path.display()))
        })?;

        debug!("Created CSV sink for: {}", path.display());

        Ok(Self {
            writer: BufWriter::with_capacity(8 * 1024 * 1024, file),
            path: path.to_path_buf(),
            rows: 0,
        })
    }

    /// Escape a CSV value if necessary.
    fn escape_csv_value(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r')
        {
            // Wrap in quotes and escape internal quotes by doubling them
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

#[async_trait]
impl RowSink for CsvSink {
    async fn write_row(&mut self, cells: &[String]) -> Result<()> {
        let row = cells
            .iter()
            .map(|cell| Self::escape_csv_value(cell))
            .collect::<Vec<_>>()
            .join(",");

        self.writer
            .write_all(row.as_bytes())
            .await
            .map_err(|e| ExportError::WriteFailed(format!("row: {e}")))?;
        self.writer
            .write_all(b"\n")
            .await
            .map_err(|e| ExportError::WriteFailed(format!("newline: {e}")))?;

        self.rows += 1;
        Ok(())
    }

    async fn finalize(&mut self) -> Result<()> {
        self.writer
            .flush()
            .await
            .map_err(|e| ExportError::WriteFailed(format!("flush: {e}")))?;

        debug!(
            "Finalized CSV file: {} ({} rows)",
            self.path.display(),
            self.rows
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::fs;

    fn temp_csv(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("firecsv_{}_{}.csv", std::process::id(), name))
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_escape_csv_value() {
        assert_eq!(CsvSink::escape_csv_value("simple"), "simple");
        assert_eq!(CsvSink::escape_csv_value("with,comma"), "\"with,comma\"");
        assert_eq!(CsvSink::escape_csv_value("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(CsvSink::escape_csv_value("with\nnewline"), "\"with\nnewline\"");
        assert_eq!(CsvSink::escape_csv_value(""), "");
    }

    #[tokio::test]
    async fn test_csv_sink_basic() {
        let path = temp_csv("basic");
        let mut sink = CsvSink::create(&path).await.unwrap();

        sink.write_row(&row(&["__document_id__", "name"])).await.unwrap();
        sink.write_row(&row(&["d1", "Alice"])).await.unwrap();
        sink.finalize().await.unwrap();

        let content = fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "__document_id__,name\nd1,Alice\n");

        fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn test_csv_sink_quotes_special_characters() {
        let path = temp_csv("special");
        let mut sink = CsvSink::create(&path).await.unwrap();

        sink.write_row(&row(&["Hello, world!", "Quote: \"test\""]))
            .await
            .unwrap();
        sink.finalize().await.unwrap();

        let content = fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "\"Hello, world!\",\"Quote: \"\"test\"\"\"\n");

        fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn test_factory_derives_path_from_collection_name() {
        let dir = std::env::temp_dir();
        let factory = CsvSinkFactory::new(&dir);

        let (mut sink, path) = factory.create("users").await.unwrap();
        sink.finalize().await.unwrap();

        assert_eq!(path, dir.join("users.csv"));
        assert!(fs::metadata(&path).await.is_ok());

        fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn test_sink_creation_failure_is_reported() {
        let factory = CsvSinkFactory::new("/nonexistent/firecsv/output");
        assert!(factory.create("users").await.is_err());
    }
}
