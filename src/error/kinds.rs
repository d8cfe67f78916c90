use std::{fmt, io};

/// Crate-wide `Result` type using [`FirecsvError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, FirecsvError>;

/// Top-level error type for firecsv operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum FirecsvError {
    /// Document-store errors.
    Store(StoreError),

    /// Export pipeline errors.
    Export(ExportError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// HTTP transport errors.
    Transport(reqwest::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Document-store specific errors.
#[derive(Debug)]
pub enum StoreError {
    /// The store endpoint or settings are unusable.
    InvalidEndpoint(String),

    /// A request reached the store but came back with an error status.
    RequestFailed { status: u16, message: String },

    /// A response body could not be decoded.
    DecodeFailed(String),
}

/// Export pipeline errors.
#[derive(Debug)]
pub enum ExportError {
    /// Discovery mode found no collections to export.
    NoCollectionsFound,

    /// Creating the output sink failed.
    SinkCreation(String),

    /// Writing a header or row failed.
    WriteFailed(String),

    /// One or more collections failed during the run.
    CollectionsFailed(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for FirecsvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FirecsvError::Store(e) => write!(f, "Store error: {e}"),
            FirecsvError::Export(e) => write!(f, "Export error: {e}"),
            FirecsvError::Config(e) => write!(f, "Configuration error: {e}"),
            FirecsvError::Io(e) => write!(f, "I/O error: {e}"),
            FirecsvError::Transport(e) => write!(f, "Transport error: {e}"),
            FirecsvError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidEndpoint(msg) => write!(f, "Invalid endpoint: {msg}"),
            StoreError::RequestFailed { status, message } => {
                write!(f, "Request failed with status {status}: {message}")
            }
            StoreError::DecodeFailed(msg) => write!(f, "Failed to decode response: {msg}"),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::NoCollectionsFound => {
                write!(f, "No collections found in database")
            }
            ExportError::SinkCreation(msg) => write!(f, "Failed to create output file: {msg}"),
            ExportError::WriteFailed(msg) => write!(f, "Failed to write output: {msg}"),
            ExportError::CollectionsFailed(names) => {
                write!(f, "Export completed with errors in: {names}")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for FirecsvError {}
impl std::error::Error for StoreError {}
impl std::error::Error for ExportError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to FirecsvError ========================= */

impl From<io::Error> for FirecsvError {
    fn from(err: io::Error) -> Self {
        FirecsvError::Io(err)
    }
}

impl From<reqwest::Error> for FirecsvError {
    fn from(err: reqwest::Error) -> Self {
        FirecsvError::Transport(err)
    }
}

impl From<StoreError> for FirecsvError {
    fn from(err: StoreError) -> Self {
        FirecsvError::Store(err)
    }
}

impl From<ExportError> for FirecsvError {
    fn from(err: ExportError) -> Self {
        FirecsvError::Export(err)
    }
}

impl From<ConfigError> for FirecsvError {
    fn from(err: ConfigError) -> Self {
        FirecsvError::Config(err)
    }
}

impl From<String> for FirecsvError {
    fn from(msg: String) -> Self {
        FirecsvError::Generic(msg)
    }
}

impl From<&str> for FirecsvError {
    fn from(msg: &str) -> Self {
        FirecsvError::Generic(msg.to_owned())
    }
}
