//! Command-line interface for firecsv
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and CLI-over-config precedence
//! - Assembling store settings and export options for the driver

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::export::ExportOptions;
use crate::store::StoreSettings;

/// Export Cloud Firestore collections to CSV files
#[derive(Parser, Debug)]
#[command(
    name = "firecsv",
    version,
    about = "Export Cloud Firestore collections to CSV files",
    long_about = "Exports Firestore collections into one CSV file per collection. Columns are
the sorted union of field names observed across the collection's documents,
prefixed by a synthetic __document_id__ column."
)]
pub struct CliArgs {
    /// GCP project ID
    #[arg(short, long, value_name = "ID")]
    pub project: String,

    /// Firestore database name
    #[arg(short, long, value_name = "NAME", default_value = "(default)")]
    pub database: String,

    /// Comma-separated collection names (default: all top-level)
    #[arg(short, long, value_name = "NAMES")]
    pub collections: Option<String>,

    /// Max documents per collection (0 = all)
    #[arg(short, long, value_name = "COUNT")]
    pub limit: Option<usize>,

    /// Output directory for CSV files (created if absent)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Configuration file path
    #[arg(long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Firestore emulator host:port (plain HTTP, no auth)
    #[arg(long, value_name = "HOST")]
    pub emulator_host: Option<String>,

    /// OAuth bearer token for the Firestore API
    ///
    /// Falls back to the GOOGLE_ACCESS_TOKEN environment variable.
    /// Unneeded when exporting from the emulator.
    #[arg(long, value_name = "TOKEN")]
    pub access_token: Option<String>,

    /// Disable the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,
}

/// CLI interface combining parsed arguments with loaded configuration
pub struct CliInterface {
    args: CliArgs,
    config: Config,
}

impl CliInterface {
    /// Parse command-line arguments and load configuration
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Build the interface from already-parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let mut config = match &args.config_file {
            Some(path) => Config::from_file(path)?,
            None => Config::new(),
        };
        config.apply_env();

        // Command-line arguments take precedence over everything else
        if let Some(limit) = args.limit {
            config.export.limit = limit;
        }
        if let Some(output) = &args.output {
            config.export.output_dir = output.clone();
        }
        if args.emulator_host.is_some() {
            config.store.emulator_host = args.emulator_host.clone();
        }
        if args.no_progress || args.quiet {
            config.export.progress = false;
        }

        Ok(Self { args, config })
    }

    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve the bearer token: flag first, then environment
    pub fn access_token(&self) -> Option<String> {
        self.args
            .access_token
            .clone()
            .or_else(|| std::env::var("GOOGLE_ACCESS_TOKEN").ok().filter(|t| !t.is_empty()))
    }

    /// Store settings assembled from arguments and configuration
    pub fn store_settings(&self) -> StoreSettings {
        StoreSettings {
            project_id: self.args.project.clone(),
            database_id: self.args.database.clone(),
            access_token: self.access_token(),
            emulator_host: self.config.store.emulator_host.clone(),
            timeout: self.config.request_timeout(),
            page_size: self.config.store.page_size,
        }
    }

    /// Export options for the driver
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            collections: self.args.collections.clone(),
            limit: self.config.export.limit,
            progress: self.config.export.progress,
        }
    }
}
