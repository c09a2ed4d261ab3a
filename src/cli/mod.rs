//! Command-line interface for nova-analytics.
//!
//! Records events through the configured analytics plugins and lists
//! what is registered.

use crate::config::AnalyticsConfig;
use crate::{logging, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod plugins;
pub mod record;

/// nova-analytics - record analytics events through registered plugins
#[derive(Parser)]
#[command(name = "nova-analytics")]
#[command(about = "Record analytics events through registered analytics plugins")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Path to analytics.toml (defaults to the user config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Append logs to this file instead of the console
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Record an analytics event
    Record(record::RecordArgs),
    /// List registered plugins
    Plugins(plugins::PluginsArgs),
}

impl Cli {
    pub fn init_logging(&self) -> Result<()> {
        match &self.log_file {
            Some(path) => logging::init_file_logging(path, self.verbose),
            None => logging::init_logging(self.verbose),
        }
    }

    /// An explicit `--config` must exist; the default location may be absent
    pub fn load_config(&self) -> Result<AnalyticsConfig> {
        match &self.config {
            Some(path) => AnalyticsConfig::load(path),
            None => AnalyticsConfig::load_or_default(&AnalyticsConfig::default_path()),
        }
    }
}
