//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single note in `ls` output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub id: String,
    pub title: Option<String>,
    pub path: String,
}

/// Summary printed by `export`.
#[derive(Debug, Serialize)]
pub struct ExportSummary<'a> {
    pub dest: String,
    #[serde(flatten)]
    pub report: &'a crate::export::ExportReport,
}
