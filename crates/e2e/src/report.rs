//! Report sink configuration and results output
//!
//! The suite produces a declarative list of report sinks for the host
//! runner: CI annotations, a static HTML report, and a trend-tracking JSON
//! file whose path can be redirected through the environment.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Overrides the trend sink's history file.
pub const TREND_FILE_ENV: &str = "REFRESH_TREND_FILE";

const DEFAULT_TREND_FILE: &str = "refresh-report/index.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "sink", rename_all = "snake_case")]
pub enum ReportSink {
    /// Inline annotations on the hosting CI.
    Annotations,

    /// Static HTML report.
    Html { output_dir: PathBuf },

    /// Trend-tracking JSON: a named report plus a history file that
    /// accumulates one entry per run.
    Trend {
        name: String,
        output_file: PathBuf,
        trend_file: PathBuf,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportConfig {
    pub sinks: Vec<ReportSink>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let trend_file = std::env::var_os(TREND_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TREND_FILE));

        ReportConfig {
            sinks: vec![
                ReportSink::Annotations,
                ReportSink::Html { output_dir: PathBuf::from("refresh-report/html") },
                ReportSink::Trend {
                    name: "Refresh Test Execution Report".to_string(),
                    output_file: PathBuf::from("refresh-report/index.html"),
                    trend_file,
                },
            ],
        }
    }
}

/// Aggregated outcome of one suite run, written as a JSON document for the
/// report sinks to pick up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub name: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub finished_at: DateTime<Utc>,
}

impl SuiteReport {
    pub fn write_results(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), passed = self.passed, failed = self.failed, "results written");
        Ok(())
    }

    pub fn trend_entry(&self) -> TrendEntry {
        TrendEntry {
            timestamp: self.finished_at,
            total: self.total,
            passed: self.passed,
            failed: self.failed,
            duration_ms: self.duration_ms,
        }
    }
}

/// One run's worth of trend history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendEntry {
    pub timestamp: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
}

/// Append a run to the trend history file, creating it (and its parent
/// directory) on first use. An unreadable history starts over rather than
/// blocking the report.
pub fn append_trend(path: &Path, entry: &TrendEntry) -> std::io::Result<()> {
    let mut entries: Vec<TrendEntry> = match std::fs::read_to_string(path) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
        Err(_) => Vec::new(),
    };
    entries.push(entry.clone());

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&entries)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    std::fs::write(path, json)?;

    info!(path = %path.display(), runs = entries.len(), "trend history updated");
    Ok(())
}
