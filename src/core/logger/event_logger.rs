use crate::core::error::DetectionError;
use crate::core::logger::graph_logger::GraphState;
use crate::core::report::DetectionReport;
use crate::core::types::{NodeId, ProcessId, Snapshot};
use anyhow::{Context, Result};
use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// One line of the detection log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedLogEntry {
    pub event: LogEntry,
    pub graph: GraphState,
}

/// How a detection run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every process can finish
    Safe,
    /// At least one process can never finish
    Deadlocked,
    /// The snapshot failed validation or availability resolution
    Rejected,
}

/// Structure for a single detection event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Number of processes in the snapshot
    pub processes: usize,
    /// Number of resource types in the snapshot
    pub resources: usize,
    /// How the run ended
    pub outcome: Outcome,
    /// Deadlocked processes, ascending
    #[serde(default)]
    pub deadlocked: Vec<ProcessId>,
    /// Witness cycle, empty if none
    #[serde(default)]
    pub cycle: Vec<NodeId>,
    /// Order in which the reduction completed processes
    #[serde(default)]
    pub completion_order: Vec<ProcessId>,
    /// Reason the snapshot was rejected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Absolute timestamp of the run (seconds since Unix Epoch)
    pub timestamp: f64,
}

/// Determines how the logger should operate
#[derive(Debug)]
pub enum LoggerMode {
    /// Logging is disabled entirely
    Disabled,
    /// Log to the specified file
    ToFile {
        path: PathBuf,
        writer: Mutex<BufWriter<File>>,
    },
}

/// Logger for recording detection runs as JSON lines
///
/// Every line is a [`CombinedLogEntry`]. The file handle sits behind a mutex,
/// so one logger can be shared by every worker of a batch.
#[derive(Debug)]
pub struct EventLogger {
    mode: LoggerMode,
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLogger {
    /// Create a new logger with logging disabled
    pub fn new() -> Self {
        EventLogger {
            mode: LoggerMode::Disabled,
        }
    }

    /// Create a new logger that writes to the specified file
    ///
    /// # Arguments
    /// * `path` - Path to the log file. If the filename contains "{timestamp}",
    ///   it will be replaced with the current timestamp.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The directory containing the log file could not be created
    /// - The log file could not be opened for writing
    pub fn with_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = expand_timestamp(path.as_ref());

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).context("Failed to create log directory")?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .context("Failed to open log file")?;

        Ok(EventLogger {
            mode: LoggerMode::ToFile {
                path,
                writer: Mutex::new(BufWriter::new(file)),
            },
        })
    }

    /// Record a completed detection run
    pub fn log_report(&self, report: &DetectionReport) {
        let result = &report.result;
        let entry = LogEntry {
            processes: report.graph.processes.len(),
            resources: report.graph.resources.len(),
            outcome: if result.is_deadlocked {
                Outcome::Deadlocked
            } else {
                Outcome::Safe
            },
            deadlocked: result.deadlocked_processes.clone(),
            cycle: result.cycle_path.clone(),
            completion_order: report.completion_order.clone(),
            error: None,
            timestamp: epoch_seconds(),
        };

        self.write(&CombinedLogEntry {
            event: entry,
            graph: report.graph.clone(),
        });
    }

    /// Record a snapshot that was rejected before analysis
    pub fn log_rejection(&self, snapshot: &Snapshot, error: &DetectionError) {
        let entry = LogEntry {
            processes: snapshot.process_count,
            resources: snapshot.resource_count,
            outcome: Outcome::Rejected,
            deadlocked: Vec::new(),
            cycle: Vec::new(),
            completion_order: Vec::new(),
            error: Some(error.to_string()),
            timestamp: epoch_seconds(),
        };

        self.write(&CombinedLogEntry {
            event: entry,
            graph: GraphState::default(),
        });
    }

    fn write(&self, entry: &CombinedLogEntry) {
        let LoggerMode::ToFile { writer, .. } = &self.mode else {
            return;
        };

        // Logging is best effort; a failed write must not fail the detection
        if let Ok(json) = serde_json::to_string(entry) {
            let mut writer = writer.lock();
            let _ = writeln!(writer, "{json}");
            let _ = writer.flush();
        }
    }

    /// Flush buffered entries to disk
    ///
    /// # Errors
    /// Returns an error if the underlying file cannot be flushed
    pub fn flush(&self) -> Result<()> {
        if let LoggerMode::ToFile { writer, .. } = &self.mode {
            writer.lock().flush().context("Failed to flush log file")?;
        }
        Ok(())
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        !matches!(self.mode, LoggerMode::Disabled)
    }

    /// Path of the log file, if logging to a file
    pub fn path(&self) -> Option<&Path> {
        match &self.mode {
            LoggerMode::Disabled => None,
            LoggerMode::ToFile { path, .. } => Some(path),
        }
    }
}

#[allow(clippy::literal_string_with_formatting_args)]
fn expand_timestamp(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    if raw.contains("{timestamp}") {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        PathBuf::from(raw.replace("{timestamp}", &timestamp))
    } else {
        path.to_path_buf()
    }
}

/// Seconds since Unix Epoch with microsecond precision
fn epoch_seconds() -> f64 {
    let now = Utc::now();
    now.timestamp() as f64 + now.timestamp_subsec_micros() as f64 / 1_000_000.0
}
