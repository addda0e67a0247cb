// Core types
pub mod types;
pub use types::*;

pub mod error;
pub use error::{DetectionError, MatrixKind};

// Input checks
pub mod availability;
pub mod validator;

// Safety reduction
pub mod reduction;

// Graph implementation and witness extraction
pub mod graph;

// Logging functionality
pub mod logger;

pub mod report;
pub use report::DetectionReport;

// Detection facade
pub mod detector;
pub use detector::batch::{detect_batch, run_parallel};
pub use detector::{Analysis, DetectOptions, analyze, detect, detect_with};

#[cfg(feature = "logging-and-visualization")]
use anyhow::Context;
use anyhow::Result;
#[cfg(feature = "logging-and-visualization")]
use logger::EventLogger;

type Callback = Box<dyn Fn(&DetectionReport) + Send + Sync + 'static>;

/// Detector configuration struct
///
/// Collects options, the optional detection log and the deadlock callback,
/// then [`start`](Self::start)s a [`Detector`] that applies them to every run.
pub struct DeadlockWitness {
    options: DetectOptions,
    #[cfg(feature = "logging-and-visualization")]
    log_path: Option<String>,
    callback: Option<Callback>,
}

impl Default for DeadlockWitness {
    fn default() -> Self {
        Self::new()
    }
}

impl DeadlockWitness {
    /// Create a new configuration with default settings
    ///
    /// By default:
    /// - Logging is disabled
    /// - No callback is registered
    /// - The wait-for graph is built on the calling thread
    pub fn new() -> Self {
        DeadlockWitness {
            options: DetectOptions::default(),
            #[cfg(feature = "logging-and-visualization")]
            log_path: None,
            callback: None,
        }
    }

    /// Activate logger and set the path for the log file
    ///
    /// # Arguments
    /// * `path` - Path to the log file. If the path contains "{timestamp}",
    ///   it will be replaced with the current timestamp.
    ///
    /// # Returns
    /// The builder for method chaining
    #[cfg(feature = "logging-and-visualization")]
    pub fn with_log<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.log_path = Some(path.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Build the wait-for graph concurrently with the reduction
    pub fn concurrent_graph(mut self, enabled: bool) -> Self {
        self.options.concurrent_graph = enabled;
        self
    }

    /// Set a callback to be invoked when a deadlock is detected
    ///
    /// The callback runs synchronously on the thread that called
    /// [`Detector::run`], after the run is logged.
    ///
    /// # Returns
    /// The builder for method chaining
    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&DetectionReport) + Send + Sync + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Create a detector with the configured settings
    ///
    /// # Errors
    /// Returns an error if logger initialization fails
    pub fn start(self) -> Result<Detector> {
        #[cfg(feature = "logging-and-visualization")]
        let logger = match self.log_path {
            Some(path) => EventLogger::with_file(path).context("Failed to initialize logger")?,
            None => EventLogger::new(),
        };

        Ok(Detector {
            options: self.options,
            #[cfg(feature = "logging-and-visualization")]
            logger,
            callback: self.callback,
        })
    }
}

/// A configured detector
///
/// Holds no per-run state: every [`run`](Self::run) works on its own copy of
/// the snapshot's working data, so one detector can serve concurrent callers.
pub struct Detector {
    options: DetectOptions,
    #[cfg(feature = "logging-and-visualization")]
    logger: EventLogger,
    callback: Option<Callback>,
}

impl Detector {
    /// Detect deadlock in one snapshot
    ///
    /// Logs the run when logging is enabled and invokes the callback if the
    /// snapshot is deadlocked.
    ///
    /// # Errors
    /// Propagates validation and availability errors; rejected snapshots are
    /// logged as well.
    pub fn run(&self, snapshot: &Snapshot) -> Result<DetectionResult, DetectionError> {
        let analysis = match analyze(snapshot, &self.options) {
            Ok(analysis) => analysis,
            Err(error) => {
                #[cfg(feature = "logging-and-visualization")]
                self.logger.log_rejection(snapshot, &error);
                return Err(error);
            }
        };

        let needs_report = analysis.result.is_deadlocked && self.callback.is_some();
        #[cfg(feature = "logging-and-visualization")]
        let needs_report = needs_report || self.logger.is_enabled();

        if needs_report {
            let report = analysis.report();
            #[cfg(feature = "logging-and-visualization")]
            self.logger.log_report(&report);
            if report.result.is_deadlocked
                && let Some(callback) = &self.callback
            {
                callback(&report);
            }
        }

        Ok(analysis.result)
    }

    /// Detect deadlock in every snapshot on `workers` threads
    ///
    /// Results are returned in input order. Logging and the callback apply to
    /// each run exactly as with [`run`](Self::run).
    pub fn run_batch(
        &self,
        snapshots: &[Snapshot],
        workers: usize,
    ) -> Vec<Result<DetectionResult, DetectionError>> {
        run_parallel(snapshots, workers, |snapshot| self.run(snapshot))
    }

    /// The detection log, if one was configured
    #[cfg(feature = "logging-and-visualization")]
    pub fn logger(&self) -> &EventLogger {
        &self.logger
    }
}
