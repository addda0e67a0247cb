pub mod encoder;
use encoder::process_log_for_url;

use crate::core::Detector;
use anyhow::{Context, Result};
use std::path::Path;

/// Build the viewer URL for a detection log
///
/// The log is compacted and encoded (see [`encoder::process_log_for_url`]) and
/// appended to `viewer_url` as the `logs` query parameter.
///
/// # Errors
/// Returns an error if the log file cannot be read or encoded
pub fn showcase_url<P: AsRef<Path>>(log_path: P, viewer_url: &str) -> Result<String> {
    let encoded_log =
        process_log_for_url(&log_path).context("Failed to process log file for URL")?;

    let separator = if viewer_url.contains('?') { '&' } else { '?' };
    Ok(format!("{viewer_url}{separator}logs={encoded_log}"))
}

/// Showcase the log data by opening it in an external viewer
///
/// This function processes a detection log and opens a browser window on the
/// given viewer, which draws the process/resource graph and highlights each
/// run's witness cycle.
///
/// # Arguments
/// * `log_path` - Path to the log file.
/// * `viewer_url` - Base URL of the viewer page.
///
/// # Errors
/// Returns an error if:
/// - Failed to read the log file
/// - Failed to process the log file
/// - Failed to open the browser
///
/// # Example
///
/// ```no_run
/// use deadlock_witness::showcase;
///
/// showcase("witness.log", "http://localhost:5000/").expect("Failed to showcase detection log");
/// ```
pub fn showcase<P: AsRef<Path>>(log_path: P, viewer_url: &str) -> Result<()> {
    let url = showcase_url(log_path, viewer_url)?;
    webbrowser::open(&url).context("Failed to open browser")?;
    Ok(())
}

/// Showcase the log of a running detector
///
/// Flushes the detector's log before encoding it, so every completed run is
/// included.
///
/// # Errors
/// Returns an error if:
/// - The detector was started without a log
/// - Failed to flush pending log entries
/// - Failed to process the log file or open the browser
pub fn showcase_this(detector: &Detector, viewer_url: &str) -> Result<()> {
    let logger = detector.logger();
    logger
        .flush()
        .context("Failed to flush pending log entries")?;

    let log_path = logger
        .path()
        .ok_or_else(|| anyhow::anyhow!("No active log file found"))?;

    showcase(log_path, viewer_url)
}
