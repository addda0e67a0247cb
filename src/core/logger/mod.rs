//! Logging functionality for detection runs
//!
//! This module provides the graph state handed to renderers and, with the
//! `logging-and-visualization` feature, a JSON-lines log of detection runs
//! that the showcase encoder turns into a viewer URL.

#[cfg(feature = "logging-and-visualization")]
mod event_logger;
mod graph_logger;

#[cfg(feature = "logging-and-visualization")]
pub use event_logger::{CombinedLogEntry, EventLogger, LogEntry, LoggerMode, Outcome};
pub use graph_logger::{GraphLink, GraphState, LinkType};
