use crate::core::logger::{CombinedLogEntry, LinkType, Outcome};
use crate::core::types::NodeId;
use anyhow::{Context, Result};
use base64::alphabet::URL_SAFE;
use base64::engine::{Engine as _, general_purpose};
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

// Event format: (processes, resources, outcome_code, timestamp, deadlocked, cycle)
// Cycle nodes are (kind, id) with kind 0 for processes and 1 for resources
type Event = (u64, u64, u8, f64, Vec<u64>, Vec<(u8, u64)>);
// Graph format: (processes, resources, links)
// Links are (source_id, target_id, link_code, in_cycle); the link code fixes
// which side is the process, so ids need no kind tag
type Graph = (Vec<u64>, Vec<u64>, Vec<(u64, u64, u8, bool)>);

type Events = Vec<Event>;
type Graphs = Vec<Graph>;

/// Compact output structure
#[derive(Debug, Serialize, Deserialize)]
pub struct LogsData {
    pub events: Events,
    pub graphs: Graphs,
}

/// Converts a detection log to a compact, compressed, encoded format suitable for URL parameters
///
/// Lines that are not detection log entries are skipped.
///
/// # Arguments
/// * `log_path` - Path to the detection log file
///
/// # Returns
/// A Result that contains the encoded string or an error
pub fn process_log_for_url<P: AsRef<Path>>(log_path: P) -> Result<String> {
    let file = File::open(log_path).context("Failed to open log file")?;
    let reader = BufReader::new(file);

    let mut compact_events = Vec::new();
    let mut compact_graphs = Vec::new();

    for line in reader.lines() {
        let line = line.context("Failed to read line from log file")?;
        if let Ok(entry) = serde_json::from_str::<CombinedLogEntry>(&line) {
            let (event, graph) = compact_entry(entry);
            compact_events.push(event);
            compact_graphs.push(graph);
        }
    }

    encode(&LogsData {
        events: compact_events,
        graphs: compact_graphs,
    })
}

/// MessagePack, then Gzip, then Base64URL
pub fn encode(data: &LogsData) -> Result<String> {
    // 1. Convert to MessagePack
    let msgpack = rmp_serde::to_vec(data).context("Failed to convert data to MessagePack")?;

    // 2. Apply Gzip compression
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(&msgpack)
        .context("Failed to compress data")?;
    let compressed = encoder.finish().context("Failed to finish compression")?;

    // 3. Apply Base64URL encoding
    let base64_engine = general_purpose::GeneralPurpose::new(&URL_SAFE, general_purpose::PAD);
    Ok(base64_engine.encode(compressed))
}

fn outcome_code(outcome: Outcome) -> u8 {
    match outcome {
        Outcome::Safe => 0,
        Outcome::Deadlocked => 1,
        Outcome::Rejected => 2,
    }
}

fn node_code(node: NodeId) -> (u8, u64) {
    match node {
        NodeId::Process(id) => (0, id as u64),
        NodeId::Resource(id) => (1, id as u64),
    }
}

fn node_raw_id(node: NodeId) -> u64 {
    node_code(node).1
}

/// Convert a log entry into the compact format
fn compact_entry(entry: CombinedLogEntry) -> (Event, Graph) {
    let event = entry.event;
    let compact_event = (
        event.processes as u64,
        event.resources as u64,
        outcome_code(event.outcome),
        event.timestamp,
        event.deadlocked.iter().map(|&p| p as u64).collect(),
        event.cycle.into_iter().map(node_code).collect(),
    );

    let compact_links = entry
        .graph
        .links
        .into_iter()
        .map(|link| {
            let link_code = match link.link_type {
                LinkType::Alloc => 0u8,
                LinkType::Request => 1u8,
            };
            (
                node_raw_id(link.source),
                node_raw_id(link.target),
                link_code,
                link.in_cycle,
            )
        })
        .collect();

    let compact_graph = (
        entry.graph.processes.iter().map(|&p| p as u64).collect(),
        entry.graph.resources.iter().map(|&r| r as u64).collect(),
        compact_links,
    );

    (compact_event, compact_graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::NamedTempFile;

    // Helper function to create a temporary log file with test data
    fn create_test_log_file(entries: &[&str]) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        for entry in entries {
            writeln!(file, "{}", entry)?;
        }
        file.flush()?;
        Ok(file)
    }

    // Helper function to decode the output back to LogsData
    fn decode_url_data(encoded: &str) -> Result<LogsData> {
        let base64_engine = general_purpose::GeneralPurpose::new(&URL_SAFE, general_purpose::PAD);
        let compressed = base64_engine.decode(encoded)?;

        let mut decoder = GzDecoder::new(&compressed[..]);
        let mut msgpack = Vec::new();
        decoder.read_to_end(&mut msgpack)?;

        let logs_data: LogsData = rmp_serde::from_slice(&msgpack)?;
        Ok(logs_data)
    }

    const DEADLOCK_LINE: &str = r#"{"event":{"processes":2,"resources":2,"outcome":"Deadlocked","deadlocked":[0,1],"cycle":["P0","R1","P1","R0","P0"],"completion_order":[],"timestamp":1234567890.5},"graph":{"processes":[0,1],"resources":[0,1],"links":[{"source":"P0","target":"R1","type":"request","in_cycle":true},{"source":"P1","target":"R0","type":"request","in_cycle":true},{"source":"R0","target":"P0","type":"alloc","in_cycle":true},{"source":"R1","target":"P1","type":"alloc","in_cycle":true}]}}"#;

    const REJECTED_LINE: &str = r#"{"event":{"processes":1,"resources":1,"outcome":"Rejected","error":"allocation entry [0][0] is negative (-1)","timestamp":1234567891.0},"graph":{"processes":[],"resources":[],"links":[]}}"#;

    #[test]
    fn test_deadlock_entry_compacts() -> Result<()> {
        let file = create_test_log_file(&[DEADLOCK_LINE])?;
        let data = decode_url_data(&process_log_for_url(file.path())?)?;

        assert_eq!(data.events.len(), 1);
        let (processes, resources, outcome, timestamp, deadlocked, cycle) = &data.events[0];
        assert_eq!((*processes, *resources, *outcome), (2, 2, 1));
        assert_eq!(*timestamp, 1234567890.5);
        assert_eq!(deadlocked, &vec![0, 1]);
        assert_eq!(cycle, &vec![(0, 0), (1, 1), (0, 1), (1, 0), (0, 0)]);

        let (graph_processes, graph_resources, links) = &data.graphs[0];
        assert_eq!(graph_processes, &vec![0, 1]);
        assert_eq!(graph_resources, &vec![0, 1]);
        assert_eq!(links[0], (0, 1, 1, true));
        assert_eq!(links[2], (0, 0, 0, true));
        Ok(())
    }

    #[test]
    fn test_rejected_entry_and_garbage_lines() -> Result<()> {
        let file = create_test_log_file(&[REJECTED_LINE, "not json", "", DEADLOCK_LINE])?;
        let data = decode_url_data(&process_log_for_url(file.path())?)?;

        assert_eq!(data.events.len(), 2);
        assert_eq!(data.events[0].2, 2);
        assert!(data.graphs[0].2.is_empty());
        assert_eq!(data.events[1].2, 1);
        Ok(())
    }

    #[test]
    fn test_encoded_output_is_url_safe() -> Result<()> {
        let file = create_test_log_file(&[DEADLOCK_LINE, DEADLOCK_LINE, REJECTED_LINE])?;
        let encoded = process_log_for_url(file.path())?;
        assert!(
            encoded
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '=')
        );
        Ok(())
    }

    #[test]
    fn test_missing_log_file() {
        assert!(process_log_for_url("/definitely/not/here.log").is_err());
    }
}
