use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deadlock_witness::{DeadlockWitness, DetectionResult, Snapshot, showcase};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "deadlock-witness - Snapshot Deadlock Detector With Witness Cycles"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect deadlock in one snapshot and print the result as JSON
    Detect {
        /// Snapshot JSON file, or "-" for stdin
        snapshot: PathBuf,
        /// Append the run to this detection log ("{timestamp}" is expanded)
        #[arg(long)]
        log: Option<PathBuf>,
        /// Pretty-print the result
        #[arg(long)]
        pretty: bool,
        /// Build the wait-for graph concurrently with the reduction
        #[arg(long)]
        concurrent_graph: bool,
    },
    /// Detect deadlock in several snapshot files in parallel
    Batch {
        /// Snapshot JSON files
        #[arg(required = true)]
        snapshots: Vec<PathBuf>,
        /// Number of worker threads
        #[arg(long, default_value_t = 4)]
        workers: usize,
        /// Detection log for all runs
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Open a detection log in a viewer
    Showcase {
        /// Path to the log file
        log_file: PathBuf,
        /// Base URL of the viewer page
        #[arg(long)]
        viewer: String,
        /// Print the URL instead of opening a browser
        #[arg(long)]
        print_only: bool,
    },
}

/// One line of `batch` output
#[derive(Serialize)]
struct BatchLine<'a> {
    file: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<DetectionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read snapshot from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?
    };
    serde_json::from_str(&raw).with_context(|| format!("Invalid snapshot JSON in {}", path.display()))
}

fn start_detector(log: Option<&Path>, concurrent_graph: bool) -> Result<deadlock_witness::Detector> {
    let builder = DeadlockWitness::new().concurrent_graph(concurrent_graph);
    let builder = match log {
        Some(path) => builder.with_log(path),
        None => builder,
    };
    builder.start()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Detect {
            snapshot,
            log,
            pretty,
            concurrent_graph,
        } => {
            let detector = start_detector(log.as_deref(), concurrent_graph)?;
            let input = read_snapshot(&snapshot)?;
            let result = detector.run(&input).context("Snapshot rejected")?;
            let json = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            println!("{json}");
        }
        Command::Batch {
            snapshots,
            workers,
            log,
        } => {
            let detector = start_detector(log.as_deref(), false)?;
            let inputs = snapshots
                .iter()
                .map(|path| read_snapshot(path))
                .collect::<Result<Vec<_>>>()?;

            for (file, outcome) in snapshots.iter().zip(detector.run_batch(&inputs, workers)) {
                let line = match outcome {
                    Ok(result) => BatchLine {
                        file,
                        result: Some(result),
                        error: None,
                    },
                    Err(error) => BatchLine {
                        file,
                        result: None,
                        error: Some(error.to_string()),
                    },
                };
                println!("{}", serde_json::to_string(&line)?);
            }
        }
        Command::Showcase {
            log_file,
            viewer,
            print_only,
        } => {
            if print_only {
                println!("{}", deadlock_witness::showcase_url(&log_file, &viewer)?);
            } else {
                showcase(&log_file, &viewer)?;
            }
        }
    }

    Ok(())
}
