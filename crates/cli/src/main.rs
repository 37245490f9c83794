//! Cache hierarchy simulator CLI.
//!
//! This binary is the single entry point for trace replay. It performs:
//! 1. **Configuration:** Loads a JSON config file, or uses built-in defaults.
//! 2. **Replay:** Streams the trace file through the cache hierarchy.
//! 3. **Reporting:** Prints run totals and the per-level statistics report.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::{fs, process};

use memsim_core::config::Config;
use memsim_core::sim::simulator::Simulator;
use memsim_core::sim::trace::TraceReader;

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    version,
    about = "Trace-driven two-level cache hierarchy simulator",
    long_about = "Replay an address trace through split L1 instruction/data caches backed by a \
                  shared L2 and main memory, and report per-level hit/miss statistics.\n\n\
                  Trace format: one reference per line, '<I|D> <hex address>'. Lines starting \
                  with '#' are comments.\n\nExamples:\n  sim traces/gcc.trace\n  sim --config \
                  configs/inclusive.json traces/gcc.trace"
)]
struct Cli {
    /// JSON configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Trace file to replay.
    trace: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let config = cli
        .config
        .as_deref()
        .map_or_else(Config::default, load_config);

    let mut simulator = Simulator::new(&config).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: invalid configuration: {e}");
        process::exit(1);
    });

    let trace = TraceReader::open(&cli.trace).unwrap_or_else(|e| {
        eprintln!(
            "\n[!] FATAL: could not open trace '{}': {e}",
            cli.trace.display()
        );
        process::exit(1);
    });

    if let Err(e) = simulator.run(trace) {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }

    println!("references               {}", simulator.references());
    println!("total_cycles             {}", simulator.total_cycles());
    simulator.stats().print(&config);
}

/// Reads and deserializes a JSON configuration file.
///
/// Exits the process with an error message if the file cannot be read or
/// parsed; geometry validation happens later, when the simulator is built.
fn load_config(path: &Path) -> Config {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!(
            "\n[!] FATAL: could not read config '{}': {e}",
            path.display()
        );
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: could not parse config '{}': {e}", path.display());
        process::exit(1);
    })
}
