//! N-way cache trace tool.
//!
//! This binary drives `nway-cache` with recorded workloads over `u64` keys and values. It performs:
//! 1. **Optimize:** Replays a trace at every way-count and reports the one with the fewest store fetches.
//! 2. **Simulate:** Replays a trace through a single configured cache and prints its statistics.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `nway_cache=info`).

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use nway_cache::cache::policies;
use nway_cache::config::PolicyKind;
use nway_cache::sim::{self, TraceEntry, trace};
use nway_cache::{Cache, CacheConfig, CacheError, MemoryStore};

type Trace = Vec<TraceEntry<u64, u64>>;

#[derive(Parser, Debug)]
#[command(
    name = "nway-opt",
    author,
    version,
    about = "N-way set-associative cache trace tool",
    long_about = "Replay JSON operation traces against an N-way set-associative cache.\n\nA trace is a JSON array of {\"key\", \"value\", \"op\"} objects with u64 keys and values.\n\nExamples:\n  nway-opt optimize -t trace.json -c 64 --policy lru\n  nway-opt simulate -t trace.json --config cache.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Find the way-count that minimizes backing-store fetches for a trace.
    Optimize {
        /// Trace file (JSON array of entries).
        #[arg(short, long)]
        trace: PathBuf,

        /// Total cache capacity in lines.
        #[arg(short, long)]
        capacity: usize,

        /// Replacement policy shared by every candidate.
        #[arg(short, long, value_enum, default_value_t = PolicyArg::Lru)]
        policy: PolicyArg,

        /// Seed for the random policy.
        #[arg(long)]
        seed: Option<u64>,

        /// Print the full report as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Replay a trace through one cache and print its statistics.
    Simulate {
        /// Trace file (JSON array of entries).
        #[arg(short, long)]
        trace: PathBuf,

        /// Cache configuration file; flags below override its fields.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Total cache capacity in lines.
        #[arg(short, long)]
        capacity: Option<usize>,

        /// Number of sets.
        #[arg(short, long)]
        ways: Option<usize>,

        /// Replacement policy.
        #[arg(short, long, value_enum)]
        policy: Option<PolicyArg>,

        /// Seed for the random policy.
        #[arg(long)]
        seed: Option<u64>,

        /// Disable write-back; misses become errors and the store is never used.
        #[arg(long)]
        write_through: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    Lru,
    Mru,
    Fifo,
    Random,
}

impl From<PolicyArg> for PolicyKind {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Lru => Self::Lru,
            PolicyArg::Mru => Self::Mru,
            PolicyArg::Fifo => Self::Fifo,
            PolicyArg::Random => Self::Random,
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "nway_cache=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Optimize {
            trace,
            capacity,
            policy,
            seed,
            json,
        } => cmd_optimize(&trace, capacity, policy.into(), seed, json),
        Commands::Simulate {
            trace,
            config,
            capacity,
            ways,
            policy,
            seed,
            write_through,
        } => {
            let mut cfg = config.map_or_else(CacheConfig::default, |path| load_config(&path));
            if let Some(capacity) = capacity {
                cfg.capacity = capacity;
            }
            if let Some(ways) = ways {
                cfg.ways = ways;
            }
            if let Some(policy) = policy {
                cfg.policy = policy.into();
            }
            if seed.is_some() {
                cfg.seed = seed;
            }
            if write_through {
                cfg.write_back = false;
            }
            cmd_simulate(&trace, &cfg);
        }
    }
}

/// Searches every way-count in `1..=capacity` and prints the winner.
fn cmd_optimize(path: &Path, capacity: usize, kind: PolicyKind, seed: Option<u64>, json: bool) {
    let entries = load_trace(path);
    let mut policy = policies::from_kind::<u64, u64>(kind, seed);

    info!(entries = entries.len(), capacity, ?kind, "optimizing associativity");
    let report = sim::optimize(capacity, &entries, &mut policy).unwrap_or_else(|e| {
        eprintln!("Error: optimization failed: {e}");
        process::exit(1);
    });

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: cannot encode report: {e}");
                process::exit(1);
            }
        }
        return;
    }

    println!("\n==========================================================");
    println!("ASSOCIATIVITY SEARCH (capacity {capacity}, {kind:?})");
    println!("==========================================================");
    println!("  {:>6}  {:>10}  {:>10}  {:>10}", "ways", "fetches", "hits", "evictions");
    println!("----------------------------------------------------------");
    for candidate in &report.candidates {
        let marker = if candidate.ways == report.best_ways { " *" } else { "" };
        println!(
            "  {:>6}  {:>10}  {:>10}  {:>10}{marker}",
            candidate.ways, candidate.fetches, candidate.stats.hits, candidate.stats.evictions
        );
    }
    println!("----------------------------------------------------------");
    println!(
        "  best: {} ways ({} lines per set), {} fetches",
        report.best_ways,
        capacity.div_ceil(report.best_ways),
        report.best_fetches
    );
}

/// Replays the trace once through a cache built from `config`.
fn cmd_simulate(path: &Path, config: &CacheConfig) {
    let entries = load_trace(path);
    let mut cache = Cache::from_config(MemoryStore::<u64, u64>::new(), config).unwrap_or_else(|e| {
        eprintln!("Error: invalid cache configuration: {e}");
        process::exit(1);
    });

    let mut not_found = 0_u64;
    for entry in entries {
        match cache.replay(entry.key, entry.value, entry.op) {
            Ok(()) => {}
            Err(CacheError::EntryNotFound) => not_found += 1,
            Err(e) => {
                eprintln!("Error: replay failed: {e}");
                process::exit(1);
            }
        }
    }
    if not_found > 0 {
        warn!(not_found, "operations targeted unresolvable keys");
    }

    println!(
        "capacity={} ways={} lines_per_set={} write_back={} policy={:?}",
        cache.capacity(),
        cache.ways(),
        cache.lines_per_set(),
        cache.is_write_back(),
        config.policy
    );
    println!("{}", cache.stats());
}

fn load_trace(path: &Path) -> Trace {
    trace::load(path).unwrap_or_else(|e| {
        eprintln!("Error reading trace {}: {e}", path.display());
        process::exit(1);
    })
}

fn load_config(path: &Path) -> CacheConfig {
    let file = std::fs::File::open(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {}: {e}", path.display());
        process::exit(1);
    });
    CacheConfig::from_reader(std::io::BufReader::new(file)).unwrap_or_else(|e| {
        eprintln!("Error parsing config {}: {e}", path.display());
        process::exit(1);
    })
}
