use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "fabricsnap")]
#[command(about = "Snapshot, compare, and health-check fabric controller state")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Capture a snapshot of fabric state and write it to disk.
    Snapshot(SnapshotArgs),
    /// Compare two snapshot files and report what changed.
    Compare(CompareArgs),
    /// Run threshold health checks against live fabric state.
    Check(CheckArgs),
    /// List captured snapshot files.
    List(ListArgs),
}

/// Where raw class payloads come from.
#[derive(Parser, Debug)]
pub struct SourceArgs {
    /// Controller host name or address.
    #[arg(long)]
    pub host: Option<String>,
    /// Controller login user.
    #[arg(long)]
    pub username: Option<String>,
    /// Read class payloads from a directory of <class>.json files instead
    /// of a live controller.
    #[arg(long, conflicts_with_all = ["host", "username"])]
    pub from_dir: Option<PathBuf>,
    /// Skip TLS certificate verification.
    #[arg(long)]
    pub insecure: bool,
    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Parser, Debug)]
pub struct SnapshotArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Config file (defaults to fabricsnap.toml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Directory the snapshot is written to.
    #[arg(long)]
    pub snapshot_dir: Option<PathBuf>,
    /// Exact output path, overriding the timestamped default name.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Fault lookback window in hours.
    #[arg(long)]
    pub lookback_hours: Option<i64>,
}

#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// Earlier snapshot file.
    pub before: Option<PathBuf>,
    /// Later snapshot file.
    pub after: Option<PathBuf>,
    /// Compare the two most recent snapshots in the snapshot directory.
    #[arg(long, conflicts_with_all = ["before", "after"])]
    pub latest: bool,
    /// Snapshot directory searched by --latest.
    #[arg(long)]
    pub snapshot_dir: Option<PathBuf>,
    /// Config file (defaults to fabricsnap.toml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Print only the per-section change counts.
    #[arg(long)]
    pub summary: bool,
    /// Also write the report as JSON to this path.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Config file (defaults to fabricsnap.toml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Minimum acceptable health score.
    #[arg(long)]
    pub health_threshold: Option<i64>,
    /// CPU/memory utilization ceiling, percent.
    #[arg(long)]
    pub cpu_mem_threshold: Option<f64>,
    /// Ignore error counters at or below this value.
    #[arg(long)]
    pub interface_error_threshold: Option<u64>,
    /// Fault lookback window in hours.
    #[arg(long)]
    pub lookback_hours: Option<i64>,
    /// Exit nonzero when the overall status is FAIL.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Snapshot directory to list.
    #[arg(long)]
    pub snapshot_dir: Option<PathBuf>,
    /// Config file (defaults to fabricsnap.toml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
