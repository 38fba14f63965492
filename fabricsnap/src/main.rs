use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod check_cmd;
mod cli;
mod compare_cmd;
mod connect;
mod list_cmd;
mod snapshot_cmd;

use cli::{Cli, Command};

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Snapshot(args) => snapshot_cmd::run_snapshot(args),
        Command::Compare(args) => compare_cmd::run_compare(args),
        Command::Check(args) => check_cmd::run_check(args),
        Command::List(args) => list_cmd::run_list(args),
    }
}

/// Logs go to stderr so reports on stdout stay machine-consumable.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fabricsnap=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
