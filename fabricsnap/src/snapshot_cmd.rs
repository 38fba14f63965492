use std::fs;

use anyhow::{Context, Result};
use fabricsnap::config::Config;
use fabricsnap::normalize::FaultWindow;
use fabricsnap::snapshot::{self, CaptureOptions};

use crate::cli::SnapshotArgs;
use crate::connect::build_source;

pub fn run_snapshot(args: SnapshotArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let source = build_source(&args.source, &config)?;

    let lookback = args
        .lookback_hours
        .unwrap_or(config.snapshots.fault_lookback_hours);
    let options = CaptureOptions {
        fault_window: FaultWindow::last_hours(lookback),
        error_threshold: config.thresholds.interface_errors,
    };

    let snap = snapshot::capture(source.as_ref(), &options);

    let path = match args.output {
        Some(path) => path,
        None => {
            let dir = args
                .snapshot_dir
                .unwrap_or_else(|| config.snapshots.dir.clone());
            fs::create_dir_all(&dir).with_context(|| {
                format!("failed to create snapshot directory {}", dir.display())
            })?;
            dir.join(snapshot::snapshot_file_name(
                &source.label(),
                snap.captured_at,
            ))
        }
    };
    snap.save(&path)?;

    println!(
        "snapshot captured_at={} written to {}",
        snapshot::format_captured_at(snap.captured_at),
        path.display()
    );
    Ok(())
}
