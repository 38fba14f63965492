use anyhow::Result;
use fabricsnap::config::Config;
use fabricsnap::snapshot::list_snapshot_files;

use crate::cli::ListArgs;

pub fn run_list(args: ListArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let dir = args
        .snapshot_dir
        .unwrap_or_else(|| config.snapshots.dir.clone());

    let files = list_snapshot_files(&dir)?;
    if files.is_empty() {
        println!("no snapshots in {}", dir.display());
        return Ok(());
    }
    for file in files {
        println!("{}", file.display());
    }
    Ok(())
}
