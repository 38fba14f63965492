use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use fabricsnap::compare::compare;
use fabricsnap::config::Config;
use fabricsnap::report::{render_comparison_summary, render_comparison_text};
use fabricsnap::snapshot::{list_snapshot_files, Snapshot};
use mo_diff_core::format_json;

use crate::cli::{CompareArgs, OutputFormat};

pub fn run_compare(args: CompareArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let (before_path, after_path) = resolve_paths(&args, &config)?;

    let before = Snapshot::load(&before_path)?;
    let after = Snapshot::load(&after_path)?;
    let report = compare(&before, &after);

    if let Some(out_path) = &args.output {
        fs::write(out_path, format_json(&report))
            .with_context(|| format!("failed to write report file {}", out_path.display()))?;
    }

    if args.summary {
        println!("{}", render_comparison_summary(&report));
        return Ok(());
    }

    match args.format {
        OutputFormat::Text => {
            println!(
                "comparing {} to {}",
                before_path.display(),
                after_path.display()
            );
            println!();
            println!("{}", render_comparison_text(&report));
            println!();
            println!("{}", render_comparison_summary(&report));
        }
        OutputFormat::Json => println!("{}", format_json(&report)),
    }

    Ok(())
}

/// Explicit paths, or the two most recent files in the snapshot directory
/// with `--latest`.
fn resolve_paths(args: &CompareArgs, config: &Config) -> Result<(PathBuf, PathBuf)> {
    if args.latest {
        let dir = args
            .snapshot_dir
            .clone()
            .unwrap_or_else(|| config.snapshots.dir.clone());
        let files = list_snapshot_files(&dir)?;
        if files.len() < 2 {
            bail!(
                "need at least two snapshots in {} to compare",
                dir.display()
            );
        }
        return Ok((
            files[files.len() - 2].clone(),
            files[files.len() - 1].clone(),
        ));
    }

    match (&args.before, &args.after) {
        (Some(before), Some(after)) => Ok((before.clone(), after.clone())),
        _ => bail!("pass two snapshot files, or use --latest"),
    }
}
