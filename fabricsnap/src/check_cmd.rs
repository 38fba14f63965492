use anyhow::{bail, Result};
use fabricsnap::classify::{classify, collect, Thresholds};
use fabricsnap::config::Config;
use fabricsnap::normalize::FaultWindow;
use fabricsnap::report::render_health_text;
use mo_diff_core::format_json;

use crate::cli::{CheckArgs, OutputFormat};
use crate::connect::build_source;

pub fn run_check(args: CheckArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let thresholds = Thresholds {
        health: args.health_threshold.unwrap_or(config.thresholds.health),
        cpu_mem: args.cpu_mem_threshold.unwrap_or(config.thresholds.cpu_mem),
        interface_errors: args
            .interface_error_threshold
            .unwrap_or(config.thresholds.interface_errors),
    };
    let window = FaultWindow::last_hours(
        args.lookback_hours
            .unwrap_or(config.snapshots.fault_lookback_hours),
    );

    let source = build_source(&args.source, &config)?;
    let inputs = collect(source.as_ref(), &window, &thresholds);
    let report = classify(&inputs, &thresholds);

    match args.format {
        OutputFormat::Text => println!("{}", render_health_text(&report)),
        OutputFormat::Json => println!("{}", format_json(&report)),
    }

    if args.strict && !report.overall_status.is_pass() {
        bail!("strict mode failed: overall status is FAIL");
    }
    Ok(())
}
