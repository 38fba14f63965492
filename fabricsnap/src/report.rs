//! Terminal rendering of comparison and health reports.

use colored::Colorize;

use crate::classify::{CheckStatus, HealthReport};
use crate::compare::ComparisonReport;

/// Render a comparison report for terminal output, one section per
/// category in canonical order.
pub fn render_comparison_text(report: &ComparisonReport) -> String {
    let mut out = Vec::new();

    out.push("fabric_health".to_string());
    out.push(format!("- before: {}", scalar(report.fabric_health.before)));
    out.push(format!("- after: {}", scalar(report.fabric_health.after)));

    push_section(&mut out, "new_faults", added_lines(&report.new_faults));
    push_section(
        &mut out,
        "cleared_faults",
        removed_lines(&report.cleared_faults),
    );
    push_section(&mut out, "new_endpoints", added_lines(&report.new_endpoints));
    push_section(
        &mut out,
        "missing_endpoints",
        removed_lines(&report.missing_endpoints),
    );
    push_section(
        &mut out,
        "moved_endpoints",
        changed_lines(report.moved_endpoints.iter()),
    );

    let mut interface_lines = changed_lines(report.interface_changes.status_changed.iter());
    interface_lines.extend(removed_lines(&report.interface_changes.missing));
    interface_lines.extend(added_lines(&report.interface_changes.new));
    push_section(&mut out, "interface_changes", interface_lines);

    push_section(
        &mut out,
        "interface_error_changes",
        changed_lines(report.interface_error_changes.iter()),
    );
    push_section(
        &mut out,
        "crc_error_changes",
        changed_lines(report.crc_error_changes.iter()),
    );
    push_section(
        &mut out,
        "drop_error_changes",
        changed_lines(report.drop_error_changes.iter()),
    );
    push_section(
        &mut out,
        "output_error_changes",
        changed_lines(report.output_error_changes.iter()),
    );

    let mut route_lines = added_lines(&report.urib_route_changes.new);
    route_lines.extend(removed_lines(&report.urib_route_changes.missing));
    push_section(&mut out, "urib_route_changes", route_lines);

    out.join("\n")
}

/// Render per-section change counts on one line.
pub fn render_comparison_summary(report: &ComparisonReport) -> String {
    let counts: Vec<String> = report
        .section_counts()
        .into_iter()
        .map(|(section, count)| format!("{section}={count}"))
        .collect();
    counts.join(" ").cyan().to_string()
}

/// Render a health report for terminal output.
pub fn render_health_text(report: &HealthReport) -> String {
    let mut out = Vec::new();
    out.push(format!("overall {}", status(report.overall_status)));
    out.push(format!(
        "- controllers: {} ({} of {} below threshold)",
        status(report.controllers.status),
        report.controllers.problems,
        report.controllers.total
    ));
    out.push(format!(
        "- fabric_nodes: {} ({} of {} below threshold)",
        status(report.fabric_nodes.status),
        report.fabric_nodes.problems,
        report.fabric_nodes.total
    ));
    out.push(format!(
        "- cpu_mem: {} ({} cpu, {} memory at/above threshold)",
        status(report.cpu_mem.status),
        report.cpu_mem.cpu_problems,
        report.cpu_mem.mem_problems
    ));
    out.push(format!(
        "- fabric_health: {} (score {})",
        status(report.fabric.status),
        report.fabric.score
    ));
    out.push(format!(
        "- faults: {} ({} critical, {} major)",
        status(report.faults.status),
        report.faults.critical,
        report.faults.major
    ));
    for (name, summary) in [
        ("interface_errors", &report.interface_errors),
        ("crc_errors", &report.crc_errors),
        ("drop_errors", &report.drop_errors),
        ("output_errors", &report.output_errors),
    ] {
        out.push(format!(
            "- {name}: {} ({} interfaces)",
            status(summary.status),
            summary.count
        ));
    }
    out.push(format!(
        "thresholds health={} cpu_mem={} interface_errors={}",
        report.thresholds.health, report.thresholds.cpu_mem, report.thresholds.interface_errors
    ));
    out.join("\n")
}

fn status(value: CheckStatus) -> String {
    if value.is_pass() {
        value.to_string().green().to_string()
    } else {
        value.to_string().red().to_string()
    }
}

fn scalar(value: Option<i64>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.to_string())
}

fn push_section(out: &mut Vec<String>, title: &str, lines: Vec<String>) {
    out.push(String::new());
    out.push(title.to_string());
    if lines.is_empty() {
        out.push("- none".to_string());
    } else {
        out.extend(lines);
    }
}

fn added_lines(keys: &[String]) -> Vec<String> {
    keys.iter()
        .map(|key| format!("+ {key}").green().to_string())
        .collect()
}

fn removed_lines(keys: &[String]) -> Vec<String> {
    keys.iter()
        .map(|key| format!("- {key}").red().to_string())
        .collect()
}

fn changed_lines<'a>(entries: impl Iterator<Item = (&'a String, &'a String)>) -> Vec<String> {
    entries
        .map(|(key, change)| format!("~ {key}: {change}").yellow().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{render_comparison_summary, render_comparison_text, render_health_text};
    use crate::classify::{classify, HealthInputs, Thresholds};
    use crate::compare::compare;
    use crate::entity::{Fault, Severity};
    use crate::snapshot::Snapshot;

    fn empty_snapshot() -> Snapshot {
        Snapshot {
            captured_at: Utc::now(),
            fabric_health: Vec::new(),
            faults: Vec::new(),
            interfaces: Vec::new(),
            interface_errors: Vec::new(),
            crc_errors: Vec::new(),
            drop_errors: Vec::new(),
            output_errors: Vec::new(),
            endpoints: Vec::new(),
            urib_routes: Vec::new(),
        }
    }

    #[test]
    fn comparison_text_lists_every_section() {
        colored::control::set_override(false);
        let mut after = empty_snapshot();
        after.faults = vec![Fault {
            dn: "F3".to_string(),
            severity: Severity::Critical,
            code: String::new(),
            description: String::new(),
            last_change: String::new(),
        }];

        let report = compare(&empty_snapshot(), &after);
        let text = render_comparison_text(&report);
        assert!(text.contains("fabric_health"));
        assert!(text.contains("+ F3"));
        assert!(text.contains("urib_route_changes"));
        assert!(text.contains("- none"));

        let summary = render_comparison_summary(&report);
        assert!(summary.contains("new_faults=1"));
    }

    #[test]
    fn health_text_reports_overall_and_thresholds() {
        colored::control::set_override(false);
        let text = render_health_text(&classify(&HealthInputs::default(), &Thresholds::default()));
        assert!(text.contains("overall FAIL"));
        assert!(text.contains("- controllers: PASS (0 of 0 below threshold)"));
        assert!(text.contains("thresholds health=90 cpu_mem=75 interface_errors=0"));
    }
}
