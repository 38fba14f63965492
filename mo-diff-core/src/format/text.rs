use std::collections::BTreeMap;

use crate::diff::result::{MapDelta, SetDelta};

/// Format a set delta as plain text, one key per line: `+` for new keys,
/// `-` for removed ones.
pub fn format_set(delta: &SetDelta) -> String {
    let mut lines = Vec::with_capacity(delta.new.len() + delta.removed.len());
    for key in &delta.new {
        lines.push(format!("+ {key}"));
    }
    for key in &delta.removed {
        lines.push(format!("- {key}"));
    }
    lines.join("\n")
}

/// Format a map delta as plain text: `+`/`-` for membership moves, `~` with
/// the transition for changed values.
pub fn format_map(delta: &MapDelta) -> String {
    let mut lines =
        Vec::with_capacity(delta.added.len() + delta.removed.len() + delta.changed.len());
    for key in &delta.added {
        lines.push(format!("+ {key}"));
    }
    for key in &delta.removed {
        lines.push(format!("- {key}"));
    }
    for (key, change) in &delta.changed {
        lines.push(format!("~ {key}: {change}"));
    }
    lines.join("\n")
}

/// Format counter transitions as plain text, one `~` line per key.
pub fn format_counters(changes: &BTreeMap<String, String>) -> String {
    changes
        .iter()
        .map(|(key, change)| format!("~ {key}: {change}"))
        .collect::<Vec<_>>()
        .join("\n")
}
