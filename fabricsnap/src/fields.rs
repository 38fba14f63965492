//! Ordered-candidate field resolution.
//!
//! Attribute names drift across controller versions and entity classes, so
//! each logical attribute resolves through an ordered list of candidate
//! source names: the first name present wins. The lists are data, not code,
//! so a future schema variant means adding a name here rather than another
//! branch in a normalizer.

use mo_diff_core::RawRecord;
use tracing::warn;

/// Display name of a controller node.
pub const CONTROLLER_NAME: &[&str] = &["nodeName", "name", "id"];

/// Chassis serial of a controller node.
pub const CONTROLLER_SERIAL: &[&str] = &["mbSn", "serial"];

/// Operational status of a controller node.
pub const OPER_STATUS: &[&str] = &["operSt", "status"];

/// Management address of a switch node.
pub const NODE_IP: &[&str] = &["oobMgmtAddr", "address"];

/// Health score of any health-bearing record.
pub const HEALTH: &[&str] = &["health", "cur"];

/// Resolve a string attribute: first candidate present wins, absent
/// resolves to the empty string.
pub fn resolve_str(record: &RawRecord, candidates: &[&str]) -> String {
    candidates
        .iter()
        .find_map(|name| record.attr(name))
        .unwrap_or("")
        .to_string()
}

/// Resolve a health score: first candidate present wins; known text tokens
/// map to their numeric value, anything else falls through a numeric parse
/// defaulting to 0.
pub fn resolve_health(record: &RawRecord, candidates: &[&str]) -> i64 {
    let raw = match candidates.iter().find_map(|name| record.attr(name)) {
        Some(raw) => raw,
        None => return 0,
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "fully-fit" | "fully fit" => 100,
        "degraded" => 50,
        trimmed => trimmed.parse().unwrap_or_else(|_| {
            if !trimmed.is_empty() {
                warn!(class = %record.class, value = raw, "unparsable health value, defaulting to 0");
            }
            0
        }),
    }
}

/// Resolve an unsigned counter: first candidate present wins; an absent
/// field is 0 silently, an unparsable one is 0 with a log line.
pub fn resolve_u64(record: &RawRecord, candidates: &[&str]) -> u64 {
    let (name, raw) = match candidates
        .iter()
        .find_map(|name| record.attr(name).map(|raw| (*name, raw)))
    {
        Some(found) => found,
        None => return 0,
    };
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(class = %record.class, field = name, value = raw, "unparsable counter value, defaulting to 0");
        0
    })
}

/// Parse a single float attribute; absent is 0.0 silently, unparsable is
/// 0.0 with a log line.
pub fn parse_f64(record: &RawRecord, name: &str) -> f64 {
    let raw = match record.attr(name) {
        Some(raw) => raw,
        None => return 0.0,
    };
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(class = %record.class, field = name, value = raw, "unparsable numeric value, defaulting to 0");
        0.0
    })
}

#[cfg(test)]
mod tests {
    use mo_diff_core::RawRecord;

    use super::{parse_f64, resolve_health, resolve_str, resolve_u64, CONTROLLER_NAME, HEALTH};

    fn record(attrs: &[(&str, &str)]) -> RawRecord {
        let mut rec = RawRecord::new("test");
        for (name, value) in attrs {
            rec.attributes.insert(name.to_string(), value.to_string());
        }
        rec
    }

    #[test]
    fn first_present_candidate_wins() {
        let rec = record(&[("name", "apic2"), ("id", "2")]);
        assert_eq!(resolve_str(&rec, CONTROLLER_NAME), "apic2");

        let rec = record(&[("id", "2")]);
        assert_eq!(resolve_str(&rec, CONTROLLER_NAME), "2");

        assert_eq!(resolve_str(&record(&[]), CONTROLLER_NAME), "");
    }

    #[test]
    fn health_tokens_map_before_numeric_parse() {
        assert_eq!(resolve_health(&record(&[("health", "fully-fit")]), HEALTH), 100);
        assert_eq!(resolve_health(&record(&[("health", "degraded")]), HEALTH), 50);
        assert_eq!(resolve_health(&record(&[("cur", "87")]), HEALTH), 87);
        assert_eq!(resolve_health(&record(&[("health", "unknown")]), HEALTH), 0);
        assert_eq!(resolve_health(&record(&[]), HEALTH), 0);
    }

    #[test]
    fn unparsable_counters_default_to_zero() {
        assert_eq!(resolve_u64(&record(&[("dropPkts", "42")]), &["dropPkts"]), 42);
        assert_eq!(resolve_u64(&record(&[("dropPkts", "n/a")]), &["dropPkts"]), 0);
        assert_eq!(resolve_u64(&record(&[]), &["dropPkts"]), 0);
    }

    #[test]
    fn float_fields_default_to_zero() {
        assert_eq!(parse_f64(&record(&[("userAvg", "12.5")]), "userAvg"), 12.5);
        assert_eq!(parse_f64(&record(&[("userAvg", "")]), "userAvg"), 0.0);
        assert_eq!(parse_f64(&record(&[]), "userAvg"), 0.0);
    }
}
