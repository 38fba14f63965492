use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use mo_diff_core::RawRecord;
use tracing::warn;

use crate::entity::{Fault, Severity};

use super::dedupe_by_key;

/// Lookback window applied to fault last-transition timestamps.
#[derive(Debug, Clone, Copy)]
pub struct FaultWindow {
    /// Oldest last-transition instant still included.
    pub not_before: DateTime<Utc>,
}

impl FaultWindow {
    /// A window reaching `hours` back from now.
    pub fn last_hours(hours: i64) -> Self {
        Self {
            not_before: Utc::now() - Duration::hours(hours),
        }
    }

    fn includes(&self, raw: &str) -> bool {
        if raw.is_empty() {
            // Nothing to judge; keep the fault.
            return true;
        }
        match parse_timestamp(raw) {
            Some(ts) => ts >= self.not_before,
            None => {
                // Fail open: a fault must not disappear because the
                // timestamp format drifted.
                warn!(value = raw, "unparsable fault timestamp, keeping fault");
                true
            }
        }
    }
}

/// Normalize fault records: only critical/major faults whose last
/// transition falls inside the window survive. Duplicate DNs keep the last
/// record seen.
pub fn faults(records: &[RawRecord], window: &FaultWindow) -> Vec<Fault> {
    let kept = records
        .iter()
        .filter_map(|record| {
            let severity = Severity::parse(record.attr_or_empty("severity"))?;
            if !severity.is_actionable() {
                return None;
            }
            let dn = record.attr_or_empty("dn");
            if dn.is_empty() {
                warn!(class = %record.class, "fault record without dn, dropping");
                return None;
            }
            let last_change = record.attr_or_empty("lastTransition").to_string();
            if !window.includes(&last_change) {
                return None;
            }
            Some(Fault {
                dn: dn.to_string(),
                severity,
                code: record.attr_or_empty("code").to_string(),
                description: record.attr_or_empty("descr").to_string(),
                last_change,
            })
        })
        .collect();

    dedupe_by_key(kept, |fault: &Fault| fault.dn.clone())
}

/// Parse a controller timestamp. RFC 3339 covers the common
/// `2024-01-15T10:30:00.000+00:00` form; the fallback strips fractional
/// seconds and suffix for the bare `...T10:30:00` shape.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    let head = raw.split('.').next()?;
    NaiveDateTime::parse_from_str(head, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use mo_diff_core::RawRecord;

    use super::{faults, FaultWindow};
    use crate::entity::Severity;

    fn fault(dn: &str, severity: &str, last_transition: &str) -> RawRecord {
        let mut rec = RawRecord::new("faultInst");
        rec.attributes.insert("dn".to_string(), dn.to_string());
        rec.attributes
            .insert("severity".to_string(), severity.to_string());
        rec.attributes
            .insert("code".to_string(), "F0103".to_string());
        rec.attributes
            .insert("lastTransition".to_string(), last_transition.to_string());
        rec
    }

    fn window_20h() -> FaultWindow {
        FaultWindow::last_hours(20)
    }

    #[test]
    fn keeps_only_actionable_severities() {
        let records = vec![
            fault("f-crit", "critical", ""),
            fault("f-minor", "minor", ""),
            fault("f-warn", "warning", ""),
            fault("f-major", "major", ""),
        ];

        let kept = faults(&records, &window_20h());
        let dns: Vec<&str> = kept.iter().map(|f| f.dn.as_str()).collect();
        assert_eq!(dns, vec!["f-crit", "f-major"]);
        assert_eq!(kept[0].severity, Severity::Critical);
    }

    #[test]
    fn old_faults_fall_outside_the_window() {
        let recent = (Utc::now() - Duration::hours(1))
            .format("%Y-%m-%dT%H:%M:%S%.3f+00:00")
            .to_string();
        let stale = (Utc::now() - Duration::hours(48))
            .format("%Y-%m-%dT%H:%M:%S%.3f+00:00")
            .to_string();

        let records = vec![fault("f-new", "critical", &recent), fault("f-old", "critical", &stale)];
        let kept = faults(&records, &window_20h());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].dn, "f-new");
    }

    #[test]
    fn unparsable_timestamps_fail_open() {
        let records = vec![fault("f-odd", "major", "not-a-timestamp")];
        let kept = faults(&records, &window_20h());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].last_change, "not-a-timestamp");
    }

    #[test]
    fn duplicate_dns_keep_the_last_record() {
        let mut second = fault("f-dup", "critical", "");
        second
            .attributes
            .insert("descr".to_string(), "latest".to_string());
        let records = vec![fault("f-dup", "major", ""), second];

        let kept = faults(&records, &window_20h());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].severity, Severity::Critical);
        assert_eq!(kept[0].description, "latest");
    }

    #[test]
    fn bare_timestamp_format_parses() {
        let recent = (Utc::now() - Duration::hours(1))
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string();
        let kept = faults(&[fault("f1", "critical", &recent)], &window_20h());
        assert_eq!(kept.len(), 1);
    }
}
