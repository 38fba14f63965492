use mo_diff_core::{dn, RawRecord};
use tracing::warn;

use crate::category::ErrorKind;
use crate::entity::ErrorCounter;
use crate::fields;

use super::dedupe_by_key;

/// Normalize one error-counter record stream.
///
/// Only counters strictly above `threshold` are kept (the default threshold
/// of 0 keeps every interface that has ever counted an error). The owning
/// node and port are derived from the DN; a DN without markers keeps the
/// `Unknown` sentinels rather than being dropped.
pub fn error_counters(records: &[RawRecord], kind: ErrorKind, threshold: u64) -> Vec<ErrorCounter> {
    let kept = records
        .iter()
        .filter_map(|record| {
            let count = fields::resolve_u64(record, kind.counter_fields());
            if count <= threshold {
                return None;
            }
            let raw_dn = record.attr_or_empty("dn");
            if raw_dn.is_empty() {
                warn!(class = %record.class, kind = kind.category_name(), "counter record without dn, dropping");
                return None;
            }
            let location = dn::port_location(raw_dn);
            Some(ErrorCounter {
                dn: raw_dn.to_string(),
                node_id: location.node_id,
                interface_name: location.interface_name,
                count,
            })
        })
        .collect();

    dedupe_by_key(kept, |counter: &ErrorCounter| counter.dn.clone())
}
