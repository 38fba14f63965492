use mo_diff_core::RawRecord;
use tracing::warn;

use crate::entity::Route;

use super::dedupe_by_key;

/// Normalize RIB route records. A route is its DN.
pub fn routes(records: &[RawRecord]) -> Vec<Route> {
    let kept = records
        .iter()
        .filter_map(|record| {
            let dn = record.attr_or_empty("dn");
            if dn.is_empty() {
                warn!(class = %record.class, "route record without dn, dropping");
                return None;
            }
            Some(Route { dn: dn.to_string() })
        })
        .collect();

    dedupe_by_key(kept, |route: &Route| route.dn.clone())
}
