use mo_diff_core::RawRecord;
use tracing::warn;

use crate::entity::InterfaceState;

use super::dedupe_by_key;

/// Normalize physical interface records to their operational state.
pub fn interfaces(records: &[RawRecord]) -> Vec<InterfaceState> {
    let kept = records
        .iter()
        .filter_map(|record| {
            let dn = record.attr_or_empty("dn");
            if dn.is_empty() {
                warn!(class = %record.class, "interface record without dn, dropping");
                return None;
            }
            Some(InterfaceState {
                dn: dn.to_string(),
                oper_state: record.attr_or_empty("operSt").to_string(),
            })
        })
        .collect();

    dedupe_by_key(kept, |intf: &InterfaceState| intf.dn.clone())
}
