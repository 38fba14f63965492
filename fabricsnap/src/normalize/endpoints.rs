use mo_diff_core::RawRecord;
use tracing::warn;

use crate::entity::Endpoint;

use super::dedupe_by_key;

/// Normalize learned endpoint records. The address is genuinely optional:
/// a layer-2-only endpoint has none.
pub fn endpoints(records: &[RawRecord]) -> Vec<Endpoint> {
    let kept = records
        .iter()
        .filter_map(|record| {
            let dn = record.attr_or_empty("dn");
            if dn.is_empty() {
                warn!(class = %record.class, "endpoint record without dn, dropping");
                return None;
            }
            Some(Endpoint {
                dn: dn.to_string(),
                ip: record.attr("ip").map(ToString::to_string),
            })
        })
        .collect();

    dedupe_by_key(kept, |ep: &Endpoint| ep.dn.clone())
}
