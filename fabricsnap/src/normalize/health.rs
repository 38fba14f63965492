use mo_diff_core::RawRecord;

use crate::entity::HealthScore;
use crate::fields;

/// Extract the fabric-wide health score.
///
/// Prefers the health-rollup class; if no record carries it (older
/// controllers report the rollup under a subclassed name), falls back to the
/// first record in the payload. An empty payload yields an empty collection.
pub fn health_scores(records: &[RawRecord]) -> Vec<HealthScore> {
    records
        .iter()
        .find(|record| record.class.contains("fabricHealthTotal"))
        .or_else(|| records.first())
        .map(|record| {
            vec![HealthScore {
                value: fields::resolve_health(record, fields::HEALTH),
            }]
        })
        .unwrap_or_default()
}
