use std::collections::{BTreeMap, BTreeSet};

use crate::diff::result::{transition, MapDelta, SetDelta};

/// Compare two key sets: `new` is `after − before`, `removed` is
/// `before − after`.
pub fn set_delta(before: &BTreeSet<String>, after: &BTreeSet<String>) -> SetDelta {
    SetDelta {
        new: after.difference(before).cloned().collect(),
        removed: before.difference(after).cloned().collect(),
    }
}

/// Compare two keyed maps: membership moves to `added`/`removed`, keys on
/// both sides with differing values land in `changed` as transitions.
pub fn map_delta(before: &BTreeMap<String, String>, after: &BTreeMap<String, String>) -> MapDelta {
    let mut delta = MapDelta::default();

    for (key, after_value) in after {
        match before.get(key) {
            None => delta.added.push(key.clone()),
            Some(before_value) if before_value != after_value => {
                delta
                    .changed
                    .insert(key.clone(), transition(before_value, after_value));
            }
            Some(_) => {}
        }
    }
    for key in before.keys() {
        if !after.contains_key(key) {
            delta.removed.push(key.clone());
        }
    }

    delta
}

/// Compare two monotonic counter maps. A key absent from one side counts as
/// zero there; an entry is emitted only when the after value is strictly
/// greater than the before value. Decreases and ties indicate a counter
/// reset or steady state and are suppressed.
pub fn counter_delta<K: Ord + Clone>(
    before: &BTreeMap<K, u64>,
    after: &BTreeMap<K, u64>,
) -> BTreeMap<K, String> {
    let keys: BTreeSet<&K> = before.keys().chain(after.keys()).collect();

    keys.into_iter()
        .filter_map(|key| {
            let b = before.get(key).copied().unwrap_or(0);
            let a = after.get(key).copied().unwrap_or(0);
            (a > b).then(|| ((*key).clone(), transition(b, a)))
        })
        .collect()
}
