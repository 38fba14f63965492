use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Before/after pair for a scalar category.
///
/// The diff itself makes no judgment about the change; `None` means the side
/// had no value for the category at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarChange<T> {
    pub before: Option<T>,
    pub after: Option<T>,
}

/// Membership delta for a set-shaped category. Both key lists are sorted
/// ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDelta {
    /// Keys present only in the after side.
    pub new: Vec<String>,
    /// Keys present only in the before side.
    pub removed: Vec<String>,
}

impl SetDelta {
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.removed.is_empty()
    }
}

/// Delta for a keyed map whose values may change. Key lists are sorted
/// ascending; `changed` values carry the [`transition`] rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDelta {
    /// Keys present only in the after side.
    pub added: Vec<String>,
    /// Keys present only in the before side.
    pub removed: Vec<String>,
    /// Keys present in both sides whose value differs.
    pub changed: BTreeMap<String, String>,
}

impl MapDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Render a value change as `{before}➜{after}`.
pub fn transition(before: impl Display, after: impl Display) -> String {
    format!("{before}➜{after}")
}
