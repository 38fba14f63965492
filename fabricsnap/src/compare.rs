//! Snapshot comparison: two captures in, one category-keyed change report
//! out.
//!
//! Each category uses the comparison strategy matching its shape (see
//! `mo_diff_core::diff`). All outputs are key-sorted; nothing depends on the
//! order records arrived in. Comparing a snapshot to itself yields an empty
//! report for every category.

use std::collections::{BTreeMap, BTreeSet};

use mo_diff_core::{counter_delta, map_delta, set_delta, ScalarChange};
use serde::Serialize;

use crate::entity::ErrorCounter;
use crate::snapshot::Snapshot;

/// Interface state movements between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InterfaceChanges {
    /// Interfaces present in both snapshots whose operational state changed.
    pub status_changed: BTreeMap<String, String>,
    /// Interfaces that disappeared.
    pub missing: Vec<String>,
    /// Interfaces that appeared.
    pub new: Vec<String>,
}

/// Route movements between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteChanges {
    pub new: Vec<String>,
    pub missing: Vec<String>,
}

/// The full change report between two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// Fabric health score on each side, verbatim; the report makes no
    /// judgment about the change.
    pub fabric_health: ScalarChange<i64>,
    pub new_faults: Vec<String>,
    pub cleared_faults: Vec<String>,
    pub new_endpoints: Vec<String>,
    pub missing_endpoints: Vec<String>,
    /// Endpoints present on both sides whose address changed.
    pub moved_endpoints: BTreeMap<String, String>,
    pub interface_changes: InterfaceChanges,
    /// Counter categories are keyed by the `node:port` pair derived from
    /// the DN, because differently-shaped DNs can name the same port.
    pub interface_error_changes: BTreeMap<String, String>,
    pub crc_error_changes: BTreeMap<String, String>,
    pub drop_error_changes: BTreeMap<String, String>,
    pub output_error_changes: BTreeMap<String, String>,
    pub urib_route_changes: RouteChanges,
}

impl ComparisonReport {
    /// Per-section change counts, in report order.
    pub fn section_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("new_faults", self.new_faults.len()),
            ("cleared_faults", self.cleared_faults.len()),
            ("new_endpoints", self.new_endpoints.len()),
            ("missing_endpoints", self.missing_endpoints.len()),
            ("moved_endpoints", self.moved_endpoints.len()),
            (
                "interface_changes",
                self.interface_changes.status_changed.len()
                    + self.interface_changes.missing.len()
                    + self.interface_changes.new.len(),
            ),
            ("interface_error_changes", self.interface_error_changes.len()),
            ("crc_error_changes", self.crc_error_changes.len()),
            ("drop_error_changes", self.drop_error_changes.len()),
            ("output_error_changes", self.output_error_changes.len()),
            (
                "urib_route_changes",
                self.urib_route_changes.new.len() + self.urib_route_changes.missing.len(),
            ),
        ]
    }
}

/// Compare two snapshots.
pub fn compare(before: &Snapshot, after: &Snapshot) -> ComparisonReport {
    let fault_delta = set_delta(&fault_dns(before), &fault_dns(after));
    let endpoint_delta = map_delta(&endpoint_map(before), &endpoint_map(after));
    let interface_delta = map_delta(&interface_map(before), &interface_map(after));
    let route_delta = set_delta(&route_dns(before), &route_dns(after));

    ComparisonReport {
        fabric_health: ScalarChange {
            before: health_value(before),
            after: health_value(after),
        },
        new_faults: fault_delta.new,
        cleared_faults: fault_delta.removed,
        new_endpoints: endpoint_delta.added,
        missing_endpoints: endpoint_delta.removed,
        moved_endpoints: endpoint_delta.changed,
        interface_changes: InterfaceChanges {
            status_changed: interface_delta.changed,
            missing: interface_delta.removed,
            new: interface_delta.added,
        },
        interface_error_changes: counter_delta(
            &counter_map(&before.interface_errors),
            &counter_map(&after.interface_errors),
        ),
        crc_error_changes: counter_delta(
            &counter_map(&before.crc_errors),
            &counter_map(&after.crc_errors),
        ),
        drop_error_changes: counter_delta(
            &counter_map(&before.drop_errors),
            &counter_map(&after.drop_errors),
        ),
        output_error_changes: counter_delta(
            &counter_map(&before.output_errors),
            &counter_map(&after.output_errors),
        ),
        urib_route_changes: RouteChanges {
            new: route_delta.new,
            missing: route_delta.removed,
        },
    }
}

fn health_value(snapshot: &Snapshot) -> Option<i64> {
    snapshot.fabric_health.first().map(|score| score.value)
}

fn fault_dns(snapshot: &Snapshot) -> BTreeSet<String> {
    snapshot.faults.iter().map(|f| f.dn.clone()).collect()
}

fn route_dns(snapshot: &Snapshot) -> BTreeSet<String> {
    snapshot.urib_routes.iter().map(|r| r.dn.clone()).collect()
}

fn endpoint_map(snapshot: &Snapshot) -> BTreeMap<String, String> {
    snapshot
        .endpoints
        .iter()
        .map(|ep| (ep.dn.clone(), ep.ip.clone().unwrap_or_default()))
        .collect()
}

fn interface_map(snapshot: &Snapshot) -> BTreeMap<String, String> {
    snapshot
        .interfaces
        .iter()
        .map(|intf| (intf.dn.clone(), intf.oper_state.clone()))
        .collect()
}

/// Key counters by the human-readable port pair rather than the raw DN.
/// Two DNs resolving to the same port collapse to one entry (last wins).
fn counter_map(counters: &[ErrorCounter]) -> BTreeMap<String, u64> {
    counters
        .iter()
        .map(|counter| {
            (
                format!("{}:{}", counter.node_id, counter.interface_name),
                counter.count,
            )
        })
        .collect()
}
