use std::collections::BTreeMap;

use mo_diff_core::{dn, RawRecord};

use crate::entity::{FabricNode, Role};
use crate::fields;

/// Depth below a system record at which health sub-objects can appear.
const HEALTH_CHILD_DEPTH: usize = 2;

/// Normalize leaf/spine system records, joining in per-node CPU and memory
/// utilization from their own record streams.
///
/// The utilization maps are built once per pass and keyed by the node marker
/// extracted from each record's DN; each system record then does a single
/// lookup. A node with no matching utilization record keeps 0.0 for that
/// metric — a silent default, not an error.
pub fn fabric_nodes(
    systems: &[RawRecord],
    cpu: &[RawRecord],
    mem: &[RawRecord],
) -> Vec<FabricNode> {
    let cpu_map = cpu_percentages(cpu);
    let mem_map = mem_percentages(mem);

    systems
        .iter()
        .filter_map(|record| {
            // Records without a leaf/spine role are controllers or
            // unclassified hardware; they are not fabric nodes.
            let role = Role::parse(record.attr_or_empty("role"))?;
            let key = node_key(record);
            Some(FabricNode {
                name: record.attr_or_empty("name").to_string(),
                role,
                serial: record.attr_or_empty("serial").to_string(),
                ip: fields::resolve_str(record, fields::NODE_IP),
                version: record.attr_or_empty("version").to_string(),
                uptime: record.attr_or_empty("systemUpTime").to_string(),
                health: node_health(record),
                cpu_pct: key
                    .as_deref()
                    .and_then(|k| cpu_map.get(k))
                    .copied()
                    .unwrap_or(0.0),
                mem_pct: key
                    .as_deref()
                    .and_then(|k| mem_map.get(k))
                    .copied()
                    .unwrap_or(0.0),
            })
        })
        .collect()
}

/// Health lives on a nested health sub-object when the subtree was included
/// in the response, otherwise on the system record itself.
fn node_health(record: &RawRecord) -> i64 {
    record
        .find_class("healthInst", HEALTH_CHILD_DEPTH)
        .map(|health| fields::resolve_health(health, fields::HEALTH))
        .unwrap_or_else(|| fields::resolve_health(record, fields::HEALTH))
}

/// Node marker used to join system records against the utilization maps:
/// the `id` attribute normalized to `node-<id>` form, falling back to the
/// DN marker.
fn node_key(record: &RawRecord) -> Option<String> {
    let id = record.attr_or_empty("id").trim().to_string();
    if !id.is_empty() {
        if id.starts_with("node-") {
            return Some(id);
        }
        return Some(format!("node-{id}"));
    }
    dn::node_id(record.attr_or_empty("dn"))
}

fn cpu_percentages(records: &[RawRecord]) -> BTreeMap<String, f64> {
    records
        .iter()
        .filter_map(|record| {
            let key = dn::node_id(record.attr_or_empty("dn"))?;
            Some((key, cpu_value(record)))
        })
        .collect()
}

/// CPU utilization is user + kernel time when the averages are present,
/// with a plain `util` field as the older-schema fallback.
fn cpu_value(record: &RawRecord) -> f64 {
    if record.attr("userAvg").is_some() || record.attr("kernelAvg").is_some() {
        fields::parse_f64(record, "userAvg") + fields::parse_f64(record, "kernelAvg")
    } else {
        fields::parse_f64(record, "util")
    }
}

fn mem_percentages(records: &[RawRecord]) -> BTreeMap<String, f64> {
    records
        .iter()
        .filter_map(|record| {
            let key = dn::node_id(record.attr_or_empty("dn"))?;
            Some((key, mem_value(record)))
        })
        .collect()
}

/// Memory utilization is reported pre-computed on newer controllers and as
/// used/total averages on older ones.
fn mem_value(record: &RawRecord) -> f64 {
    if record.attr("PercUsedMemoryAvg").is_some() {
        return fields::parse_f64(record, "PercUsedMemoryAvg");
    }
    let total = fields::parse_f64(record, "totalAvg");
    if total > 0.0 {
        fields::parse_f64(record, "usedAvg") / total * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use mo_diff_core::RawRecord;

    use super::fabric_nodes;
    use crate::entity::Role;

    fn record(class: &str, attrs: &[(&str, &str)]) -> RawRecord {
        let mut rec = RawRecord::new(class);
        for (name, value) in attrs {
            rec.attributes.insert(name.to_string(), value.to_string());
        }
        rec
    }

    fn system(id: &str, role: &str, health: &str) -> RawRecord {
        let name = format!("switch{id}");
        let dn = format!("topology/pod-1/node-{id}/sys");
        let mut sys = record(
            "topSystem",
            &[
                ("id", id),
                ("role", role),
                ("name", name.as_str()),
                ("dn", dn.as_str()),
            ],
        );
        sys.children
            .push(record("healthInst", &[("cur", health)]));
        sys
    }

    #[test]
    fn joins_cpu_and_memory_by_node_marker() {
        let systems = vec![system("101", "leaf", "95"), system("201", "spine", "99")];
        let cpu = vec![record(
            "procSysCPU1d",
            &[
                ("dn", "topology/pod-1/node-101/sys/proc/cpu1d"),
                ("userAvg", "10.5"),
                ("kernelAvg", "4.5"),
            ],
        )];
        let mem = vec![record(
            "procSysMem1d",
            &[
                ("dn", "topology/pod-1/node-101/sys/proc/mem1d"),
                ("usedAvg", "30"),
                ("totalAvg", "120"),
            ],
        )];

        let nodes = fabric_nodes(&systems, &cpu, &mem);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].role, Role::Leaf);
        assert_eq!(nodes[0].health, 95);
        assert_eq!(nodes[0].cpu_pct, 15.0);
        assert_eq!(nodes[0].mem_pct, 25.0);
        // No utilization records for node-201: silent zero defaults.
        assert_eq!(nodes[1].cpu_pct, 0.0);
        assert_eq!(nodes[1].mem_pct, 0.0);
    }

    #[test]
    fn precomputed_memory_percentage_wins() {
        let systems = vec![system("101", "leaf", "95")];
        let mem = vec![record(
            "procSysMem1d",
            &[
                ("dn", "topology/pod-1/node-101/sys/proc/mem1d"),
                ("PercUsedMemoryAvg", "61.5"),
                ("usedAvg", "1"),
                ("totalAvg", "2"),
            ],
        )];

        let nodes = fabric_nodes(&systems, &[], &mem);
        assert_eq!(nodes[0].mem_pct, 61.5);
    }

    #[test]
    fn non_switch_roles_are_skipped() {
        let systems = vec![
            system("1", "controller", "90"),
            record("topSystem", &[("name", "roleless")]),
            system("101", "leaf", "90"),
        ];

        let nodes = fabric_nodes(&systems, &[], &[]);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "switch101");
    }

    #[test]
    fn health_falls_back_to_system_attributes() {
        let sys = record(
            "topSystem",
            &[("id", "102"), ("role", "leaf"), ("health", "88")],
        );
        let nodes = fabric_nodes(&[sys], &[], &[]);
        assert_eq!(nodes[0].health, 88);
    }
}
