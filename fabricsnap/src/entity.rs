//! Normalized entity shapes, one per tracked category.
//!
//! These are the canonical forms raw records normalize into, and the shapes
//! snapshots persist. Historical comparison reads them back without
//! re-normalizing, so every field is a JSON-compatible scalar.

use serde::{Deserialize, Serialize};

/// Fault severity ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Major,
    Minor,
    Warning,
}

impl Severity {
    /// Parse a wire severity string, case-insensitively.
    pub fn parse(raw: &str) -> Option<Severity> {
        match raw.to_ascii_lowercase().as_str() {
            "critical" => Some(Severity::Critical),
            "major" => Some(Severity::Major),
            "minor" => Some(Severity::Minor),
            "warning" => Some(Severity::Warning),
            _ => None,
        }
    }

    /// Whether the severity is tracked by snapshots and health checks.
    pub fn is_actionable(self) -> bool {
        matches!(self, Severity::Critical | Severity::Major)
    }
}

/// Switch role in the fabric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Leaf,
    Spine,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.to_ascii_lowercase().as_str() {
            "leaf" => Some(Role::Leaf),
            "spine" => Some(Role::Spine),
            _ => None,
        }
    }
}

/// Fabric-wide health score, 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScore {
    pub value: i64,
}

/// One fault instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    pub dn: String,
    pub severity: Severity,
    pub code: String,
    pub description: String,
    /// Last transition timestamp, kept verbatim: unparsable timestamps must
    /// survive normalization (fail-open), so no stronger type fits.
    pub last_change: String,
}

/// Operational state of one physical interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceState {
    pub dn: String,
    pub oper_state: String,
}

/// One learned endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub dn: String,
    pub ip: Option<String>,
}

/// One RIB route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub dn: String,
}

/// One interface error counter sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCounter {
    pub dn: String,
    /// Owning node derived from the DN (`node-<digits>` or `Unknown`).
    pub node_id: String,
    /// Port name derived from the DN (or `Unknown`).
    pub interface_name: String,
    pub count: u64,
}

/// One cluster controller node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerNode {
    pub name: String,
    pub serial: String,
    pub mode: String,
    pub oper_status: String,
    pub health: i64,
}

/// One leaf or spine switch, with utilization joined in from the CPU and
/// memory record streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FabricNode {
    pub name: String,
    pub role: Role,
    pub serial: String,
    pub ip: String,
    pub version: String,
    pub uptime: String,
    pub health: i64,
    pub cpu_pct: f64,
    pub mem_pct: f64,
}
