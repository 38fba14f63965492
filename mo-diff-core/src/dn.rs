//! Distinguished-name marker extraction.
//!
//! DNs are hierarchical path strings such as
//! `topology/pod-1/node-102/sys/phys-[eth1/5]/dbgEtherStats`. Several record
//! classes only reveal their owning node and port through the DN, so one
//! extractor serves every consumer.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `node-<digits>` marker anywhere in the DN.
    static ref NODE_MARKER: Regex = Regex::new(r"node-(\d+)").unwrap();

    /// Bracketed port name in a `phys-[...]` or `aggr-[...]` segment.
    static ref PORT_MARKER: Regex = Regex::new(r"(?:phys|aggr)-\[([^\]]*)\]").unwrap();
}

/// Sentinel used when a DN carries no recognizable marker.
pub const UNKNOWN: &str = "Unknown";

/// The node/port pair a DN resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortLocation {
    /// Owning node in `node-<digits>` form, or [`UNKNOWN`].
    pub node_id: String,
    /// Port name (for example `eth1/5`), or [`UNKNOWN`].
    pub interface_name: String,
}

/// Extract the `node-<digits>` marker from a DN, keeping the prefix.
pub fn node_id(dn: &str) -> Option<String> {
    NODE_MARKER
        .captures(dn)
        .map(|caps| format!("node-{}", &caps[1]))
}

/// Resolve a DN to its node/port pair. Never fails: absent markers map to
/// the [`UNKNOWN`] sentinel, malformed DNs are fine.
pub fn port_location(dn: &str) -> PortLocation {
    let interface_name = PORT_MARKER
        .captures(dn)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());

    PortLocation {
        node_id: node_id(dn).unwrap_or_else(|| UNKNOWN.to_string()),
        interface_name,
    }
}
