//! Controller object-class vocabulary: which classes the tool reads and
//! which counter fields each error kind resolves.

/// Object classes fetched from the controller, one response body each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiClass {
    /// Fabric-wide health rollup.
    FabricHealthTotal,
    /// Fault instances.
    FaultInst,
    /// Physical interface state.
    PhysIf,
    /// Learned client endpoints.
    ClientEndpoint,
    /// IPv4 unicast RIB routes.
    UribRoute,
    /// Link-level (FCS) error statistics.
    Dot3Stats,
    /// CRC/alignment error statistics.
    EtherStats,
    /// Egress drop statistics.
    EgrCounters,
    /// Interface output error statistics.
    IfOut,
    /// Cluster controller nodes.
    Controller,
    /// Leaf/spine system records, with health sub-objects.
    System,
    /// Per-node CPU utilization averages.
    SysCpu,
    /// Per-node memory utilization averages.
    SysMem,
}

impl ApiClass {
    /// Wire class name, as used in the endpoint path and payload file names.
    pub fn class_name(self) -> &'static str {
        match self {
            ApiClass::FabricHealthTotal => "fabricHealthTotal",
            ApiClass::FaultInst => "faultInst",
            ApiClass::PhysIf => "l1PhysIf",
            ApiClass::ClientEndpoint => "fvCEp",
            ApiClass::UribRoute => "uribv4Route",
            ApiClass::Dot3Stats => "rmonDot3Stats",
            ApiClass::EtherStats => "rmonEtherStats",
            ApiClass::EgrCounters => "rmonEgrCounters",
            ApiClass::IfOut => "rmonIfOut",
            ApiClass::Controller => "infraWiNode",
            ApiClass::System => "topSystem",
            ApiClass::SysCpu => "procSysCPU1d",
            ApiClass::SysMem => "procSysMem1d",
        }
    }

    /// Query string appended to the class endpoint, if any.
    ///
    /// Faults are pre-filtered to the actionable severities at the transport
    /// level to keep payloads small; normalization applies the same filter
    /// again and remains the authoritative one.
    pub fn query(self) -> Option<&'static str> {
        match self {
            ApiClass::System => Some("rsp-subtree-include=health"),
            ApiClass::FaultInst => Some(
                "query-target-filter=or(eq(faultInst.severity,\"critical\"),eq(faultInst.severity,\"major\"))",
            ),
            _ => None,
        }
    }
}

/// The four monotonic error-counter kinds tracked per interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Link-level FCS errors.
    Link,
    /// CRC/alignment errors.
    Crc,
    /// Dropped packets on egress.
    Drop,
    /// Output errors.
    Output,
}

impl ErrorKind {
    /// Class whose records carry this counter.
    pub fn api_class(self) -> ApiClass {
        match self {
            ErrorKind::Link => ApiClass::Dot3Stats,
            ErrorKind::Crc => ApiClass::EtherStats,
            ErrorKind::Drop => ApiClass::EgrCounters,
            ErrorKind::Output => ApiClass::IfOut,
        }
    }

    /// Ordered candidate field names for the counter value; the first one
    /// present wins. Field capitalization differs across controller
    /// versions, hence the fallbacks.
    pub fn counter_fields(self) -> &'static [&'static str] {
        match self {
            ErrorKind::Link => &["fCSErrors", "fcsErrors"],
            ErrorKind::Crc => &["cRCAlignErrors", "crcAlignErrors"],
            ErrorKind::Drop => &["dropPkts"],
            ErrorKind::Output => &["outErrors"],
        }
    }

    /// Category name used in snapshots and reports.
    pub fn category_name(self) -> &'static str {
        match self {
            ErrorKind::Link => "interface_errors",
            ErrorKind::Crc => "crc_errors",
            ErrorKind::Drop => "drop_errors",
            ErrorKind::Output => "output_errors",
        }
    }
}
