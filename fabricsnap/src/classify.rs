//! Threshold classification: one pass over live-normalized state, no
//! "before" side involved.
//!
//! Every sub-status is an independent pass/fail judgment against a
//! configured threshold; the overall status is their logical AND. A single
//! failing sub-status fails the whole check — there is no partial credit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::{ApiClass, ErrorKind};
use crate::entity::{ControllerNode, ErrorCounter, Fault, FabricNode, HealthScore, Severity};
use crate::normalize;
use crate::normalize::FaultWindow;
use crate::source::{fetch_records, ClassSource};

/// Pass/fail judgment for one sub-status or the whole check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl CheckStatus {
    fn of(ok: bool) -> CheckStatus {
        if ok {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        }
    }

    pub fn is_pass(self) -> bool {
        self == CheckStatus::Pass
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "PASS"),
            CheckStatus::Fail => write!(f, "FAIL"),
        }
    }
}

/// Configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Minimum acceptable health score, for controllers, switches, and the
    /// fabric rollup alike.
    pub health: i64,
    /// CPU and memory utilization must stay strictly below this percentage.
    pub cpu_mem: f64,
    /// Error counters at or below this value are ignored.
    pub interface_errors: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            health: 90,
            cpu_mem: 75.0,
            interface_errors: 0,
        }
    }
}

/// Everything the classifier consumes, normalized but unjudged.
#[derive(Debug, Clone, Default)]
pub struct HealthInputs {
    pub controllers: Vec<ControllerNode>,
    pub fabric_nodes: Vec<FabricNode>,
    pub fabric_health: Vec<HealthScore>,
    pub faults: Vec<Fault>,
    pub interface_errors: Vec<ErrorCounter>,
    pub crc_errors: Vec<ErrorCounter>,
    pub drop_errors: Vec<ErrorCounter>,
    pub output_errors: Vec<ErrorCounter>,
}

/// Health sub-status over a node collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeHealthSummary {
    pub status: CheckStatus,
    pub total: usize,
    /// Nodes below the health threshold.
    pub problems: usize,
}

/// Utilization sub-status over the switch collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UtilizationSummary {
    pub status: CheckStatus,
    /// Nodes at or above the CPU threshold.
    pub cpu_problems: usize,
    /// Nodes at or above the memory threshold.
    pub mem_problems: usize,
}

/// Fabric-wide health score sub-status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FabricSummary {
    pub status: CheckStatus,
    pub score: i64,
}

/// Fault sub-status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FaultSummary {
    pub status: CheckStatus,
    pub critical: usize,
    pub major: usize,
}

/// Error-counter sub-status for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CounterSummary {
    pub status: CheckStatus,
    /// Interfaces over the error threshold.
    pub count: usize,
}

/// The classification result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub overall_status: CheckStatus,
    pub controllers: NodeHealthSummary,
    pub fabric_nodes: NodeHealthSummary,
    pub cpu_mem: UtilizationSummary,
    pub fabric: FabricSummary,
    pub faults: FaultSummary,
    pub interface_errors: CounterSummary,
    pub crc_errors: CounterSummary,
    pub drop_errors: CounterSummary,
    pub output_errors: CounterSummary,
    pub thresholds: Thresholds,
}

/// Collect classifier inputs from a class source, normalizing directly —
/// no snapshot is persisted on this path.
pub fn collect(
    source: &dyn ClassSource,
    window: &FaultWindow,
    thresholds: &Thresholds,
) -> HealthInputs {
    let counters = |kind: ErrorKind| {
        normalize::error_counters(
            &fetch_records(source, kind.api_class()),
            kind,
            thresholds.interface_errors,
        )
    };

    HealthInputs {
        controllers: normalize::controllers(&fetch_records(source, ApiClass::Controller)),
        fabric_nodes: normalize::fabric_nodes(
            &fetch_records(source, ApiClass::System),
            &fetch_records(source, ApiClass::SysCpu),
            &fetch_records(source, ApiClass::SysMem),
        ),
        fabric_health: normalize::health_scores(&fetch_records(
            source,
            ApiClass::FabricHealthTotal,
        )),
        faults: normalize::faults(&fetch_records(source, ApiClass::FaultInst), window),
        interface_errors: counters(ErrorKind::Link),
        crc_errors: counters(ErrorKind::Crc),
        drop_errors: counters(ErrorKind::Drop),
        output_errors: counters(ErrorKind::Output),
    }
}

/// Classify one set of inputs against the thresholds.
///
/// Health judgments over collections are universally quantified, so an
/// empty collection passes vacuously; the overall status still reflects
/// every other category independently.
pub fn classify(inputs: &HealthInputs, thresholds: &Thresholds) -> HealthReport {
    let controllers = node_health(
        inputs.controllers.iter().map(|node| node.health),
        thresholds.health,
    );
    let fabric_nodes = node_health(
        inputs.fabric_nodes.iter().map(|node| node.health),
        thresholds.health,
    );

    let cpu_problems = inputs
        .fabric_nodes
        .iter()
        .filter(|node| node.cpu_pct >= thresholds.cpu_mem)
        .count();
    let mem_problems = inputs
        .fabric_nodes
        .iter()
        .filter(|node| node.mem_pct >= thresholds.cpu_mem)
        .count();
    let cpu_mem = UtilizationSummary {
        status: CheckStatus::of(cpu_problems == 0 && mem_problems == 0),
        cpu_problems,
        mem_problems,
    };

    let score = inputs
        .fabric_health
        .first()
        .map(|health| health.value)
        .unwrap_or(0);
    let fabric = FabricSummary {
        status: CheckStatus::of(score >= thresholds.health),
        score,
    };

    let critical = count_severity(&inputs.faults, Severity::Critical);
    let major = count_severity(&inputs.faults, Severity::Major);
    let faults = FaultSummary {
        status: CheckStatus::of(critical == 0 && major == 0),
        critical,
        major,
    };

    let interface_errors = counter_summary(&inputs.interface_errors);
    let crc_errors = counter_summary(&inputs.crc_errors);
    let drop_errors = counter_summary(&inputs.drop_errors);
    let output_errors = counter_summary(&inputs.output_errors);

    let overall = controllers.status.is_pass()
        && fabric_nodes.status.is_pass()
        && cpu_mem.status.is_pass()
        && fabric.status.is_pass()
        && faults.status.is_pass()
        && interface_errors.status.is_pass()
        && crc_errors.status.is_pass()
        && drop_errors.status.is_pass()
        && output_errors.status.is_pass();

    HealthReport {
        overall_status: CheckStatus::of(overall),
        controllers,
        fabric_nodes,
        cpu_mem,
        fabric,
        faults,
        interface_errors,
        crc_errors,
        drop_errors,
        output_errors,
        thresholds: *thresholds,
    }
}

fn node_health(healths: impl Iterator<Item = i64>, threshold: i64) -> NodeHealthSummary {
    let mut total = 0;
    let mut problems = 0;
    for health in healths {
        total += 1;
        if health < threshold {
            problems += 1;
        }
    }
    NodeHealthSummary {
        status: CheckStatus::of(problems == 0),
        total,
        problems,
    }
}

fn count_severity(faults: &[Fault], severity: Severity) -> usize {
    faults.iter().filter(|f| f.severity == severity).count()
}

/// Counters were already filtered to counts above the threshold during
/// normalization, so the judgment is simply emptiness.
fn counter_summary(counters: &[ErrorCounter]) -> CounterSummary {
    CounterSummary {
        status: CheckStatus::of(counters.is_empty()),
        count: counters.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::{classify, CheckStatus, HealthInputs, Thresholds};
    use crate::entity::{ControllerNode, ErrorCounter, Fault, FabricNode, HealthScore, Role, Severity};

    fn controller(health: i64) -> ControllerNode {
        ControllerNode {
            name: "apic1".to_string(),
            serial: String::new(),
            mode: String::new(),
            oper_status: "available".to_string(),
            health,
        }
    }

    fn switch(health: i64, cpu: f64, mem: f64) -> FabricNode {
        FabricNode {
            name: "leaf1".to_string(),
            role: Role::Leaf,
            serial: String::new(),
            ip: String::new(),
            version: String::new(),
            uptime: String::new(),
            health,
            cpu_pct: cpu,
            mem_pct: mem,
        }
    }

    fn healthy_inputs() -> HealthInputs {
        HealthInputs {
            controllers: vec![controller(100)],
            fabric_nodes: vec![switch(95, 20.0, 40.0)],
            fabric_health: vec![HealthScore { value: 95 }],
            ..HealthInputs::default()
        }
    }

    #[test]
    fn healthy_inputs_pass_overall() {
        let report = classify(&healthy_inputs(), &Thresholds::default());
        assert_eq!(report.overall_status, CheckStatus::Pass);
        assert_eq!(report.fabric.score, 95);
        assert_eq!(report.faults.critical, 0);
    }

    #[test]
    fn empty_node_collections_pass_vacuously() {
        let inputs = HealthInputs {
            fabric_health: vec![HealthScore { value: 95 }],
            ..HealthInputs::default()
        };

        let report = classify(&inputs, &Thresholds::default());
        assert_eq!(report.controllers.status, CheckStatus::Pass);
        assert_eq!(report.fabric_nodes.status, CheckStatus::Pass);
        assert_eq!(report.cpu_mem.status, CheckStatus::Pass);
        assert_eq!(report.overall_status, CheckStatus::Pass);
    }

    #[test]
    fn missing_fabric_score_fails_independently_of_vacuous_passes() {
        let report = classify(&HealthInputs::default(), &Thresholds::default());
        // Node categories pass vacuously, but the absent score reads as 0.
        assert_eq!(report.controllers.status, CheckStatus::Pass);
        assert_eq!(report.fabric.status, CheckStatus::Fail);
        assert_eq!(report.overall_status, CheckStatus::Fail);
    }

    #[test]
    fn any_single_failure_fails_the_overall_status() {
        let mut inputs = healthy_inputs();
        inputs.faults = vec![Fault {
            dn: "f1".to_string(),
            severity: Severity::Major,
            code: String::new(),
            description: String::new(),
            last_change: String::new(),
        }];

        let report = classify(&inputs, &Thresholds::default());
        assert_eq!(report.faults.status, CheckStatus::Fail);
        assert_eq!(report.faults.major, 1);
        assert_eq!(report.overall_status, CheckStatus::Fail);
    }

    #[test]
    fn utilization_threshold_is_strict_below() {
        let mut inputs = healthy_inputs();
        inputs.fabric_nodes = vec![switch(95, 75.0, 10.0)];

        let report = classify(&inputs, &Thresholds::default());
        assert_eq!(report.cpu_mem.cpu_problems, 1);
        assert_eq!(report.cpu_mem.status, CheckStatus::Fail);

        inputs.fabric_nodes = vec![switch(95, 74.9, 74.9)];
        let report = classify(&inputs, &Thresholds::default());
        assert_eq!(report.cpu_mem.status, CheckStatus::Pass);
    }

    #[test]
    fn counters_over_threshold_fail_their_kind() {
        let mut inputs = healthy_inputs();
        inputs.crc_errors = vec![ErrorCounter {
            dn: "dn1".to_string(),
            node_id: "node-102".to_string(),
            interface_name: "eth1/5".to_string(),
            count: 12,
        }];

        let report = classify(&inputs, &Thresholds::default());
        assert_eq!(report.crc_errors.status, CheckStatus::Fail);
        assert_eq!(report.crc_errors.count, 1);
        assert_eq!(report.interface_errors.status, CheckStatus::Pass);
        assert_eq!(report.overall_status, CheckStatus::Fail);
    }

    #[test]
    fn node_health_below_threshold_is_counted() {
        let mut inputs = healthy_inputs();
        inputs.fabric_nodes = vec![switch(89, 10.0, 10.0), switch(95, 10.0, 10.0)];

        let report = classify(&inputs, &Thresholds::default());
        assert_eq!(report.fabric_nodes.total, 2);
        assert_eq!(report.fabric_nodes.problems, 1);
        assert_eq!(report.fabric_nodes.status, CheckStatus::Fail);
    }
}
