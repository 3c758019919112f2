use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::signal::{Severity, Signal};

/// A multi-step escalation hypothesis built from co-occurring signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackPath {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    /// 0-100.
    pub confidence: u8,
    pub steps: Vec<AttackStep>,
    /// Names of the signals that triggered this path.
    pub evidence: Vec<String>,
}

/// One hop of an attack path narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackStep {
    pub kind: String,
    pub namespace: Option<String>,
    pub name: Option<String>,
    pub why: String,
}

#[derive(Debug, Clone, Copy)]
pub struct StepTemplate {
    pub kind: &'static str,
    pub why: &'static str,
}

/// A declarative attack-path pattern.
///
/// Every trigger group must be satisfied; a group is satisfied when any of
/// its names is present.
#[derive(Debug, Clone, Copy)]
pub struct AttackPathRule {
    pub id: &'static str,
    pub title: &'static str,
    pub severity: Severity,
    pub confidence: u8,
    pub triggers: &'static [&'static [&'static str]],
    pub steps: &'static [StepTemplate],
}

pub const ATTACK_PATH_RULES: &[AttackPathRule] = &[
    AttackPathRule {
        id: "pod-to-cluster-admin",
        title: "Workload to Cluster Admin Escalation",
        severity: Severity::Critical,
        confidence: 85,
        // PrivilegedPod is the name older pod checkers emit.
        triggers: &[&["PrivilegedWorkload", "PrivilegedPod"], &["ClusterAdminBinding"]],
        steps: &[
            StepTemplate {
                kind: "Pod",
                why: "Privileged workload detected",
            },
            StepTemplate {
                kind: "RBAC",
                why: "cluster-admin role bound",
            },
        ],
    },
    AttackPathRule {
        id: "rbac-escalation-to-secrets",
        title: "RBAC Escalation to Secret Theft",
        severity: Severity::High,
        confidence: 70,
        triggers: &[&["RBACEscalationVerbs"], &["SecretsAccess"]],
        steps: &[
            StepTemplate {
                kind: "RBAC",
                why: "escalate, bind or impersonate verbs granted",
            },
            StepTemplate {
                kind: "Secret",
                why: "secrets readable through RBAC",
            },
        ],
    },
];

impl AttackPathRule {
    /// Evidence names if every trigger group is satisfied.
    fn evidence(&self, present: &HashSet<&str>) -> Option<Vec<String>> {
        self.triggers
            .iter()
            .map(|group| {
                group
                    .iter()
                    .find(|name| present.contains(**name))
                    .map(|name| name.to_string())
            })
            .collect()
    }

    fn build(&self, evidence: Vec<String>) -> AttackPath {
        AttackPath {
            id: self.id.into(),
            title: self.title.into(),
            severity: self.severity,
            confidence: self.confidence,
            steps: self
                .steps
                .iter()
                .map(|s| AttackStep {
                    kind: s.kind.into(),
                    namespace: None,
                    name: None,
                    why: s.why.into(),
                })
                .collect(),
            evidence,
        }
    }
}

/// Evaluate the built-in rule table.
pub fn derive(signals: &[Signal]) -> Vec<AttackPath> {
    derive_with(ATTACK_PATH_RULES, signals)
}

/// Evaluate `rules` independently against `signals`; each rule fires at
/// most once.
pub fn derive_with(rules: &[AttackPathRule], signals: &[Signal]) -> Vec<AttackPath> {
    let present: HashSet<&str> = signals.iter().map(|s| s.name.as_str()).collect();

    rules
        .iter()
        .filter_map(|rule| rule.evidence(&present).map(|ev| rule.build(ev)))
        .collect()
}
