//! Known signal categories.
//!
//! Weights for the typed RBAC and workload categories sit between 15 and 25,
//! so a single non-critical category alone scores at most 37 while two or
//! three of them compound quickly through the Euclidean norm.

use serde::Serialize;

use super::{Severity, Signal};

/// How a category is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalOrigin {
    /// Matched by content in a free-text finding.
    Finding,
    /// Severity-only fallback for findings that match no content rule.
    Fallback,
    /// Appended directly by a typed inspector.
    Typed,
}

impl std::fmt::Display for SignalOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finding => write!(f, "finding"),
            Self::Fallback => write!(f, "fallback"),
            Self::Typed => write!(f, "typed"),
        }
    }
}

/// Metadata for one signal category, used for `list-signals` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignalCategory {
    pub name: &'static str,
    pub severity: Severity,
    pub weight: u32,
    pub origin: SignalOrigin,
    pub description: &'static str,
}

impl SignalCategory {
    /// Build a signal of this category.
    pub fn signal(&self) -> Signal {
        Signal::new(self.name, self.severity, self.weight)
    }
}

pub const CLUSTER_ADMIN_BINDING: SignalCategory = SignalCategory {
    name: "ClusterAdminBinding",
    severity: Severity::Critical,
    weight: 40,
    origin: SignalOrigin::Finding,
    description: "A subject is bound to the cluster-admin role",
};

pub const NO_NETWORK_POLICY: SignalCategory = SignalCategory {
    name: "NoNetworkPolicy",
    severity: Severity::High,
    weight: 20,
    origin: SignalOrigin::Finding,
    description: "Workloads run in a namespace without any NetworkPolicy",
};

pub const PRIVILEGED_WORKLOAD: SignalCategory = SignalCategory {
    name: "PrivilegedWorkload",
    severity: Severity::High,
    weight: 25,
    origin: SignalOrigin::Finding,
    description: "A workload runs privileged or shares the host network or PID namespace",
};

pub const SECRETS_EXPOSURE: SignalCategory = SignalCategory {
    name: "SecretsExposure",
    severity: Severity::High,
    weight: 20,
    origin: SignalOrigin::Finding,
    description: "Secrets are exposed to containers through env vars or mounts",
};

pub const CRITICAL_FINDINGS_PRESENT: SignalCategory = SignalCategory {
    name: "CriticalFindingsPresent",
    severity: Severity::Critical,
    weight: 20,
    origin: SignalOrigin::Fallback,
    description: "At least one uncategorized critical finding",
};

pub const HIGH_FINDINGS_PRESENT: SignalCategory = SignalCategory {
    name: "HighFindingsPresent",
    severity: Severity::High,
    weight: 10,
    origin: SignalOrigin::Fallback,
    description: "At least one uncategorized high finding",
};

pub const MEDIUM_FINDINGS_PRESENT: SignalCategory = SignalCategory {
    name: "MediumFindingsPresent",
    severity: Severity::Medium,
    weight: 5,
    origin: SignalOrigin::Fallback,
    description: "At least one uncategorized medium finding",
};

pub const WILDCARD_RBAC: SignalCategory = SignalCategory {
    name: "WildcardRBAC",
    severity: Severity::High,
    weight: 25,
    origin: SignalOrigin::Typed,
    description: "An RBAC rule grants every verb (*)",
};

pub const WILDCARD_RBAC_RESOURCES: SignalCategory = SignalCategory {
    name: "WildcardRBACResources",
    severity: Severity::High,
    weight: 20,
    origin: SignalOrigin::Typed,
    description: "An RBAC rule applies to every resource (*)",
};

pub const DANGEROUS_RBAC_VERBS: SignalCategory = SignalCategory {
    name: "DangerousRBACVerbs",
    severity: Severity::Medium,
    weight: 15,
    origin: SignalOrigin::Typed,
    description: "An RBAC rule can create, delete, update or patch secrets or RBAC objects",
};

pub const SECRETS_ACCESS: SignalCategory = SignalCategory {
    name: "SecretsAccess",
    severity: Severity::High,
    weight: 20,
    origin: SignalOrigin::Typed,
    description: "An RBAC rule can read secrets",
};

pub const RBAC_ESCALATION_VERBS: SignalCategory = SignalCategory {
    name: "RBACEscalationVerbs",
    severity: Severity::High,
    weight: 25,
    origin: SignalOrigin::Typed,
    description: "An RBAC rule grants escalate, bind or impersonate",
};

pub const DEPLOYMENT_MISSING_LABELS: SignalCategory = SignalCategory {
    name: "DeploymentMissingLabels",
    severity: Severity::Low,
    weight: 15,
    origin: SignalOrigin::Typed,
    description: "A deployment carries no labels",
};

pub const MISSING_REQUIRED_CLUSTER_ROLE: SignalCategory = SignalCategory {
    name: "MissingRequiredClusterRole",
    severity: Severity::Medium,
    weight: 15,
    origin: SignalOrigin::Typed,
    description: "A cluster role required by configuration does not exist",
};

/// Every category this crate can emit.
pub fn all_categories() -> Vec<SignalCategory> {
    vec![
        CLUSTER_ADMIN_BINDING,
        NO_NETWORK_POLICY,
        PRIVILEGED_WORKLOAD,
        SECRETS_EXPOSURE,
        CRITICAL_FINDINGS_PRESENT,
        HIGH_FINDINGS_PRESENT,
        MEDIUM_FINDINGS_PRESENT,
        WILDCARD_RBAC,
        WILDCARD_RBAC_RESOURCES,
        DANGEROUS_RBAC_VERBS,
        SECRETS_ACCESS,
        RBAC_ESCALATION_VERBS,
        DEPLOYMENT_MISSING_LABELS,
        MISSING_REQUIRED_CLUSTER_ROLE,
    ]
}
