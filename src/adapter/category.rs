use crate::signal::catalog::{self, SignalCategory};
use crate::signal::Severity;

/// A content rule: findings whose lower-cased text satisfies `matches`
/// become a signal of `category`.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: SignalCategory,
    matches: fn(&str) -> bool,
}

impl CategoryRule {
    pub const fn new(category: SignalCategory, matches: fn(&str) -> bool) -> Self {
        Self { category, matches }
    }

    /// `lowered` must already be lower-cased.
    pub fn matches(&self, lowered: &str) -> bool {
        (self.matches)(lowered)
    }
}

fn mentions_cluster_admin(l: &str) -> bool {
    l.contains("cluster-admin")
}

fn mentions_network_policy(l: &str) -> bool {
    l.contains("networkpolicy")
}

fn mentions_privileged(l: &str) -> bool {
    l.contains("privileged") || l.contains("hostnetwork") || l.contains("hostpid")
}

fn mentions_exposed_secret(l: &str) -> bool {
    l.contains("secret") && (l.contains("env") || l.contains("mount"))
}

/// Built-in content rules in evaluation order. The first match ends
/// matching for a finding.
pub const CONTENT_RULES: &[CategoryRule] = &[
    CategoryRule::new(catalog::CLUSTER_ADMIN_BINDING, mentions_cluster_admin),
    CategoryRule::new(catalog::NO_NETWORK_POLICY, mentions_network_policy),
    CategoryRule::new(catalog::PRIVILEGED_WORKLOAD, mentions_privileged),
    CategoryRule::new(catalog::SECRETS_EXPOSURE, mentions_exposed_secret),
];

/// Severity-only category for findings no content rule claims.
pub fn fallback_category(severity: Severity) -> Option<SignalCategory> {
    match severity {
        Severity::Critical => Some(catalog::CRITICAL_FINDINGS_PRESENT),
        Severity::High => Some(catalog::HIGH_FINDINGS_PRESENT),
        Severity::Medium => Some(catalog::MEDIUM_FINDINGS_PRESENT),
        Severity::Low | Severity::Info => None,
    }
}
