use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::signal::{Severity, Signal};

/// Placeholder substituted by [`Remediation::render_for`].
pub const NAMESPACE_PLACEHOLDER: &str = "{{NAMESPACE}}";

/// A fix suggestion tied to one signal category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remediation {
    pub id: String,
    pub title: String,
    pub priority: Severity,
    pub applies_to: String,
    /// Manifest template containing a namespace placeholder.
    pub template: String,
}

impl Remediation {
    /// The template with the namespace placeholder filled in.
    pub fn render_for(&self, namespace: &str) -> String {
        self.template.replace(NAMESPACE_PLACEHOLDER, namespace)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RemediationRule {
    pub signal: &'static str,
    pub id: &'static str,
    pub title: &'static str,
    pub priority: Severity,
    pub applies_to: &'static str,
    pub template: &'static str,
}

impl RemediationRule {
    fn build(&self) -> Remediation {
        Remediation {
            id: self.id.into(),
            title: self.title.into(),
            priority: self.priority,
            applies_to: self.applies_to.into(),
            template: self.template.into(),
        }
    }
}

const DEFAULT_DENY_NETPOL: &str = "apiVersion: networking.k8s.io/v1
kind: NetworkPolicy
metadata:
  name: default-deny
  namespace: {{NAMESPACE}}
spec:
  podSelector: {}
  policyTypes:
  - Ingress
  - Egress
";

pub const REMEDIATION_RULES: &[RemediationRule] = &[RemediationRule {
    signal: "NoNetworkPolicy",
    id: "default-deny-netpol",
    title: "Apply default deny NetworkPolicy",
    priority: Severity::High,
    applies_to: "Namespace",
    template: DEFAULT_DENY_NETPOL,
}];

/// Map the built-in remediation table over raw signals.
pub fn map(signals: &[Signal]) -> Vec<Remediation> {
    map_with(REMEDIATION_RULES, signals)
}

/// One remediation per raw occurrence of a matching signal. Use
/// [`dedup_by_id`] for a unique list.
pub fn map_with(rules: &[RemediationRule], signals: &[Signal]) -> Vec<Remediation> {
    signals
        .iter()
        .filter_map(|s| rules.iter().find(|r| r.signal == s.name))
        .map(RemediationRule::build)
        .collect()
}

/// Keep the first remediation for each id, preserving order.
pub fn dedup_by_id(remediations: Vec<Remediation>) -> Vec<Remediation> {
    let mut seen = HashSet::new();
    remediations
        .into_iter()
        .filter(|r| seen.insert(r.id.clone()))
        .collect()
}
