//! Finding-to-signal adapter.
//!
//! Collaborators that only speak free text (`"[HIGH] Pod/x: hostPID"`) are
//! normalized here. Typed inspectors skip this module and hand their
//! signals straight to the aggregate.

pub mod category;
pub mod severity;

use std::collections::HashSet;

pub use category::{CategoryRule, CONTENT_RULES};
pub use severity::parse_severity;

use crate::signal::{Signal, SignalCategory};

/// Converts free-text findings into signals using a content rule table
/// and a severity fallback.
#[derive(Debug, Clone)]
pub struct FindingAdapter {
    rules: Vec<CategoryRule>,
}

impl FindingAdapter {
    /// Create an adapter with the built-in content rules.
    pub fn new() -> Self {
        Self {
            rules: CONTENT_RULES.to_vec(),
        }
    }

    /// Create an adapter with a custom content rule table.
    pub fn with_rules(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// Category a single finding maps to, ignoring per-run suppression.
    pub fn classify(&self, finding: &str) -> Option<SignalCategory> {
        let lowered = finding.to_lowercase();
        if let Some(rule) = self.rules.iter().find(|r| r.matches(&lowered)) {
            return Some(rule.category);
        }
        category::fallback_category(parse_severity(finding))
    }

    /// Convert every finding of one run into signals.
    ///
    /// Each category is emitted at most once per call; the first finding
    /// that maps to it wins.
    pub fn convert<S: AsRef<str>>(&self, findings: &[S]) -> Vec<Signal> {
        let mut seen: HashSet<&'static str> = HashSet::new();
        let mut out = Vec::new();

        for finding in findings {
            let Some(category) = self.classify(finding.as_ref()) else {
                continue;
            };
            if seen.insert(category.name) {
                out.push(category.signal());
            }
        }

        tracing::debug!(
            findings = findings.len(),
            signals = out.len(),
            "converted findings to signals"
        );
        out
    }
}

impl Default for FindingAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert findings with the built-in rule table.
pub fn signals_from_findings<S: AsRef<str>>(findings: &[S]) -> Vec<Signal> {
    FindingAdapter::new().convert(findings)
}
