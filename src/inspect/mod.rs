//! Inspectors: the collaborators that turn a cluster snapshot into evidence.
//!
//! An inspector reports free-text findings (normalized later by the
//! finding adapter), typed signals (appended to the aggregate as-is) and
//! notes that explain where its typed signals came from.

pub mod builtin;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::InspectSettings;
use crate::inventory::ClusterInventory;
use crate::signal::{Signal, SignalCategory};

/// Output of one inspector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// Free-text findings, optionally prefixed with `[SEVERITY]`.
    pub findings: Vec<String>,
    /// Typed signals that bypass the finding adapter.
    pub signals: Vec<Signal>,
    /// One line per typed signal naming the offending object.
    pub notes: Vec<String>,
}

impl Evidence {
    pub fn finding(&mut self, finding: impl Into<String>) {
        self.findings.push(finding.into());
    }

    /// Record a typed signal and the object it was observed on.
    pub fn signal(&mut self, category: SignalCategory, subject: &str, detail: &str) {
        self.signals.push(category.signal());
        self.notes
            .push(format!("{}: {} ({})", subject, category.name, detail));
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty() && self.signals.is_empty()
    }
}

/// An inspector checks a `ClusterInventory` and produces evidence.
pub trait Inspector: Send + Sync {
    /// Short identifier used in logs (e.g., "rbac").
    fn name(&self) -> &'static str;

    /// Run the inspector against a snapshot. Never fails: missing data
    /// yields no evidence.
    fn inspect(&self, inventory: &ClusterInventory) -> Evidence;
}

/// Runs every registered inspector against a snapshot.
pub struct InspectorSet {
    inspectors: Vec<Box<dyn Inspector>>,
}

impl InspectorSet {
    /// Create a set with all built-in inspectors registered.
    pub fn new(settings: &InspectSettings) -> Self {
        Self {
            inspectors: builtin::all_inspectors(settings),
        }
    }

    pub fn with_inspectors(inspectors: Vec<Box<dyn Inspector>>) -> Self {
        Self { inspectors }
    }

    /// Inspectors run in parallel; results come back in registration order.
    pub fn run(&self, inventory: &ClusterInventory) -> Vec<Evidence> {
        self.inspectors
            .par_iter()
            .map(|inspector| {
                let evidence = inspector.inspect(inventory);
                tracing::debug!(
                    inspector = inspector.name(),
                    findings = evidence.findings.len(),
                    signals = evidence.signals.len(),
                    "inspector finished"
                );
                evidence
            })
            .collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.inspectors.iter().map(|i| i.name()).collect()
    }
}

impl Default for InspectorSet {
    fn default() -> Self {
        Self::new(&InspectSettings::default())
    }
}
