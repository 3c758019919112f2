use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{score, Projection};
use crate::signal::{Severity, Signal};

/// Policy verdict: the final pass/fail decision after dropping ignored
/// signal categories and scoring what remains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostureVerdict {
    pub pass: bool,
    pub score: u8,
    pub fail_threshold: u8,
    pub total_signals: usize,
    pub effective_signals: usize,
    pub highest_severity: Option<Severity>,
}

/// Policy configuration loaded from `.kubeposture.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Scores at or above this value fail the assessment.
    #[serde(default = "default_fail_above")]
    pub fail_above: u8,
    /// Signal names to drop before scoring.
    #[serde(default)]
    pub ignore_signals: HashSet<String>,
}

fn default_fail_above() -> u8 {
    70
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            fail_above: default_fail_above(),
            ignore_signals: HashSet::new(),
        }
    }
}

impl Policy {
    pub fn ignores(&self, signal: &Signal) -> bool {
        self.ignore_signals.contains(&signal.name)
    }

    /// Filter signals: remove ignored categories.
    pub fn apply(&self, signals: &[Signal]) -> Vec<Signal> {
        signals.iter().filter(|s| !self.ignores(s)).cloned().collect()
    }

    /// Evaluate raw signals against this policy and produce a verdict.
    pub fn evaluate(&self, signals: &[Signal]) -> PostureVerdict {
        let effective = self.apply(signals);
        let score = score::score(&Projection::from_signals(&effective));

        PostureVerdict {
            pass: score < self.fail_above,
            score,
            fail_threshold: self.fail_above,
            total_signals: signals.len(),
            effective_signals: effective.len(),
            highest_severity: effective.iter().map(|s| s.severity).max(),
        }
    }
}
