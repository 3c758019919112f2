//! Posture aggregate and the read-only analysis passes over it.
//!
//! A run collects signals into a [`PostureAggregate`] (append-only), then
//! freezes it into a [`Posture`]. Only the frozen form exposes scoring,
//! ranking, attack paths and remediations, and it has no mutators, so the
//! passes can run from any number of threads.

pub mod counts;
pub mod policy;
pub mod projection;
pub mod score;

use crate::analysis::attack_path::{self, AttackPath};
use crate::analysis::remediation::{self, Remediation};
use crate::signal::Signal;

pub use counts::RiskLevelCounts;
pub use policy::{Policy, PostureVerdict};
pub use projection::{ProjectedSignal, Projection};

/// Signals collected during one assessment run.
#[derive(Debug, Clone, Default)]
pub struct PostureAggregate {
    signals: Vec<Signal>,
}

impl PostureAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, signal: Signal) {
        self.signals.push(signal);
    }

    pub fn extend<I: IntoIterator<Item = Signal>>(&mut self, signals: I) {
        self.signals.extend(signals);
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// End collection. The returned posture is read-only.
    pub fn freeze(self) -> Posture {
        Posture {
            signals: self.signals,
        }
    }
}

/// A frozen set of signals, ready for scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posture {
    signals: Vec<Signal>,
}

impl Posture {
    /// Every raw signal, in collection order.
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Deduplicated-by-name, max-weight view used by score and drivers.
    pub fn projection(&self) -> Projection<'_> {
        Projection::from_signals(&self.signals)
    }

    /// Severity tally over the raw signals.
    pub fn risk_level_counts(&self) -> RiskLevelCounts {
        RiskLevelCounts::from_signals(&self.signals)
    }

    pub fn score(&self) -> u8 {
        score::score(&self.projection())
    }

    pub fn drivers(&self) -> Vec<String> {
        score::drivers(&self.projection())
    }

    pub fn attack_paths(&self) -> Vec<AttackPath> {
        attack_path::derive(&self.signals)
    }

    pub fn remediations(&self) -> Vec<Remediation> {
        remediation::map(&self.signals)
    }
}

impl FromIterator<Signal> for PostureAggregate {
    fn from_iter<I: IntoIterator<Item = Signal>>(iter: I) -> Self {
        Self {
            signals: iter.into_iter().collect(),
        }
    }
}
