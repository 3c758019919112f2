use serde::{Deserialize, Serialize};

use crate::signal::{Severity, Signal};

/// Tally of every raw signal by severity. Not deduplicated: ten copies of
/// one category count ten times. INFO signals are not tallied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskLevelCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskLevelCounts {
    pub fn from_signals(signals: &[Signal]) -> Self {
        let mut counts = Self::default();
        for signal in signals {
            match signal.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
                Severity::Info => {}
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_raw_occurrences() {
        let signals = vec![
            Signal::new("A", Severity::Critical, 1),
            Signal::new("A", Severity::Critical, 1),
            Signal::new("B", Severity::High, 1),
        ];
        assert_eq!(
            RiskLevelCounts::from_signals(&signals),
            RiskLevelCounts {
                critical: 2,
                high: 1,
                medium: 0,
                low: 0
            }
        );
    }

    #[test]
    fn info_is_not_counted() {
        let signals = vec![Signal::new("Note", Severity::Info, 0)];
        assert_eq!(RiskLevelCounts::from_signals(&signals).total(), 0);
    }
}
