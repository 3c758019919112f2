use std::collections::BTreeMap;

use crate::signal::{Severity, Signal};

/// One entry per distinct signal name: the heaviest instance observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedSignal<'a> {
    pub name: &'a str,
    pub severity: Severity,
    pub weight: u32,
}

/// The deduplicated-by-name, max-weight view of a set of signals.
///
/// Keyed by name in a `BTreeMap` so iteration order never depends on
/// insertion or hashing. Signals with weight 0 never enter the projection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection<'a> {
    entries: BTreeMap<&'a str, ProjectedSignal<'a>>,
}

impl<'a> Projection<'a> {
    pub fn from_signals(signals: &'a [Signal]) -> Self {
        let mut entries: BTreeMap<&'a str, ProjectedSignal<'a>> = BTreeMap::new();

        for signal in signals {
            let current = entries.get(signal.name.as_str()).map_or(0, |e| e.weight);
            // Strictly greater: on equal weights the first instance keeps its severity.
            if signal.weight > current {
                entries.insert(
                    signal.name.as_str(),
                    ProjectedSignal {
                        name: &signal.name,
                        severity: signal.severity,
                        weight: signal.weight,
                    },
                );
            }
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ProjectedSignal<'a>> {
        self.entries.get(name)
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectedSignal<'a>> {
        self.entries.values()
    }

    pub fn weights(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.values().map(|e| e.weight)
    }

    /// Entries ordered by weight descending, then name ascending.
    pub fn ranked(&self) -> Vec<&ProjectedSignal<'a>> {
        let mut ranked: Vec<_> = self.entries.values().collect();
        ranked.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.name.cmp(b.name)));
        ranked
    }
}
