pub mod catalog;

use serde::{Deserialize, Serialize};

pub use catalog::{SignalCategory, SignalOrigin};

/// An atomic, named unit of risk evidence.
///
/// `name` is the category identifier and the deduplication key: repeated
/// observations of one category collapse to a single entry when scoring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signal {
    /// Category identifier, stable across runs (e.g., "ClusterAdminBinding").
    pub name: String,
    /// Severity carried by this observation.
    pub severity: Severity,
    /// Contribution to the posture score.
    pub weight: u32,
}

impl Signal {
    pub fn new(name: impl Into<String>, severity: Severity, weight: u32) -> Self {
        Self {
            name: name.into(),
            severity,
            weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Parse one of the five severity names, ignoring case.
    ///
    /// Abbreviations are rejected so that a stray tag like `[crit]` is not
    /// mistaken for a severity.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INFO" => Some(Self::Info),
            "LOW" => Some(Self::Low),
            "MEDIUM" => Some(Self::Medium),
            "HIGH" => Some(Self::High),
            "CRITICAL" => Some(Self::Critical),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
