use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PostureError, Result};
use crate::posture::policy::Policy;

/// Top-level configuration from `.kubeposture.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub inspect: InspectSettings,
}

/// Settings for the built-in inspectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectSettings {
    /// Cluster roles that must exist; absent ones raise a signal.
    #[serde(default = "default_required_cluster_roles")]
    pub required_cluster_roles: Vec<String>,
}

fn default_required_cluster_roles() -> Vec<String> {
    vec!["system:auth-delegator".into()]
}

impl Default for InspectSettings {
    fn default() -> Self {
        Self {
            required_cluster_roles: default_required_cluster_roles(),
        }
    }
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.policy.fail_above > 100 {
            return Err(PostureError::Config(format!(
                "policy.fail_above must be between 0 and 100, got {}",
                self.policy.fail_above
            )));
        }
        Ok(())
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# kubeposture configuration

[policy]
# Posture scores at or above this value fail the assessment (0-100).
fail_above = 70

# Signal categories to drop before scoring.
# ignore_signals = ["DeploymentMissingLabels"]

[inspect]
# Cluster roles that must exist in the snapshot.
required_cluster_roles = ["system:auth-delegator"]
"#
    }
}
