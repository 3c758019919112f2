//! Cluster snapshot: the resources a collaborator already retrieved from the
//! control plane, in a JSON shape close to `kubectl get -o json`.
//!
//! Every inspector consumes a `ClusterInventory`. Retrieval itself happens
//! elsewhere; this crate only reads the snapshot file.

pub mod config_surface;
pub mod rbac;
pub mod workload;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{PostureError, Result};

pub use config_surface::{Namespace, NetworkPolicy, Secret, VulnerabilityRecord};
pub use rbac::{
    ObjectReference, PolicyRule, Role, RoleBinding, RoleRef, ServiceAccount, Subject,
};
pub use workload::{Container, Deployment, Pod, PodSpec};

/// Complete cluster snapshot. Every collection is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInventory {
    #[serde(default)]
    pub cluster_roles: Vec<Role>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub cluster_role_bindings: Vec<RoleBinding>,
    #[serde(default)]
    pub role_bindings: Vec<RoleBinding>,
    #[serde(default)]
    pub service_accounts: Vec<ServiceAccount>,
    #[serde(default)]
    pub pods: Vec<Pod>,
    #[serde(default)]
    pub deployments: Vec<Deployment>,
    #[serde(default)]
    pub secrets: Vec<Secret>,
    #[serde(default)]
    pub network_policies: Vec<NetworkPolicy>,
    #[serde(default)]
    pub namespaces: Vec<Namespace>,
    /// Records from an external image scanner.
    #[serde(default)]
    pub vulnerabilities: Vec<VulnerabilityRecord>,
}

/// Standard object metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl ObjectMeta {
    /// `namespace/name`, or just `name` for cluster-scoped objects.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}/{}", ns, self.name),
            None => self.name.clone(),
        }
    }

    pub fn namespace_or_default(&self) -> &str {
        self.namespace.as_deref().unwrap_or("default")
    }
}

impl ClusterInventory {
    /// Parse a snapshot from JSON text.
    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Namespaces that run at least one pod or deployment.
    pub fn namespaces_with_workloads(&self) -> BTreeSet<&str> {
        self.pods
            .iter()
            .map(|p| p.metadata.namespace_or_default())
            .chain(
                self.deployments
                    .iter()
                    .map(|d| d.metadata.namespace_or_default()),
            )
            .collect()
    }

    pub fn service_account(&self, namespace: &str, name: &str) -> Option<&ServiceAccount> {
        self.service_accounts
            .iter()
            .find(|sa| {
                sa.metadata.name == name && sa.metadata.namespace_or_default() == namespace
            })
    }

    pub fn secret(&self, namespace: &str, name: &str) -> Option<&Secret> {
        self.secrets
            .iter()
            .find(|s| {
                s.metadata.name == name && s.metadata.namespace_or_default() == namespace
            })
    }

    /// Namespaces covered by at least one network policy.
    pub fn namespaces_with_network_policy(&self) -> BTreeSet<&str> {
        self.network_policies
            .iter()
            .map(|np| np.metadata.namespace_or_default())
            .collect()
    }
}

/// A loaded snapshot plus the identity of its source bytes.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub inventory: ClusterInventory,
    pub source: PathBuf,
    /// Hex SHA-256 of the snapshot file.
    pub digest: String,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let content = String::from_utf8(bytes).map_err(|e| PostureError::Snapshot {
            file: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_str_with_source(&content, path)
    }

    pub fn from_str_with_source(content: &str, source: &Path) -> Result<Self> {
        let inventory =
            ClusterInventory::from_json(content).map_err(|e| PostureError::Snapshot {
                file: source.display().to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            inventory,
            source: source.to_path_buf(),
            digest: hex::encode(Sha256::digest(content.as_bytes())),
        })
    }
}
