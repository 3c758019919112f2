use std::collections::HashSet;

use crate::inspect::{Evidence, Inspector};
use crate::inventory::ClusterInventory;
use crate::signal::catalog;

/// Cluster-wide controls: network isolation per namespace and the presence
/// of required cluster roles.
pub struct ControlPlaneInspector {
    required_cluster_roles: Vec<String>,
}

impl ControlPlaneInspector {
    pub fn new(required_cluster_roles: Vec<String>) -> Self {
        Self {
            required_cluster_roles,
        }
    }
}

impl Inspector for ControlPlaneInspector {
    fn name(&self) -> &'static str {
        "control-plane"
    }

    fn inspect(&self, inventory: &ClusterInventory) -> Evidence {
        let mut evidence = Evidence::default();

        let isolated = inventory.namespaces_with_network_policy();
        for namespace in inventory.namespaces_with_workloads() {
            if !isolated.contains(namespace) {
                evidence.finding(format!(
                    "[HIGH] Namespace/{namespace}: no NetworkPolicy defined"
                ));
            }
        }

        // An empty role list means roles were not retrieved, not that none exist.
        if !inventory.cluster_roles.is_empty() {
            let present: HashSet<&str> = inventory
                .cluster_roles
                .iter()
                .map(|r| r.metadata.name.as_str())
                .collect();
            for required in &self.required_cluster_roles {
                if !present.contains(required.as_str()) {
                    evidence.signal(
                        catalog::MISSING_REQUIRED_CLUSTER_ROLE,
                        &format!("ClusterRole/{required}"),
                        "required by configuration",
                    );
                }
            }
        }

        evidence
    }
}
