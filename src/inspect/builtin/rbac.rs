use crate::inspect::{Evidence, Inspector};
use crate::inventory::{ClusterInventory, PolicyRule, Role, RoleBinding};
use crate::signal::catalog;

const WRITE_VERBS: &[&str] = &["create", "delete", "update", "patch"];
const READ_VERBS: &[&str] = &["get", "list", "watch"];
const ESCALATION_VERBS: &[&str] = &["escalate", "bind", "impersonate"];
const SENSITIVE_RESOURCES: &[&str] = &[
    "secrets",
    "roles",
    "rolebindings",
    "clusterroles",
    "clusterrolebindings",
];

const CLUSTER_ADMIN: &str = "cluster-admin";
/// The bootstrap group every cluster binds to cluster-admin.
const BOOTSTRAP_GROUP: &str = "system:masters";

/// RBAC inspection.
///
/// Role rules produce typed signals, one per offending rule. Bindings to
/// `cluster-admin` are reported as text findings and become
/// `ClusterAdminBinding` through the finding adapter.
pub struct RbacInspector;

impl Inspector for RbacInspector {
    fn name(&self) -> &'static str {
        "rbac"
    }

    fn inspect(&self, inventory: &ClusterInventory) -> Evidence {
        let mut evidence = Evidence::default();

        for role in &inventory.cluster_roles {
            check_role(&mut evidence, "ClusterRole", role);
        }
        for role in &inventory.roles {
            check_role(&mut evidence, "Role", role);
        }

        for binding in &inventory.cluster_role_bindings {
            check_binding(&mut evidence, "ClusterRoleBinding", binding);
        }
        for binding in &inventory.role_bindings {
            check_binding(&mut evidence, "RoleBinding", binding);
        }

        evidence
    }
}

fn check_role(evidence: &mut Evidence, kind: &str, role: &Role) {
    let subject = format!("{}/{}", kind, role.metadata.qualified_name());
    for rule in &role.rules {
        check_rule(evidence, &subject, rule);
    }
}

fn check_rule(evidence: &mut Evidence, subject: &str, rule: &PolicyRule) {
    if rule.has_verb("*") {
        evidence.signal(catalog::WILDCARD_RBAC, subject, "verbs: *");
    }

    if rule.has_resource("*") {
        evidence.signal(catalog::WILDCARD_RBAC_RESOURCES, subject, "resources: *");
    }

    let sensitive_writes: Vec<String> = rule
        .resources
        .iter()
        .filter(|r| SENSITIVE_RESOURCES.contains(&r.as_str()))
        .flat_map(|r| {
            rule.verbs
                .iter()
                .filter(|v| WRITE_VERBS.contains(&v.as_str()))
                .map(move |v| format!("{v} {r}"))
        })
        .collect();
    if !sensitive_writes.is_empty() {
        evidence.signal(
            catalog::DANGEROUS_RBAC_VERBS,
            subject,
            &sensitive_writes.join(", "),
        );
    }

    if rule.has_resource("secrets") {
        let reads: Vec<&str> = rule
            .verbs
            .iter()
            .map(String::as_str)
            .filter(|v| READ_VERBS.contains(v))
            .collect();
        if !reads.is_empty() {
            evidence.signal(
                catalog::SECRETS_ACCESS,
                subject,
                &format!("{} secrets", reads.join("/")),
            );
        }
    }

    let escalation: Vec<&str> = rule
        .verbs
        .iter()
        .map(String::as_str)
        .filter(|v| ESCALATION_VERBS.contains(v))
        .collect();
    if !escalation.is_empty() {
        evidence.signal(
            catalog::RBAC_ESCALATION_VERBS,
            subject,
            &format!("verbs: {}", escalation.join(", ")),
        );
    }
}

fn check_binding(evidence: &mut Evidence, kind: &str, binding: &RoleBinding) {
    if binding.role_ref.name != CLUSTER_ADMIN {
        return;
    }

    for subject in &binding.subjects {
        if subject.kind == "Group" && subject.name == BOOTSTRAP_GROUP {
            continue;
        }
        evidence.finding(format!(
            "[CRITICAL] {}/{}: cluster-admin bound to {}",
            kind,
            binding.metadata.qualified_name(),
            subject.describe()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{ObjectMeta, RoleRef, Subject};
    use crate::signal::Signal;

    fn role(name: &str, verbs: &[&str], resources: &[&str]) -> Role {
        Role {
            metadata: ObjectMeta {
                name: name.into(),
                ..Default::default()
            },
            rules: vec![PolicyRule {
                verbs: verbs.iter().map(|s| s.to_string()).collect(),
                api_groups: vec!["".into()],
                resources: resources.iter().map(|s| s.to_string()).collect(),
                resource_names: vec![],
            }],
        }
    }

    fn names(signals: &[Signal]) -> Vec<&str> {
        signals.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn wildcard_verbs_and_resources() {
        let inventory = ClusterInventory {
            cluster_roles: vec![role("god-mode", &["*"], &["*"])],
            ..Default::default()
        };
        let evidence = RbacInspector.inspect(&inventory);
        assert_eq!(
            names(&evidence.signals),
            vec!["WildcardRBAC", "WildcardRBACResources"]
        );
        assert!(evidence.findings.is_empty());
    }

    #[test]
    fn secret_readers_and_writers() {
        let inventory = ClusterInventory {
            roles: vec![role("vault", &["get", "list", "delete"], &["secrets"])],
            ..Default::default()
        };
        let evidence = RbacInspector.inspect(&inventory);
        assert_eq!(
            names(&evidence.signals),
            vec!["DangerousRBACVerbs", "SecretsAccess"]
        );
        assert_eq!(
            evidence.notes[1],
            "Role/vault: SecretsAccess (get/list secrets)"
        );
    }

    #[test]
    fn escalation_verbs() {
        let inventory = ClusterInventory {
            cluster_roles: vec![role("binder", &["bind", "escalate"], &["clusterroles"])],
            ..Default::default()
        };
        let evidence = RbacInspector.inspect(&inventory);
        assert_eq!(names(&evidence.signals), vec!["RBACEscalationVerbs"]);
    }

    #[test]
    fn read_only_role_is_clean() {
        let inventory = ClusterInventory {
            roles: vec![role("viewer", &["get", "list"], &["pods", "services"])],
            ..Default::default()
        };
        assert!(RbacInspector.inspect(&inventory).is_empty());
    }

    #[test]
    fn cluster_admin_binding_skips_bootstrap_group() {
        let inventory = ClusterInventory {
            cluster_role_bindings: vec![RoleBinding {
                metadata: ObjectMeta {
                    name: "cluster-admin".into(),
                    ..Default::default()
                },
                role_ref: RoleRef {
                    kind: "ClusterRole".into(),
                    name: "cluster-admin".into(),
                },
                subjects: vec![
                    Subject {
                        kind: "Group".into(),
                        name: "system:masters".into(),
                        namespace: None,
                    },
                    Subject {
                        kind: "ServiceAccount".into(),
                        name: "deployer".into(),
                        namespace: Some("ci".into()),
                    },
                ],
            }],
            ..Default::default()
        };
        let evidence = RbacInspector.inspect(&inventory);
        assert_eq!(
            evidence.findings,
            vec!["[CRITICAL] ClusterRoleBinding/cluster-admin: cluster-admin bound to ServiceAccount ci/deployer"]
        );
        assert!(evidence.signals.is_empty());
    }
}
