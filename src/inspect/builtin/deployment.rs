use super::pod::{check_pod_spec, check_service_account};
use crate::inspect::{Evidence, Inspector};
use crate::inventory::ClusterInventory;
use crate::signal::catalog;

/// Deployment checks: labels, resource limits, and the pod checks applied
/// to the template.
pub struct DeploymentInspector;

impl Inspector for DeploymentInspector {
    fn name(&self) -> &'static str {
        "deployment"
    }

    fn inspect(&self, inventory: &ClusterInventory) -> Evidence {
        let mut evidence = Evidence::default();

        for deployment in &inventory.deployments {
            let qualified = deployment.metadata.qualified_name();
            let subject = format!("Deployment {qualified}");

            if deployment.metadata.labels.is_empty() {
                evidence.signal(
                    catalog::DEPLOYMENT_MISSING_LABELS,
                    &format!("Deployment/{qualified}"),
                    "no labels",
                );
            }

            let template = &deployment.spec.template.spec;
            for container in &template.containers {
                if container.resources.limits.is_empty() {
                    evidence.finding(format!(
                        "[MEDIUM] {subject}: container {} has no resource limits defined",
                        container.name
                    ));
                }
                if container.resources.requests.is_empty() {
                    evidence.finding(format!(
                        "[LOW] {subject}: container {} has no resource requests defined",
                        container.name
                    ));
                }
            }

            check_pod_spec(&mut evidence, &subject, template);
            check_service_account(
                &mut evidence,
                &subject,
                deployment.metadata.namespace_or_default(),
                template,
                inventory,
            );
        }

        evidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::workload::*;
    use crate::inventory::ObjectMeta;
    use std::collections::BTreeMap;

    fn deployment(labels: BTreeMap<String, String>, container: Container) -> ClusterInventory {
        ClusterInventory {
            deployments: vec![Deployment {
                metadata: ObjectMeta {
                    name: "api".into(),
                    namespace: Some("shop".into()),
                    labels,
                },
                spec: DeploymentSpec {
                    replicas: Some(2),
                    template: PodTemplate {
                        metadata: ObjectMeta::default(),
                        spec: PodSpec {
                            containers: vec![container],
                            security_context: Some(PodSecurityContext {
                                run_as_non_root: Some(true),
                            }),
                            ..Default::default()
                        },
                    },
                },
            }],
            ..Default::default()
        }
    }

    fn limited_container() -> Container {
        let resources = ResourceRequirements {
            limits: BTreeMap::from([("cpu".to_string(), "500m".to_string())]),
            requests: BTreeMap::from([("cpu".to_string(), "100m".to_string())]),
        };
        Container {
            name: "api".into(),
            image: "shop/api:3.1.0".into(),
            security_context: Some(SecurityContext {
                read_only_root_filesystem: Some(true),
                ..Default::default()
            }),
            resources,
            ..Default::default()
        }
    }

    #[test]
    fn unlabeled_deployment_gets_typed_signal() {
        let evidence = DeploymentInspector.inspect(&deployment(BTreeMap::new(), limited_container()));
        assert_eq!(
            evidence.signals,
            vec![catalog::DEPLOYMENT_MISSING_LABELS.signal()]
        );
        assert!(evidence.findings.is_empty());
        assert_eq!(
            evidence.notes,
            vec!["Deployment/shop/api: DeploymentMissingLabels (no labels)"]
        );
    }

    #[test]
    fn missing_limits_and_template_checks() {
        let labels = BTreeMap::from([("app".to_string(), "api".to_string())]);
        let mut container = limited_container();
        container.resources = ResourceRequirements::default();
        container.image = "shop/api".into();

        let evidence = DeploymentInspector.inspect(&deployment(labels, container));
        assert!(evidence.signals.is_empty());
        assert_eq!(
            evidence.findings,
            vec![
                "[MEDIUM] Deployment shop/api: container api has no resource limits defined",
                "[LOW] Deployment shop/api: container api has no resource requests defined",
                "[MEDIUM] Deployment shop/api: container api uses mutable image tag (shop/api)",
            ]
        );
    }
}
