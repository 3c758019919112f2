use once_cell::sync::Lazy;
use regex::Regex;

use crate::inspect::{Evidence, Inspector};
use crate::inventory::{ClusterInventory, Container, PodSpec, Secret};

const DEFAULT_SERVICE_ACCOUNT: &str = "default";
const DANGEROUS_CAPABILITIES: &[&str] = &["ALL", "NET_ADMIN", "SYS_ADMIN"];
const SENSITIVE_HOST_PATHS: &[&str] = &["/etc", "/var/run/docker.sock", "/proc", "/var/log"];

/// Image reference: optional registry/path segments, a name, then an
/// optional `:tag` and `@digest`.
static IMAGE_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[^/]+/)*[^/:@]+(?::(?P<tag>[^/@]+))?(?:@(?P<digest>[^/]+))?$").unwrap()
});

/// Workload configuration checks for bare pods.
pub struct PodInspector;

impl Inspector for PodInspector {
    fn name(&self) -> &'static str {
        "pod"
    }

    fn inspect(&self, inventory: &ClusterInventory) -> Evidence {
        let mut evidence = Evidence::default();
        for pod in &inventory.pods {
            let subject = format!("Pod {}", pod.metadata.qualified_name());
            check_pod_spec(&mut evidence, &subject, &pod.spec);
            check_service_account(
                &mut evidence,
                &subject,
                pod.metadata.namespace_or_default(),
                &pod.spec,
                inventory,
            );
        }
        evidence
    }
}

/// Checks shared by pods and pod templates. `subject` prefixes every
/// finding, e.g. `Pod shop/web` or `Deployment shop/api`.
pub(crate) fn check_pod_spec(evidence: &mut Evidence, subject: &str, spec: &PodSpec) {
    if spec.host_network {
        evidence.finding(format!("[HIGH] {subject}: hostNetwork enabled"));
    }
    if spec.host_pid {
        evidence.finding(format!(
            "[CRITICAL] {subject}: hostPID access exposes host processes"
        ));
    }
    if spec.host_ipc {
        evidence.finding(format!(
            "[CRITICAL] {subject}: hostIPC access exposes the host IPC namespace"
        ));
    }

    for volume in &spec.volumes {
        if let Some(host_path) = &volume.host_path {
            let sensitive = SENSITIVE_HOST_PATHS
                .iter()
                .any(|p| host_path.path.starts_with(p));
            if sensitive {
                evidence.finding(format!(
                    "[CRITICAL] {subject}: volume {} mounts sensitive host path {}",
                    volume.name, host_path.path
                ));
            } else {
                evidence.finding(format!(
                    "[MEDIUM] {subject}: volume {} mounts host path {}",
                    volume.name, host_path.path
                ));
            }
        }
        if let Some(secret) = &volume.secret {
            evidence.finding(format!(
                "[MEDIUM] {subject}: secret {} mounted as volume {}",
                secret.secret_name, volume.name
            ));
        }
    }

    if spec.security_context.is_none() {
        evidence.finding(format!("[LOW] {subject}: no pod security context defined"));
    }
    let pod_non_root = spec
        .security_context
        .as_ref()
        .and_then(|sc| sc.run_as_non_root)
        .unwrap_or(false);

    for container in &spec.containers {
        check_container(evidence, subject, container, pod_non_root);
    }
}

/// Flags a pod whose service account (or `default`) references a
/// service-account-token secret in the pod's namespace.
pub(crate) fn check_service_account(
    evidence: &mut Evidence,
    subject: &str,
    namespace: &str,
    spec: &PodSpec,
    inventory: &ClusterInventory,
) {
    let account_name = spec
        .service_account_name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_SERVICE_ACCOUNT);
    let Some(account) = inventory.service_account(namespace, account_name) else {
        return;
    };

    for reference in &account.secrets {
        let is_token = inventory
            .secret(namespace, &reference.name)
            .is_some_and(|s| s.secret_type == Secret::SERVICE_ACCOUNT_TOKEN);
        if is_token {
            evidence.finding(format!(
                "[MEDIUM] {subject}: service account {account_name} holds token secret {}",
                reference.name
            ));
        }
    }
}

fn check_container(evidence: &mut Evidence, subject: &str, container: &Container, pod_non_root: bool) {
    let name = &container.name;
    let sc = container.security_context.as_ref();

    if sc.and_then(|sc| sc.privileged).unwrap_or(false) {
        evidence.finding(format!("[CRITICAL] {subject}: container {name} runs privileged"));
    }

    let added = sc
        .and_then(|sc| sc.capabilities.as_ref())
        .map(|c| c.add.as_slice())
        .unwrap_or_default();
    for cap in added {
        if DANGEROUS_CAPABILITIES.contains(&cap.as_str()) {
            evidence.finding(format!(
                "[HIGH] {subject}: container {name} adds capability {cap}"
            ));
        }
    }

    if sc.and_then(|sc| sc.allow_privilege_escalation).unwrap_or(false) {
        evidence.finding(format!(
            "[MEDIUM] {subject}: container {name} allows privilege escalation"
        ));
    }

    let non_root = sc.and_then(|sc| sc.run_as_non_root).unwrap_or(pod_non_root);
    if !non_root {
        evidence.finding(format!("[LOW] {subject}: container {name} may run as root"));
    }

    if !sc.and_then(|sc| sc.read_only_root_filesystem).unwrap_or(false) {
        evidence.finding(format!(
            "[LOW] {subject}: container {name} has a writable root filesystem"
        ));
    }

    if is_mutable_image(&container.image) {
        evidence.finding(format!(
            "[MEDIUM] {subject}: container {name} uses mutable image tag ({})",
            container.image
        ));
    }

    for var in &container.env {
        if let Some(secret_ref) = var.value_from.as_ref().and_then(|v| v.secret_key_ref.as_ref()) {
            evidence.finding(format!(
                "[HIGH] {subject}: container {name} reads secret {} via env {}",
                secret_ref.name, var.name
            ));
        }
    }
}

/// Untagged images and `:latest` are mutable; a digest pins the image.
fn is_mutable_image(image: &str) -> bool {
    let Some(caps) = IMAGE_REF_RE.captures(image) else {
        return false;
    };
    if caps.name("digest").is_some() {
        return false;
    }
    caps.name("tag").map_or(true, |t| t.as_str() == "latest")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::signals_from_findings;
    use crate::inventory::workload::*;
    use crate::inventory::{ObjectMeta, ObjectReference, Pod, ServiceAccount};

    fn hardened_container(name: &str) -> Container {
        Container {
            name: name.into(),
            image: "registry.local:5000/team/app:1.4.2".into(),
            security_context: Some(SecurityContext {
                privileged: Some(false),
                allow_privilege_escalation: Some(false),
                run_as_non_root: Some(true),
                read_only_root_filesystem: Some(true),
                capabilities: None,
            }),
            ..Default::default()
        }
    }

    fn pod(spec: PodSpec) -> ClusterInventory {
        ClusterInventory {
            pods: vec![Pod {
                metadata: ObjectMeta {
                    name: "web".into(),
                    namespace: Some("shop".into()),
                    ..Default::default()
                },
                spec,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn hardened_pod_is_clean() {
        let inventory = pod(PodSpec {
            containers: vec![hardened_container("app")],
            security_context: Some(PodSecurityContext {
                run_as_non_root: Some(true),
            }),
            ..Default::default()
        });
        assert!(PodInspector.inspect(&inventory).findings.is_empty());
    }

    #[test]
    fn privileged_host_pid_pod() {
        let mut container = hardened_container("app");
        if let Some(sc) = container.security_context.as_mut() {
            sc.privileged = Some(true);
        }
        let inventory = pod(PodSpec {
            containers: vec![container],
            host_pid: true,
            security_context: Some(PodSecurityContext::default()),
            ..Default::default()
        });
        let evidence = PodInspector.inspect(&inventory);
        assert_eq!(
            evidence.findings,
            vec![
                "[CRITICAL] Pod shop/web: hostPID access exposes host processes",
                "[CRITICAL] Pod shop/web: container app runs privileged",
            ]
        );
        let signals = signals_from_findings(&evidence.findings);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].name, "PrivilegedWorkload");
    }

    #[test]
    fn secret_in_env_is_exposure() {
        let mut container = hardened_container("app");
        container.env.push(EnvVar {
            name: "DB_PASSWORD".into(),
            value_from: Some(EnvVarSource {
                secret_key_ref: Some(SecretKeySelector {
                    name: "db".into(),
                    key: "password".into(),
                }),
            }),
        });
        let inventory = pod(PodSpec {
            containers: vec![container],
            security_context: Some(PodSecurityContext::default()),
            ..Default::default()
        });
        let evidence = PodInspector.inspect(&inventory);
        assert_eq!(
            evidence.findings,
            vec!["[HIGH] Pod shop/web: container app reads secret db via env DB_PASSWORD"]
        );
        assert_eq!(signals_from_findings(&evidence.findings)[0].name, "SecretsExposure");
    }

    #[test]
    fn sensitive_host_path_is_critical() {
        let inventory = pod(PodSpec {
            containers: vec![hardened_container("app")],
            security_context: Some(PodSecurityContext::default()),
            volumes: vec![Volume {
                name: "sock".into(),
                host_path: Some(HostPathSource {
                    path: "/var/run/docker.sock".into(),
                }),
                secret: None,
            }],
            ..Default::default()
        });
        let evidence = PodInspector.inspect(&inventory);
        assert_eq!(
            evidence.findings,
            vec!["[CRITICAL] Pod shop/web: volume sock mounts sensitive host path /var/run/docker.sock"]
        );
    }

    #[test]
    fn image_mutability() {
        assert!(is_mutable_image("nginx"));
        assert!(is_mutable_image("nginx:latest"));
        assert!(is_mutable_image("localhost:5000/app"));
        assert!(!is_mutable_image("nginx:1.25"));
        assert!(!is_mutable_image("localhost:5000/app:2.0"));
        assert!(!is_mutable_image("nginx@sha256:abcd"));
        assert!(!is_mutable_image("nginx:latest@sha256:abcd"));
    }

    fn meta(name: &str, namespace: &str) -> ObjectMeta {
        ObjectMeta {
            name: name.into(),
            namespace: Some(namespace.into()),
            ..Default::default()
        }
    }

    fn with_account(
        mut inventory: ClusterInventory,
        account: &str,
        secret_type: &str,
    ) -> ClusterInventory {
        inventory.service_accounts.push(ServiceAccount {
            metadata: meta(account, "shop"),
            secrets: vec![ObjectReference {
                name: format!("{account}-token-x7k2p"),
            }],
        });
        inventory.secrets.push(Secret {
            metadata: meta(&format!("{account}-token-x7k2p"), "shop"),
            secret_type: secret_type.into(),
            ..Default::default()
        });
        inventory
    }

    fn hardened_spec(service_account_name: Option<&str>) -> PodSpec {
        PodSpec {
            containers: vec![hardened_container("app")],
            service_account_name: service_account_name.map(String::from),
            security_context: Some(PodSecurityContext {
                run_as_non_root: Some(true),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn service_account_token_secret_is_reported() {
        let inventory = with_account(
            pod(hardened_spec(Some("builder"))),
            "builder",
            Secret::SERVICE_ACCOUNT_TOKEN,
        );
        let evidence = PodInspector.inspect(&inventory);
        assert_eq!(
            evidence.findings,
            vec!["[MEDIUM] Pod shop/web: service account builder holds token secret builder-token-x7k2p"]
        );
        assert_eq!(
            signals_from_findings(&evidence.findings),
            vec![crate::signal::catalog::MEDIUM_FINDINGS_PRESENT.signal()]
        );
    }

    #[test]
    fn unset_account_falls_back_to_default() {
        let inventory = with_account(
            pod(hardened_spec(None)),
            "default",
            Secret::SERVICE_ACCOUNT_TOKEN,
        );
        let evidence = PodInspector.inspect(&inventory);
        assert_eq!(evidence.findings.len(), 1);
        assert!(evidence.findings[0].contains("service account default"));
    }

    #[test]
    fn non_token_secrets_and_other_namespaces_are_ignored() {
        let opaque = with_account(
            pod(hardened_spec(Some("builder"))),
            "builder",
            Secret::OPAQUE,
        );
        assert!(PodInspector.inspect(&opaque).findings.is_empty());

        let mut elsewhere = with_account(
            pod(hardened_spec(Some("builder"))),
            "builder",
            Secret::SERVICE_ACCOUNT_TOKEN,
        );
        elsewhere.pods[0].metadata.namespace = Some("billing".into());
        assert!(PodInspector.inspect(&elsewhere).findings.is_empty());
    }
}
