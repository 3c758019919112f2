use crate::inspect::{Evidence, Inspector};
use crate::inventory::{ClusterInventory, Secret};

const SENSITIVE_KEY_HINTS: &[&str] = &["password", "token", "key", "secret", "credential", "cert"];

/// Secret hygiene checks. Values are never read, only types and key names.
pub struct SecretInspector;

impl Inspector for SecretInspector {
    fn name(&self) -> &'static str {
        "secret"
    }

    fn inspect(&self, inventory: &ClusterInventory) -> Evidence {
        let mut evidence = Evidence::default();

        for secret in &inventory.secrets {
            let subject = format!("Secret {}", secret.metadata.qualified_name());

            if secret.secret_type == Secret::SERVICE_ACCOUNT_TOKEN
                && secret.metadata.name.starts_with("default-token-")
            {
                evidence.finding(format!(
                    "[INFO] {subject}: default service account token present"
                ));
            }

            if secret.secret_type == Secret::OPAQUE {
                for key in secret.data.keys() {
                    let lowered = key.to_lowercase();
                    if SENSITIVE_KEY_HINTS.iter().any(|hint| lowered.contains(hint)) {
                        evidence.finding(format!(
                            "[LOW] {subject}: holds sensitive-looking key {key}"
                        ));
                    }
                }
            }
        }

        evidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::ObjectMeta;
    use std::collections::BTreeMap;

    fn secret(name: &str, secret_type: &str, keys: &[&str]) -> Secret {
        Secret {
            metadata: ObjectMeta {
                name: name.into(),
                namespace: Some("shop".into()),
                ..Default::default()
            },
            secret_type: secret_type.into(),
            data: keys
                .iter()
                .map(|k| (k.to_string(), "<redacted>".to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn flags_sensitive_opaque_keys() {
        let inventory = ClusterInventory {
            secrets: vec![secret("db", Secret::OPAQUE, &["DB_PASSWORD", "host"])],
            ..Default::default()
        };
        assert_eq!(
            SecretInspector.inspect(&inventory).findings,
            vec!["[LOW] Secret shop/db: holds sensitive-looking key DB_PASSWORD"]
        );
    }

    #[test]
    fn default_token_is_informational() {
        let inventory = ClusterInventory {
            secrets: vec![secret(
                "default-token-x7k2p",
                Secret::SERVICE_ACCOUNT_TOKEN,
                &["token"],
            )],
            ..Default::default()
        };
        let findings = SecretInspector.inspect(&inventory).findings;
        assert_eq!(findings.len(), 1);
        assert!(findings[0].starts_with("[INFO]"));
    }
}
