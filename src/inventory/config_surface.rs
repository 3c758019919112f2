use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ObjectMeta;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Secret {
    pub metadata: ObjectMeta,
    #[serde(rename = "type", default)]
    pub secret_type: String,
    /// Values are never inspected; snapshots may carry them redacted.
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl Secret {
    pub const OPAQUE: &'static str = "Opaque";
    pub const SERVICE_ACCOUNT_TOKEN: &'static str = "kubernetes.io/service-account-token";
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkPolicy {
    pub metadata: ObjectMeta,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Namespace {
    pub metadata: ObjectMeta,
}

/// An image vulnerability already reported by an external scanner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityRecord {
    pub vulnerability_id: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
}
