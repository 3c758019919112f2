use crate::inspect::{Evidence, Inspector};
use crate::inventory::ClusterInventory;
use crate::signal::Severity;

/// Turns image-scanner records into findings. Records without a known
/// severity rely on the `vulnerability:` prefix, which the finding adapter
/// treats as HIGH.
pub struct VulnerabilityInspector;

impl Inspector for VulnerabilityInspector {
    fn name(&self) -> &'static str {
        "vulnerability"
    }

    fn inspect(&self, inventory: &ClusterInventory) -> Evidence {
        let mut evidence = Evidence::default();

        for record in &inventory.vulnerabilities {
            let body = format!(
                "vulnerability: {} in {} ({})",
                record.vulnerability_id, record.package, record.title
            );
            match record.severity.as_deref().and_then(Severity::from_name) {
                Some(sev) => evidence.finding(format!("[{sev}] {body}")),
                None => evidence.finding(body),
            }
        }

        evidence
    }
}
