mod control_plane;
mod deployment;
mod pod;
mod rbac;
mod secret;
mod vulnerability;

pub use control_plane::ControlPlaneInspector;
pub use deployment::DeploymentInspector;
pub use pod::PodInspector;
pub use rbac::RbacInspector;
pub use secret::SecretInspector;
pub use vulnerability::VulnerabilityInspector;

use super::Inspector;
use crate::config::InspectSettings;

/// Returns all built-in inspectors, in merge order.
pub fn all_inspectors(settings: &InspectSettings) -> Vec<Box<dyn Inspector>> {
    vec![
        Box::new(RbacInspector),
        Box::new(PodInspector),
        Box::new(DeploymentInspector),
        Box::new(SecretInspector),
        Box::new(ControlPlaneInspector::new(
            settings.required_cluster_roles.clone(),
        )),
        Box::new(VulnerabilityInspector),
    ]
}
