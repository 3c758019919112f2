//! Score calculator and driver ranker.
//!
//! The score is the Euclidean norm of the per-category weights, scaled and
//! capped: `min(100, floor(sqrt(Σ w²) × 1.5))`. Many small categories add
//! sub-linearly while a handful of heavy ones reach a high score quickly.
//! Repeated observations of a category never raise the score because only
//! the projection (one weight per name) is considered.

use super::projection::Projection;

pub const SCORE_MULTIPLIER: f64 = 1.5;
pub const MAX_SCORE: u8 = 100;
pub const MAX_DRIVERS: usize = 5;
pub const NO_DRIVERS: &str = "No high-risk signals detected";

/// Posture score in `0..=100`. Fractions are floored.
pub fn score(projection: &Projection<'_>) -> u8 {
    let sum_squared: f64 = projection.weights().map(|w| f64::from(w).powi(2)).sum();
    let scaled = (sum_squared.sqrt() * SCORE_MULTIPLIER).floor();
    scaled.min(f64::from(MAX_SCORE)) as u8
}

/// Up to five `"<name> (<SEVERITY>, +<weight>)"` lines, heaviest first.
pub fn drivers(projection: &Projection<'_>) -> Vec<String> {
    if projection.is_empty() {
        return vec![NO_DRIVERS.to_string()];
    }

    projection
        .ranked()
        .into_iter()
        .take(MAX_DRIVERS)
        .map(|e| format!("{} ({}, +{})", e.name, e.severity, e.weight))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{Severity, Signal};
    use pretty_assertions::assert_eq;

    fn score_of(signals: &[Signal]) -> u8 {
        score(&Projection::from_signals(signals))
    }

    #[test]
    fn empty_scores_zero() {
        assert_eq!(score_of(&[]), 0);
    }

    #[test]
    fn single_cluster_admin_scores_60() {
        let signals = [Signal::new("ClusterAdminBinding", Severity::Critical, 40)];
        assert_eq!(score_of(&signals), 60);
    }

    #[test]
    fn two_signals_floor_to_70() {
        // sqrt(1600 + 625) * 1.5 = 70.75
        let signals = [
            Signal::new("ClusterAdminBinding", Severity::Critical, 40),
            Signal::new("WildcardRBAC", Severity::High, 25),
        ];
        assert_eq!(score_of(&signals), 70);
    }

    #[test]
    fn repeats_do_not_inflate() {
        let once = [Signal::new("DeploymentMissingLabels", Severity::Low, 15)];
        let many: Vec<_> = std::iter::repeat(once[0].clone()).take(50).collect();
        assert_eq!(score_of(&once), score_of(&many));
        assert_eq!(score_of(&once), 22);
    }

    #[test]
    fn caps_at_100() {
        let signals: Vec<_> = (0..20)
            .map(|i| Signal::new(format!("Category{i}"), Severity::Critical, 40))
            .collect();
        assert_eq!(score_of(&signals), 100);
        assert_eq!(
            score_of(&[Signal::new("Huge", Severity::Critical, u32::MAX)]),
            100
        );
    }

    #[test]
    fn drivers_sentinel_when_empty() {
        assert_eq!(
            drivers(&Projection::default()),
            vec!["No high-risk signals detected".to_string()]
        );
    }

    #[test]
    fn drivers_top_five_in_order() {
        let signals = vec![
            Signal::new("MediumFindingsPresent", Severity::Medium, 5),
            Signal::new("WildcardRBAC", Severity::High, 25),
            Signal::new("PrivilegedWorkload", Severity::High, 25),
            Signal::new("ClusterAdminBinding", Severity::Critical, 40),
            Signal::new("SecretsAccess", Severity::High, 20),
            Signal::new("NoNetworkPolicy", Severity::High, 20),
            Signal::new("WildcardRBAC", Severity::High, 10),
        ];
        assert_eq!(
            drivers(&Projection::from_signals(&signals)),
            vec![
                "ClusterAdminBinding (CRITICAL, +40)",
                "PrivilegedWorkload (HIGH, +25)",
                "WildcardRBAC (HIGH, +25)",
                "NoNetworkPolicy (HIGH, +20)",
                "SecretsAccess (HIGH, +20)",
            ]
        );
    }
}
