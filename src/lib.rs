//! kubeposture: cluster security posture scoring.
//!
//! Turns RBAC, workload and control-plane observations into a normalized
//! signal set, a bounded 0-100 risk score, ranked drivers, attack-path
//! hypotheses and remediation templates.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use kubeposture::{assess, AssessOptions};
//!
//! let options = AssessOptions::default();
//! let report = assess(Path::new("./cluster-snapshot.json"), &options).unwrap();
//! println!("Score: {}, Pass: {}", report.score, report.verdict.pass);
//! ```
//!
//! The scoring core works without any file I/O:
//!
//! ```
//! use kubeposture::posture::PostureAggregate;
//! use kubeposture::signal::catalog;
//!
//! let mut aggregate = PostureAggregate::new();
//! aggregate.push(catalog::CLUSTER_ADMIN_BINDING.signal());
//! let posture = aggregate.freeze();
//! assert_eq!(posture.score(), 60);
//! ```

pub mod adapter;
pub mod analysis;
pub mod config;
pub mod error;
pub mod inspect;
pub mod inventory;
pub mod output;
pub mod posture;
pub mod signal;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use adapter::FindingAdapter;
use analysis::{AttackPath, Remediation};
use config::{Config, InspectSettings};
use error::Result;
use inspect::InspectorSet;
use inventory::{ClusterInventory, Snapshot};
use output::OutputFormat;
use posture::{Policy, PostureAggregate, PostureVerdict, RiskLevelCounts};
use signal::Signal;

/// Options for an assessment invocation.
#[derive(Debug, Clone, Default)]
pub struct AssessOptions {
    /// Path to config file (defaults to `.kubeposture.toml` next to the snapshot).
    pub config_path: Option<PathBuf>,
    /// CLI override for the policy score threshold.
    pub fail_above_override: Option<u8>,
    /// Free-text findings from collaborators outside the snapshot.
    pub extra_findings: Vec<String>,
}

/// Everything gathered from one snapshot before scoring.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Free-text findings from every inspector plus extra findings.
    pub findings: Vec<String>,
    /// Where typed signals were observed.
    pub notes: Vec<String>,
    /// Adapter signals followed by typed signals.
    pub aggregate: PostureAggregate,
}

/// Complete assessment report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostureReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub snapshot: String,
    pub snapshot_digest: String,
    pub score: u8,
    pub counts: RiskLevelCounts,
    pub drivers: Vec<String>,
    pub attack_paths: Vec<AttackPath>,
    pub remediations: Vec<Remediation>,
    pub verdict: PostureVerdict,
    pub signals: Vec<Signal>,
    pub findings: Vec<String>,
    pub notes: Vec<String>,
}

/// Run every inspector over `inventory` and merge the evidence into one
/// aggregate. Inspectors run in parallel; the merge is single-threaded.
pub fn collect(
    inventory: &ClusterInventory,
    settings: &InspectSettings,
    extra_findings: &[String],
) -> Collection {
    let evidence = InspectorSet::new(settings).run(inventory);

    let mut findings = Vec::new();
    let mut notes = Vec::new();
    let mut typed = Vec::new();
    for ev in evidence {
        findings.extend(ev.findings);
        notes.extend(ev.notes);
        typed.extend(ev.signals);
    }
    findings.extend(extra_findings.iter().cloned());

    // One adapter pass per run so category suppression spans every source.
    let mut aggregate = PostureAggregate::new();
    aggregate.extend(FindingAdapter::new().convert(&findings));
    aggregate.extend(typed);

    tracing::debug!(
        findings = findings.len(),
        signals = aggregate.len(),
        "collection complete"
    );

    Collection {
        findings,
        notes,
        aggregate,
    }
}

/// Apply `policy`, freeze the aggregate and run every analysis pass.
pub fn evaluate(collection: Collection, policy: &Policy, snapshot: &Snapshot) -> PostureReport {
    let verdict = policy.evaluate(collection.aggregate.signals());
    let posture = policy
        .apply(collection.aggregate.signals())
        .into_iter()
        .collect::<PostureAggregate>()
        .freeze();

    PostureReport {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        snapshot: snapshot.source.display().to_string(),
        snapshot_digest: snapshot.digest.clone(),
        score: posture.score(),
        counts: posture.risk_level_counts(),
        drivers: posture.drivers(),
        attack_paths: posture.attack_paths(),
        remediations: posture.remediations(),
        verdict,
        signals: posture.signals().to_vec(),
        findings: collection.findings,
        notes: collection.notes,
    }
}

/// Run a complete assessment: load config and snapshot, inspect, score,
/// evaluate policy.
pub fn assess(snapshot_path: &Path, options: &AssessOptions) -> Result<PostureReport> {
    let config_path = options.config_path.clone().unwrap_or_else(|| {
        snapshot_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(".kubeposture.toml")
    });
    let mut config = Config::load(&config_path)?;

    if let Some(fail_above) = options.fail_above_override {
        config.policy.fail_above = fail_above;
        config.validate()?;
    }

    let snapshot = Snapshot::load(snapshot_path)?;
    tracing::debug!(
        snapshot = %snapshot.source.display(),
        digest = %snapshot.digest,
        "snapshot loaded"
    );

    let collection = collect(
        &snapshot.inventory,
        &config.inspect,
        &options.extra_findings,
    );
    Ok(evaluate(collection, &config.policy, &snapshot))
}

/// Read extra findings, one per line. Blank lines and `#` comments are
/// skipped.
pub fn load_findings(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let findings = parse_findings(&content);
    tracing::debug!(
        path = %path.display(),
        findings = findings.len(),
        skipped = content.lines().count() - findings.len(),
        "extra findings loaded"
    );
    Ok(findings)
}

fn parse_findings(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Render an assessment report in the specified format.
pub fn render_report(report: &PostureReport, format: OutputFormat) -> Result<String> {
    output::render(report, format)
}
