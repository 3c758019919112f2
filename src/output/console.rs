use crate::analysis::NAMESPACE_PLACEHOLDER;
use crate::signal::Severity;
use crate::PostureReport;

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "[CRITICAL]",
        Severity::High => "[HIGH]    ",
        Severity::Medium => "[MEDIUM]  ",
        Severity::Low => "[LOW]     ",
        Severity::Info => "[INFO]    ",
    }
}

/// Render the report for a terminal: score and drivers first, then attack
/// paths, remediations, typed-signal notes and the verdict.
pub fn render(report: &PostureReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n  Posture score: {}/100  ({})\n",
        report.score, report.snapshot
    ));
    let c = &report.counts;
    output.push_str(&format!(
        "  Signals: {} critical, {} high, {} medium, {} low\n\n",
        c.critical, c.high, c.medium, c.low
    ));

    output.push_str("  Top risk drivers:\n");
    for driver in &report.drivers {
        output.push_str(&format!("    - {}\n", driver));
    }
    output.push('\n');

    if !report.attack_paths.is_empty() {
        output.push_str(&format!(
            "  {} attack path(s):\n\n",
            report.attack_paths.len()
        ));
        for path in &report.attack_paths {
            output.push_str(&format!(
                "  {} {} (confidence {}%)\n",
                severity_tag(path.severity),
                path.title,
                path.confidence
            ));
            for (i, step) in path.steps.iter().enumerate() {
                output.push_str(&format!("           {}. {}: {}\n", i + 1, step.kind, step.why));
            }
            output.push_str(&format!("           evidence: {}\n\n", path.evidence.join(", ")));
        }
    }

    if !report.remediations.is_empty() {
        output.push_str("  Remediations:\n\n");
        for remediation in &report.remediations {
            output.push_str(&format!(
                "  {} {} (for {})\n",
                severity_tag(remediation.priority),
                remediation.title,
                remediation.applies_to
            ));
        }
        output.push_str(&format!(
            "\n           replace {} in templates with the target namespace\n\n",
            NAMESPACE_PLACEHOLDER
        ));
    }

    if !report.notes.is_empty() {
        output.push_str("  Observed:\n");
        for note in &report.notes {
            output.push_str(&format!("    {}\n", note));
        }
        output.push('\n');
    }

    let verdict = &report.verdict;
    let status = if verdict.pass { "PASS" } else { "FAIL" };
    output.push_str(&format!(
        "  Result: {} (score: {}, fail above: {}, highest: {})\n\n",
        status,
        verdict.score,
        verdict.fail_threshold,
        verdict
            .highest_severity
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".into()),
    ));

    output
}
