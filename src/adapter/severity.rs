use once_cell::sync::Lazy;
use regex::Regex;

use crate::signal::Severity;

/// Leading `[...]` tag, up to the first closing bracket.
static SEVERITY_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[([^\]]*)\]").unwrap());

const VULNERABILITY_PREFIX: &str = "vulnerability:";

/// Infer the severity of a free-text finding.
///
/// A leading tag such as `[HIGH]` wins. Untagged findings prefixed with
/// `vulnerability:` (any case) are HIGH. Everything else, including findings
/// whose tag is not a severity name, falls back to INFO.
pub fn parse_severity(finding: &str) -> Severity {
    let trimmed = finding.trim();

    if let Some(sev) = SEVERITY_TAG_RE
        .captures(trimmed)
        .and_then(|cap| Severity::from_name(&cap[1]))
    {
        return sev;
    }

    let is_vulnerability = trimmed
        .get(..VULNERABILITY_PREFIX.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(VULNERABILITY_PREFIX));
    if is_vulnerability {
        return Severity::High;
    }

    Severity::Info
}
