use crate::error::Result;
use crate::PostureReport;

/// Render the report as pretty-printed JSON.
pub fn render(report: &PostureReport) -> Result<String> {
    let json = serde_json::to_string_pretty(report)?;
    Ok(json)
}
