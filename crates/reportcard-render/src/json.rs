use anyhow::{Context, Result};

use reportcard_core::Report;

/// Serialize a report as pretty-printed JSON, tagged with its kind.
pub fn render(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report)
        .with_context(|| format!("failed to serialize {} report", report.kind()))
}
