//! reportcard-render — Rendering of structured reports.
//!
//! The report engine produces data; this crate turns it into console text,
//! JSON, or tables.

pub mod json;
pub mod table;
pub mod text;

use anyhow::Result;

use reportcard_core::config::OutputFormat;
use reportcard_core::Report;

/// Settings shared by all renderers.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Placeholder for option labels and values that could not be resolved.
    pub not_available: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            not_available: "N/A".to_string(),
        }
    }
}

/// Render a report in the requested format.
pub fn render(report: &Report, format: OutputFormat, options: &RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render(report, options)),
        OutputFormat::Json => json::render(report),
        OutputFormat::Table => Ok(table::render(report, options)),
    }
}
