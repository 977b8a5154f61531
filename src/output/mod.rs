pub mod console;
pub mod json;
pub mod node;
pub mod sarif;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::report::policy::PolicyVerdict;
use crate::report::ReportEntry;

pub use node::DisplayNode;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Sarif,
}

impl OutputFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Some(Self::Console),
            "json" => Some(Self::Json),
            "sarif" => Some(Self::Sarif),
            _ => None,
        }
    }
}

/// Render a report into the specified format.
pub fn render(
    entries: &[ReportEntry],
    verdict: &PolicyVerdict,
    format: OutputFormat,
    source: &str,
) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console::render(entries, verdict)),
        OutputFormat::Json => json::render(entries, verdict, source),
        OutputFormat::Sarif => sarif::render(entries, source),
    }
}
