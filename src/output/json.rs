use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::report::policy::PolicyVerdict;
use crate::report::ReportEntry;

use super::node::DisplayNode;

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    generated_at: DateTime<Utc>,
    extensions: Vec<JsonEntry<'a>>,
    verdict: &'a PolicyVerdict,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    #[serde(flatten)]
    entry: &'a ReportEntry,
    node: DisplayNode,
}

/// Render the report as JSON.
pub fn render(entries: &[ReportEntry], verdict: &PolicyVerdict, source: &str) -> Result<String> {
    let report = JsonReport {
        source,
        generated_at: Utc::now(),
        extensions: entries
            .iter()
            .map(|entry| JsonEntry {
                entry,
                node: DisplayNode::from_entry(entry),
            })
            .collect(),
        verdict,
    };
    let json = serde_json::to_string_pretty(&report)?;
    Ok(json)
}
