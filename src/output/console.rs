use crate::report::policy::PolicyVerdict;
use crate::report::ReportEntry;
use crate::risk::RiskLevel;

use super::node::{DisplayNode, EMPTY_PLACEHOLDER};

/// Render the ranked report as plain console text.
pub fn render(entries: &[ReportEntry], verdict: &PolicyVerdict) -> String {
    let mut output = String::new();

    if entries.is_empty() {
        output.push_str(&format!("\n  {}\n\n", EMPTY_PLACEHOLDER));
        return output;
    }

    output.push_str(&format!("\n  {} extension(s) assessed:\n\n", entries.len()));

    for entry in entries {
        let node = DisplayNode::from_entry(entry);
        let tag = match entry.assessment.level {
            RiskLevel::High => "[HIGH]  ",
            RiskLevel::Medium => "[MEDIUM]",
            RiskLevel::Low => "[LOW]   ",
        };

        output.push_str(&format!(
            "  {} {} ({})\n",
            tag, node.label, node.description
        ));
        for line in node.tooltip.lines().filter(|l| !l.is_empty()) {
            output.push_str(&format!("           {}\n", line));
        }
        output.push('\n');
    }

    let status = if verdict.pass { "PASS" } else { "FAIL" };
    output.push_str(&format!(
        "  High: {}  Medium: {}  Low: {}\n",
        verdict.high, verdict.medium, verdict.low
    ));
    output.push_str(&format!(
        "  Result: {} (threshold: {}, highest: {})\n\n",
        status,
        verdict.fail_threshold,
        verdict
            .highest_level
            .map(|l| l.to_string())
            .unwrap_or_else(|| "none".into()),
    ));

    output
}
