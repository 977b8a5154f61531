use serde_json::{json, Value};

use crate::error::Result;
use crate::report::ReportEntry;
use crate::risk::{Classifier, RiskLevel};

/// Render medium and high risk extensions as SARIF 2.1.0.
///
/// Each reported extension becomes one result against its tier rule, pointing
/// at its `package.json`. The scoring rules are listed for reference.
pub fn render(entries: &[ReportEntry], source: &str) -> Result<String> {
    let mut rules: Vec<Value> = [RiskLevel::High, RiskLevel::Medium]
        .into_iter()
        .map(|level| {
            json!({
                "id": format!("risk/{}", level),
                "name": format!("{}Risk", level.label()),
                "shortDescription": { "text": format!("{} trust risk extension", level.label()) },
                "defaultConfiguration": { "level": level_to_sarif(level) },
            })
        })
        .collect();
    rules.extend(Classifier::new().list_rules().into_iter().map(|rule| {
        json!({
            "id": rule.id,
            "name": rule.name,
            "shortDescription": { "text": rule.reason },
            "fullDescription": { "text": rule.description },
            "properties": { "points": rule.points },
        })
    }));

    let results: Vec<Value> = entries
        .iter()
        .filter(|e| e.assessment.level >= RiskLevel::Medium)
        .map(|e| {
            let ext = &e.extension;
            let mut result = json!({
                "ruleId": format!("risk/{}", e.assessment.level),
                "level": level_to_sarif(e.assessment.level),
                "message": {
                    "text": format!(
                        "{} is {} risk (score {}): {}",
                        ext.identifier,
                        e.assessment.level,
                        e.assessment.score,
                        e.assessment.reasons.join("; "),
                    ),
                },
                "properties": {
                    "extension": ext.identifier,
                    "version": ext.version,
                    "score": e.assessment.score,
                    "reasons": e.assessment.reasons,
                },
            });

            if let Some(dir) = &ext.location {
                result["locations"] = json!([{
                    "physicalLocation": {
                        "artifactLocation": {
                            "uri": dir.join("package.json").display().to_string(),
                        },
                    },
                }]);
            }

            result
        })
        .collect();

    let sarif = json!({
        "$schema": "https://docs.oasis-open.org/sarif/sarif/v2.1.0/errata01/os/schemas/sarif-schema-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "TrustLens",
                    "version": env!("CARGO_PKG_VERSION"),
                    "semanticVersion": env!("CARGO_PKG_VERSION"),
                    "rules": rules,
                },
            },
            "results": results,
            "automationDetails": {
                "id": format!("trustlens/{}", source),
            },
        }],
    });

    let output = serde_json::to_string_pretty(&sarif)?;
    Ok(output)
}

fn level_to_sarif(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "error",
        RiskLevel::Medium => "warning",
        RiskLevel::Low => "note",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ExtensionManifest;
    use crate::report::build_report;

    #[test]
    fn only_medium_and_high_become_results() {
        let report = build_report(&[
            ExtensionManifest {
                identifier: "acme.loud".into(),
                name: "loud".into(),
                activation_events: vec!["*".into()],
                has_main_entry: true,
                ..Default::default()
            },
            ExtensionManifest {
                identifier: "acme.quiet".into(),
                name: "quiet".into(),
                extension_kind: vec!["ui".into()],
                ..Default::default()
            },
        ]);
        let out = render(&report, "test").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let results = value["runs"][0]["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["level"], "error");
        assert_eq!(results[0]["properties"]["extension"], "acme.loud");
        assert_eq!(value["runs"][0]["tool"]["driver"]["rules"].as_array().unwrap().len(), 6);
        assert_eq!(results[0]["ruleId"], "risk/high");
    }
}
