pub mod policy;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::manifest::ExtensionManifest;
use crate::risk::{Assessment, Classifier};

/// One extension paired with its assessment for a single report cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub extension: ExtensionManifest,
    pub assessment: Assessment,
}

/// Assess every non-builtin extension and rank the results.
///
/// Order: risk tier (high first), then display name or identifier
/// case-insensitively, then identifier.
pub fn build_report(manifests: &[ExtensionManifest]) -> Vec<ReportEntry> {
    let classifier = Classifier::new();

    let mut entries: Vec<ReportEntry> = manifests
        .iter()
        .filter(|m| !m.is_builtin)
        .map(|m| ReportEntry {
            assessment: classifier.assess(m),
            extension: m.clone(),
        })
        .collect();

    entries.sort_by(compare_entries);

    tracing::debug!(
        total = manifests.len(),
        reported = entries.len(),
        "built extension risk report"
    );

    entries
}

fn compare_entries(a: &ReportEntry, b: &ReportEntry) -> Ordering {
    a.assessment
        .level
        .rank()
        .cmp(&b.assessment.level.rank())
        .then_with(|| {
            a.extension
                .sort_name()
                .to_lowercase()
                .cmp(&b.extension.sort_name().to_lowercase())
        })
        .then_with(|| a.extension.identifier.cmp(&b.extension.identifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::RiskLevel;

    fn low(id: &str, display: &str) -> ExtensionManifest {
        ExtensionManifest {
            identifier: id.into(),
            name: id.into(),
            display_name: Some(display.into()),
            extension_kind: vec!["ui".into()],
            ..Default::default()
        }
    }

    fn medium(id: &str, display: &str) -> ExtensionManifest {
        ExtensionManifest {
            activation_events: vec!["onStartupFinished".into()],
            extension_kind: vec![],
            ..low(id, display)
        }
    }

    fn high(id: &str, display: &str) -> ExtensionManifest {
        ExtensionManifest {
            activation_events: vec!["*".into()],
            extension_kind: vec![],
            has_main_entry: true,
            ..low(id, display)
        }
    }

    #[test]
    fn tier_dominates_name() {
        let manifests = vec![
            low("a.low", "A"),
            high("z.high", "Z"),
            medium("m.medium", "M"),
        ];
        let report = build_report(&manifests);
        let levels: Vec<RiskLevel> = report.iter().map(|e| e.assessment.level).collect();
        assert_eq!(levels, vec![RiskLevel::High, RiskLevel::Medium, RiskLevel::Low]);
        let ids: Vec<&str> = report.iter().map(|e| e.extension.identifier.as_str()).collect();
        assert_eq!(ids, vec!["z.high", "m.medium", "a.low"]);
    }

    #[test]
    fn names_compared_case_insensitively_within_tier() {
        let manifests = vec![low("p.b", "beta"), low("p.a", "Alpha"), low("p.c", "Gamma")];
        let report = build_report(&manifests);
        let labels: Vec<&str> = report.iter().map(|e| e.extension.label()).collect();
        assert_eq!(labels, vec!["Alpha", "beta", "Gamma"]);
    }

    #[test]
    fn identifier_used_when_display_name_missing() {
        let mut no_display = low("aaa.tool", "");
        no_display.display_name = None;
        let manifests = vec![low("p.x", "Bravo"), no_display];
        let report = build_report(&manifests);
        assert_eq!(report[0].extension.identifier, "aaa.tool");
    }

    #[test]
    fn colliding_names_break_ties_by_identifier() {
        let manifests = vec![low("b.same", "Same"), low("a.same", "same")];
        let report = build_report(&manifests);
        let ids: Vec<&str> = report.iter().map(|e| e.extension.identifier.as_str()).collect();
        assert_eq!(ids, vec!["a.same", "b.same"]);
    }

    #[test]
    fn builtins_excluded_regardless_of_score() {
        let mut builtin = high("vscode.git", "Git");
        builtin.is_builtin = true;
        let manifests = vec![builtin, low("a.b", "AB")];
        let report = build_report(&manifests);
        assert_eq!(report.len(), 1);
        assert!(report.iter().all(|e| !e.extension.is_builtin));
    }

    #[test]
    fn empty_when_only_builtins() {
        let mut builtin = low("vscode.json", "JSON");
        builtin.is_builtin = true;
        assert!(build_report(&[builtin]).is_empty());
        assert!(build_report(&[]).is_empty());
    }
}
