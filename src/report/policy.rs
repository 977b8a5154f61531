use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};

use super::ReportEntry;
use crate::error::{Result, TrustLensError};
use crate::manifest::ExtensionManifest;
use crate::risk::RiskLevel;

/// Policy verdict — pass/fail decision over a finished report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyVerdict {
    pub pass: bool,
    pub total_extensions: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub highest_level: Option<RiskLevel>,
    pub fail_threshold: RiskLevel,
}

/// Policy configuration loaded from `.trustlens.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Lowest tier that fails the scan.
    #[serde(default = "default_fail_on")]
    pub fail_on: RiskLevel,
    /// Glob patterns over extension identifiers to leave out of the report.
    #[serde(default)]
    pub ignore: Vec<String>,
}

fn default_fail_on() -> RiskLevel {
    RiskLevel::High
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            fail_on: RiskLevel::High,
            ignore: Vec::new(),
        }
    }
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

impl Policy {
    /// Check that every ignore pattern compiles.
    pub fn validate(&self) -> Result<()> {
        for raw in &self.ignore {
            Pattern::new(raw).map_err(|e| {
                TrustLensError::Config(format!("invalid ignore pattern '{}': {}", raw, e))
            })?;
        }
        Ok(())
    }

    pub fn is_ignored(&self, identifier: &str) -> bool {
        self.ignore.iter().any(|raw| {
            Pattern::new(raw)
                .map(|p| p.matches_with(identifier, MATCH_OPTIONS))
                .unwrap_or(false)
        })
    }

    /// Drop manifests matched by an ignore pattern.
    pub fn apply(&self, manifests: Vec<ExtensionManifest>) -> Vec<ExtensionManifest> {
        manifests
            .into_iter()
            .filter(|m| {
                let ignored = self.is_ignored(&m.identifier);
                if ignored {
                    tracing::debug!(extension = %m.identifier, "ignored by policy");
                }
                !ignored
            })
            .collect()
    }

    /// Evaluate a report against this policy and produce a verdict.
    pub fn evaluate(&self, entries: &[ReportEntry]) -> PolicyVerdict {
        let levels: Vec<RiskLevel> = entries.iter().map(|e| e.assessment.level).collect();
        let count = |level: RiskLevel| levels.iter().filter(|&&l| l == level).count();

        PolicyVerdict {
            pass: !levels.iter().any(|&l| l >= self.fail_on),
            total_extensions: entries.len(),
            high: count(RiskLevel::High),
            medium: count(RiskLevel::Medium),
            low: count(RiskLevel::Low),
            highest_level: levels.iter().copied().max(),
            fail_threshold: self.fail_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::Assessment;

    fn entry(id: &str, level: RiskLevel) -> ReportEntry {
        ReportEntry {
            extension: ExtensionManifest {
                identifier: id.into(),
                ..Default::default()
            },
            assessment: Assessment {
                level,
                score: 0,
                reasons: vec![],
            },
        }
    }

    #[test]
    fn default_policy_fails_on_high() {
        let verdict = Policy::default().evaluate(&[entry("a.b", RiskLevel::High)]);
        assert!(!verdict.pass);
        assert_eq!(verdict.highest_level, Some(RiskLevel::High));
    }

    #[test]
    fn default_policy_passes_on_medium() {
        let verdict = Policy::default().evaluate(&[
            entry("a.b", RiskLevel::Medium),
            entry("a.c", RiskLevel::Low),
        ]);
        assert!(verdict.pass);
        assert_eq!(verdict.medium, 1);
        assert_eq!(verdict.low, 1);
        assert_eq!(verdict.total_extensions, 2);
    }

    #[test]
    fn lowered_threshold_fails_on_medium() {
        let policy = Policy {
            fail_on: RiskLevel::Medium,
            ..Default::default()
        };
        assert!(!policy.evaluate(&[entry("a.b", RiskLevel::Medium)]).pass);
    }

    #[test]
    fn empty_report_passes() {
        let verdict = Policy::default().evaluate(&[]);
        assert!(verdict.pass);
        assert_eq!(verdict.highest_level, None);
    }

    #[test]
    fn ignore_patterns_match_case_insensitively() {
        let policy = Policy {
            ignore: vec!["MS-Python.*".into(), "acme.exact".into()],
            ..Default::default()
        };
        assert!(policy.is_ignored("ms-python.python"));
        assert!(policy.is_ignored("acme.exact"));
        assert!(!policy.is_ignored("acme.other"));

        let kept = policy.apply(vec![
            ExtensionManifest {
                identifier: "ms-python.debugpy".into(),
                ..Default::default()
            },
            ExtensionManifest {
                identifier: "rust-lang.rust-analyzer".into(),
                ..Default::default()
            },
        ]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].identifier, "rust-lang.rust-analyzer");
    }

    #[test]
    fn invalid_pattern_rejected() {
        let policy = Policy {
            ignore: vec!["[unclosed".into()],
            ..Default::default()
        };
        assert!(matches!(policy.validate(), Err(TrustLensError::Config(_))));
    }
}
