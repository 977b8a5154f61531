//! Rule-based trust risk classifier.
//!
//! A fixed, ordered set of rules each inspect the manifest and may add points
//! and a reason. The accumulated score maps onto a three-tier ladder.

pub mod rules;

use serde::{Deserialize, Serialize};

use crate::manifest::ExtensionManifest;

/// Risk tier. Ordering follows severity: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const HIGH_THRESHOLD: u32 = 5;
    pub const MEDIUM_THRESHOLD: u32 = 3;

    pub fn from_score(score: u32) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            Self::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Position in the report; highest risk first.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    /// Capitalized label used in descriptions and tooltips.
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Status icon identifier.
    pub fn icon(self) -> &'static str {
        match self {
            Self::High => "error",
            Self::Medium => "warning",
            Self::Low => "check",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Result of classifying one manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub level: RiskLevel,
    pub score: u32,
    /// Reasons in rule evaluation order.
    pub reasons: Vec<String>,
}

/// Metadata about a scoring rule, used for `list-rules` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    pub points: u32,
    pub reason: String,
}

/// A scoring rule checks one manifest attribute.
pub trait Rule: Send + Sync {
    fn metadata(&self) -> RuleMetadata;

    /// Whether the rule fires for this manifest.
    fn matches(&self, manifest: &ExtensionManifest) -> bool;
}

/// Runs the registered rules, in order, against a manifest.
pub struct Classifier {
    rules: Vec<Box<dyn Rule>>,
}

impl Classifier {
    /// Create a classifier with the built-in rule set.
    pub fn new() -> Self {
        Self {
            rules: rules::all_rules(),
        }
    }

    pub fn assess(&self, manifest: &ExtensionManifest) -> Assessment {
        let mut score = 0;
        let mut reasons = Vec::new();

        for rule in &self.rules {
            if rule.matches(manifest) {
                let meta = rule.metadata();
                score += meta.points;
                reasons.push(meta.reason);
            }
        }

        Assessment {
            level: RiskLevel::from_score(score),
            score,
            reasons,
        }
    }

    pub fn list_rules(&self) -> Vec<RuleMetadata> {
        self.rules.iter().map(|r| r.metadata()).collect()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a manifest with the built-in rule set.
pub fn assess(manifest: &ExtensionManifest) -> Assessment {
    Classifier::new().assess(manifest)
}
