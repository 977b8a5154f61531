use serde::Serialize;

use crate::report::ReportEntry;

/// Label shown when the report has no entries.
pub const EMPTY_PLACEHOLDER: &str = "No extensions found.";

/// Presentation-ready view of one report entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayNode {
    pub label: String,
    pub description: String,
    pub tooltip: String,
    /// Status icon keyed to the risk tier; absent for placeholders.
    pub icon: Option<String>,
    /// Extension the node stands for; actions target this id.
    pub identifier: Option<String>,
}

impl DisplayNode {
    pub fn from_entry(entry: &ReportEntry) -> Self {
        let ext = &entry.extension;
        let level = entry.assessment.level;

        Self {
            label: ext.label().to_string(),
            description: format!("{} | {}", ext.qualified_name(), level.label()),
            tooltip: tooltip(entry),
            icon: Some(level.icon().to_string()),
            identifier: Some(ext.identifier.clone()),
        }
    }

    pub fn placeholder() -> Self {
        Self {
            label: EMPTY_PLACEHOLDER.into(),
            description: String::new(),
            tooltip: String::new(),
            icon: None,
            identifier: None,
        }
    }
}

fn tooltip(entry: &ReportEntry) -> String {
    let ext = &entry.extension;
    let mut lines = vec![
        format!("Risk: {}", entry.assessment.level.label()),
        format!("Version: {}", ext.version.as_deref().unwrap_or("unknown")),
        format!("ID: {}", ext.identifier),
    ];
    if !entry.assessment.reasons.is_empty() {
        lines.push(String::new());
        lines.push("Reasons:".into());
        lines.extend(entry.assessment.reasons.iter().map(|r| format!("- {}", r)));
    }
    lines.join("\n")
}

/// Nodes for a whole report, or a single placeholder when it is empty.
pub fn nodes(entries: &[ReportEntry]) -> Vec<DisplayNode> {
    if entries.is_empty() {
        return vec![DisplayNode::placeholder()];
    }
    entries.iter().map(DisplayNode::from_entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ExtensionManifest;
    use crate::risk::assess;
    use pretty_assertions::assert_eq;

    fn entry(manifest: ExtensionManifest) -> ReportEntry {
        ReportEntry {
            assessment: assess(&manifest),
            extension: manifest,
        }
    }

    #[test]
    fn high_risk_node() {
        let node = DisplayNode::from_entry(&entry(ExtensionManifest {
            identifier: "acme.tool".into(),
            name: "tool".into(),
            display_name: Some("Acme Tool".into()),
            publisher: Some("acme".into()),
            version: Some("1.2.3".into()),
            activation_events: vec!["*".into()],
            has_main_entry: true,
            ..Default::default()
        }));
        assert_eq!(node.label, "Acme Tool");
        assert_eq!(node.description, "acme.tool | High");
        assert_eq!(node.icon.as_deref(), Some("error"));
        assert_eq!(
            node.tooltip,
            "Risk: High\nVersion: 1.2.3\nID: acme.tool\n\nReasons:\n\
             - Activates on all events\n\
             - Runs in workspace (filesystem access)\n\
             - Runs Node.js extension host code"
        );
    }

    #[test]
    fn no_reasons_omits_block() {
        let node = DisplayNode::from_entry(&entry(ExtensionManifest {
            identifier: "acme.theme".into(),
            name: "theme".into(),
            extension_kind: vec!["ui".into()],
            ..Default::default()
        }));
        assert_eq!(node.label, "theme");
        assert_eq!(node.description, "acme.theme | Low");
        assert_eq!(node.icon.as_deref(), Some("check"));
        assert_eq!(node.tooltip, "Risk: Low\nVersion: unknown\nID: acme.theme");
    }

    #[test]
    fn medium_icon_is_warning() {
        let node = DisplayNode::from_entry(&entry(ExtensionManifest {
            identifier: "acme.watch".into(),
            name: "watch".into(),
            activation_events: vec!["onStartupFinished".into()],
            ..Default::default()
        }));
        assert_eq!(node.icon.as_deref(), Some("warning"));
        assert!(node.description.ends_with("| Medium"));
    }

    #[test]
    fn empty_report_yields_placeholder() {
        let nodes = nodes(&[]);
        assert_eq!(nodes, vec![DisplayNode::placeholder()]);
        assert_eq!(nodes[0].label, "No extensions found.");
    }
}
