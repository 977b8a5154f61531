//! Extension manifest model.
//!
//! The host produces one `ExtensionManifest` per installed extension. The
//! classifier and report builder only ever read it.

pub mod package_json;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Read-only view of an installed extension's declared metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionManifest {
    /// Globally unique id, `publisher.name`.
    pub identifier: String,
    pub display_name: Option<String>,
    pub name: String,
    pub publisher: Option<String>,
    pub version: Option<String>,
    /// Declared activation triggers, in manifest order.
    pub activation_events: Vec<String>,
    /// Declared execution locations (`ui`, `workspace`).
    pub extension_kind: Vec<String>,
    /// Whether a host-executed entry point (`main`) is declared.
    pub has_main_entry: bool,
    /// Shipped with the editor itself.
    pub is_builtin: bool,
    /// Directory the manifest was loaded from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<PathBuf>,
}

impl ExtensionManifest {
    /// Whether the extension's code runs with workspace (filesystem) access.
    ///
    /// An absent `extensionKind` means the editor's default placement, which
    /// is the workspace extension host.
    pub fn runs_in_workspace(&self) -> bool {
        self.extension_kind.is_empty() || self.extension_kind.iter().any(|k| k == "workspace")
    }

    /// Name shown to the user: display name, then manifest name, then id.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| Some(self.name.as_str()).filter(|s| !s.is_empty()))
            .unwrap_or(&self.identifier)
    }

    /// Key used for alphabetical ordering within a tier.
    pub fn sort_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.identifier)
    }

    /// `publisher.name`, falling back to the segments of the identifier.
    pub fn qualified_name(&self) -> String {
        let mut segments = self.identifier.split('.');
        let id_publisher = segments.next().unwrap_or_default();
        let id_name = segments.next().filter(|s| !s.is_empty());

        let publisher = self
            .publisher
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(id_publisher);
        let name = Some(self.name.as_str())
            .filter(|s| !s.is_empty())
            .or(id_name)
            .unwrap_or(&self.identifier);

        format!("{}.{}", publisher, name)
    }
}

/// Coerce a manifest field that may be a scalar or a list into a list.
///
/// Absent or null input yields an empty list, a string yields a one-element
/// list, and a list keeps its string items in order. Anything else degrades
/// to empty.
pub fn normalize_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_absent_is_empty() {
        assert!(normalize_list(None).is_empty());
        assert!(normalize_list(Some(&Value::Null)).is_empty());
    }

    #[test]
    fn normalize_scalar_wraps() {
        assert_eq!(normalize_list(Some(&json!("x"))), vec!["x"]);
    }

    #[test]
    fn normalize_list_preserves_order() {
        assert_eq!(normalize_list(Some(&json!(["x", "y"]))), vec!["x", "y"]);
    }

    #[test]
    fn normalize_malformed_degrades() {
        assert!(normalize_list(Some(&json!(42))).is_empty());
        assert!(normalize_list(Some(&json!({"ui": true}))).is_empty());
        assert_eq!(normalize_list(Some(&json!(["ui", 3, "workspace"]))), vec!["ui", "workspace"]);
    }

    #[test]
    fn empty_kind_runs_in_workspace() {
        let m = ExtensionManifest::default();
        assert!(m.runs_in_workspace());
    }

    #[test]
    fn ui_only_does_not_run_in_workspace() {
        let m = ExtensionManifest {
            extension_kind: vec!["ui".into()],
            ..Default::default()
        };
        assert!(!m.runs_in_workspace());
    }

    #[test]
    fn label_falls_back_to_name_then_id() {
        let mut m = ExtensionManifest {
            identifier: "acme.tool".into(),
            name: "tool".into(),
            display_name: Some("Acme Tool".into()),
            ..Default::default()
        };
        assert_eq!(m.label(), "Acme Tool");
        m.display_name = None;
        assert_eq!(m.label(), "tool");
        m.name.clear();
        assert_eq!(m.label(), "acme.tool");
    }

    #[test]
    fn qualified_name_uses_identifier_segments() {
        let m = ExtensionManifest {
            identifier: "acme.tool".into(),
            ..Default::default()
        };
        assert_eq!(m.qualified_name(), "acme.tool");

        let bare = ExtensionManifest {
            identifier: "standalone".into(),
            ..Default::default()
        };
        assert_eq!(bare.qualified_name(), "standalone.standalone");
    }
}
