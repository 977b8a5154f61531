use std::path::Path;

use serde_json::Value;

use super::{normalize_list, ExtensionManifest};
use crate::error::{Result, TrustLensError};

/// Publisher the editor assigns to manifests that omit one.
pub const UNDEFINED_PUBLISHER: &str = "undefined_publisher";

/// Build a manifest from the contents of an extension's `package.json`.
///
/// `nls` is the optional `package.nls.json` used to resolve `%key%`
/// placeholders in the display name. Fields that are missing or of the wrong
/// type fall back to defaults; only a document that is not a JSON object is
/// rejected.
pub fn parse_manifest(dir: &Path, content: &str, nls: Option<&str>) -> Result<ExtensionManifest> {
    let value: Value = serde_json::from_str(content).map_err(|e| TrustLensError::Manifest {
        path: dir.join("package.json").display().to_string(),
        message: e.to_string(),
    })?;
    if !value.is_object() {
        return Err(TrustLensError::Manifest {
            path: dir.join("package.json").display().to_string(),
            message: "expected a JSON object".into(),
        });
    }

    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (dir_publisher, dir_ext_name) = split_dir_name(&dir_name);

    let name = string_field(&value, "name").unwrap_or(dir_ext_name);
    let publisher = string_field(&value, "publisher");
    let id_publisher = publisher
        .clone()
        .or(dir_publisher)
        .unwrap_or_else(|| UNDEFINED_PUBLISHER.into());

    let nls_value = nls.and_then(|s| serde_json::from_str::<Value>(s).ok());
    let display_name = string_field(&value, "displayName")
        .and_then(|d| resolve_placeholder(&d, nls_value.as_ref()));

    Ok(ExtensionManifest {
        identifier: format!("{}.{}", id_publisher, name),
        display_name,
        name,
        publisher,
        version: string_field(&value, "version"),
        activation_events: normalize_list(value.get("activationEvents")),
        extension_kind: normalize_list(value.get("extensionKind")),
        has_main_entry: string_field(&value, "main").is_some(),
        is_builtin: value
            .get("isBuiltin")
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
        location: Some(dir.to_path_buf()),
    })
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Resolve a `%key%` localization placeholder. Unresolvable placeholders
/// become `None` so callers fall back to the identifier.
fn resolve_placeholder(raw: &str, nls: Option<&Value>) -> Option<String> {
    let key = match raw.strip_prefix('%').and_then(|s| s.strip_suffix('%')) {
        Some(key) if !key.is_empty() => key,
        _ => return Some(raw.to_string()),
    };
    let entry = nls?.get(key)?;
    entry
        .as_str()
        .or_else(|| entry.get("message").and_then(|m| m.as_str()))
        .map(|s| s.to_string())
}

/// Split an install directory name like `ms-python.python-2024.1.0` into
/// publisher and extension name, dropping the version suffix.
fn split_dir_name(dir_name: &str) -> (Option<String>, String) {
    let (publisher, rest) = match dir_name.split_once('.') {
        Some((p, rest)) if !p.is_empty() => (Some(p.to_string()), rest),
        _ => (None, dir_name),
    };
    let name = match rest.rsplit_once('-') {
        Some((n, version)) if version.starts_with(|c: char| c.is_ascii_digit()) => n,
        _ => rest,
    };
    (publisher, name.to_string())
}
