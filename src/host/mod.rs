//! Host platform seam: where manifests come from and where actions go.

pub mod dispatch;

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::{Result, TrustLensError};
use crate::manifest::package_json::parse_manifest;
use crate::manifest::ExtensionManifest;

pub use dispatch::{Action, ActionDispatcher, ActionKind, EditorCliDispatcher};

/// Lists the extensions currently installed in the editor.
pub trait ExtensionHost {
    fn installed(&self) -> Result<Vec<ExtensionManifest>>;
}

/// Reads extensions from a VS Code style extensions directory: one
/// subdirectory per extension, each holding a `package.json`.
#[derive(Debug, Clone)]
pub struct DirectoryHost {
    extensions_dir: PathBuf,
    builtin_dirs: Vec<PathBuf>,
}

impl DirectoryHost {
    pub fn new(extensions_dir: impl Into<PathBuf>) -> Self {
        Self {
            extensions_dir: extensions_dir.into(),
            builtin_dirs: Vec::new(),
        }
    }

    /// Also load extensions shipped with the editor; they are marked builtin.
    pub fn with_builtin_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.builtin_dirs = dirs;
        self
    }
}

impl ExtensionHost for DirectoryHost {
    fn installed(&self) -> Result<Vec<ExtensionManifest>> {
        if !self.extensions_dir.is_dir() {
            return Err(TrustLensError::ExtensionsDir(
                self.extensions_dir.display().to_string(),
            ));
        }

        let mut found = load_dir(&self.extensions_dir, false);
        for dir in &self.builtin_dirs {
            if dir.is_dir() {
                found.extend(load_dir(dir, true));
            } else {
                tracing::warn!(path = %dir.display(), "builtin extensions directory missing, skipping");
            }
        }

        // Side-by-side installs of one extension: keep the newest.
        let mut by_id: BTreeMap<String, ExtensionManifest> = BTreeMap::new();
        for manifest in found {
            let key = manifest.identifier.to_lowercase();
            let newer = by_id.get(&key).map_or(true, |existing| {
                compare_versions(existing.version.as_deref(), manifest.version.as_deref())
                    == Ordering::Less
            });
            if newer {
                by_id.insert(key, manifest);
            }
        }

        tracing::debug!(
            path = %self.extensions_dir.display(),
            count = by_id.len(),
            "loaded extension manifests"
        );

        Ok(by_id.into_values().collect())
    }
}

fn load_dir(root: &Path, builtin: bool) -> Vec<ExtensionManifest> {
    let obsolete = read_obsolete(root);
    let mut manifests = Vec::new();

    let walker = walkdir::WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "unreadable directory entry, skipping");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let dir_name = entry.file_name().to_string_lossy();
        if dir_name.starts_with('.') || obsolete.contains(&*dir_name) {
            continue;
        }

        let dir = entry.path();
        let pkg_path = dir.join("package.json");
        if !pkg_path.is_file() {
            continue;
        }

        match load_manifest(dir) {
            Ok(mut manifest) => {
                manifest.is_builtin |= builtin;
                manifests.push(manifest);
            }
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "invalid extension manifest, skipping");
            }
        }
    }

    manifests
}

fn load_manifest(dir: &Path) -> Result<ExtensionManifest> {
    let content = std::fs::read_to_string(dir.join("package.json"))?;
    let nls = std::fs::read_to_string(dir.join("package.nls.json")).ok();
    parse_manifest(dir, &content, nls.as_deref())
}

/// Directory names the editor has uninstalled but not yet removed, listed in
/// the `.obsolete` JSON object.
fn read_obsolete(root: &Path) -> HashSet<String> {
    let path = root.join(".obsolete");
    let Ok(content) = std::fs::read_to_string(&path) else {
        return HashSet::new();
    };
    match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(&content) {
        Ok(map) => map
            .into_iter()
            .filter(|(_, v)| v.as_bool().unwrap_or(false))
            .map(|(k, _)| k)
            .collect(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable .obsolete file, ignoring");
            HashSet::new()
        }
    }
}

/// Semver-aware version ordering. Parsable versions beat unparsable ones;
/// otherwise fall back to string comparison.
fn compare_versions(a: Option<&str>, b: Option<&str>) -> Ordering {
    let parse = |v: Option<&str>| v.and_then(|s| semver::Version::parse(s.trim_start_matches('v')).ok());
    match (parse(a), parse(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(&b),
    }
}
