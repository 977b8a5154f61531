use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrustLensError};
use crate::report::policy::Policy;

/// Editor binary used for disable/uninstall when none is configured.
pub const DEFAULT_EDITOR_COMMAND: &str = "code";

/// Top-level configuration from `.trustlens.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanSettings,
    #[serde(default)]
    pub policy: Policy,
}

/// Where to find extensions and how to reach the editor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSettings {
    /// User extensions directory. Defaults to `~/.vscode/extensions`.
    pub extensions_dir: Option<PathBuf>,
    /// Directories whose extensions ship with the editor.
    #[serde(default)]
    pub builtin_dirs: Vec<PathBuf>,
    /// Editor CLI used to disable or uninstall extensions.
    pub editor_command: Option<String>,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.policy.validate()?;
        Ok(config)
    }

    /// Extensions directory to scan, with `~` expanded.
    pub fn extensions_dir(&self) -> Result<PathBuf> {
        match &self.scan.extensions_dir {
            Some(dir) => Ok(expand_home(dir)),
            None => default_extensions_dir(),
        }
    }

    pub fn builtin_dirs(&self) -> Vec<PathBuf> {
        self.scan.builtin_dirs.iter().map(|d| expand_home(d)).collect()
    }

    pub fn editor_command(&self) -> &str {
        self.scan
            .editor_command
            .as_deref()
            .unwrap_or(DEFAULT_EDITOR_COMMAND)
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# TrustLens configuration

[scan]
# User extensions directory (default: ~/.vscode/extensions).
# extensions_dir = "~/.vscode/extensions"

# Directories holding extensions shipped with the editor; never reported.
# builtin_dirs = ["/usr/share/code/resources/app/extensions"]

# Editor CLI used by `disable` and `uninstall`.
# editor_command = "code"

[policy]
# Lowest risk tier that fails the scan (low, medium, high).
fail_on = "high"

# Extension identifiers to leave out of the report (glob patterns).
# ignore = ["ms-python.*"]
"#
    }
}

/// `~/.vscode/extensions` for the current user.
pub fn default_extensions_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".vscode").join("extensions"))
        .ok_or_else(|| TrustLensError::Config("cannot determine home directory".into()))
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::RiskLevel;

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join(".trustlens.toml")).unwrap();
        assert_eq!(config.policy.fail_on, RiskLevel::High);
        assert!(config.scan.extensions_dir.is_none());
        assert_eq!(config.editor_command(), "code");
    }

    #[test]
    fn starter_toml_parses() {
        let config: Config = toml::from_str(Config::starter_toml()).unwrap();
        assert_eq!(config.policy.fail_on, RiskLevel::High);
        assert!(config.policy.ignore.is_empty());
    }

    #[test]
    fn loads_all_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".trustlens.toml");
        std::fs::write(
            &path,
            r#"
[scan]
extensions_dir = "/opt/exts"
builtin_dirs = ["/opt/builtin"]
editor_command = "codium"

[policy]
fail_on = "medium"
ignore = ["acme.*"]
"#,
        )
        .unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.extensions_dir().unwrap(), PathBuf::from("/opt/exts"));
        assert_eq!(config.builtin_dirs(), vec![PathBuf::from("/opt/builtin")]);
        assert_eq!(config.editor_command(), "codium");
        assert_eq!(config.policy.fail_on, RiskLevel::Medium);
        assert_eq!(config.policy.ignore, vec!["acme.*"]);
    }

    #[test]
    fn bad_ignore_pattern_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".trustlens.toml");
        std::fs::write(&path, "[policy]\nignore = [\"[oops\"]\n").unwrap();
        assert!(matches!(Config::load(&path), Err(TrustLensError::Config(_))));
    }

    #[test]
    fn bad_level_is_toml_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".trustlens.toml");
        std::fs::write(&path, "[policy]\nfail_on = \"severe\"\n").unwrap();
        assert!(matches!(Config::load(&path), Err(TrustLensError::Toml(_))));
    }

    #[test]
    fn tilde_expanded() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/exts")), home.join("exts"));
        }
        assert_eq!(expand_home(Path::new("/abs")), PathBuf::from("/abs"));
    }
}
