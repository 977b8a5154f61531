//! TrustLens — trust risk report for installed editor extensions.
//!
//! Reads each extension's manifest, scores it with a fixed rule set
//! (activation events, execution kind, native entry point) and ranks the
//! results so the riskiest extensions come first.
//!
//! # Quick Start
//!
//! ```no_run
//! use trustlens::{scan, ScanOptions};
//!
//! let options = ScanOptions::default();
//! let report = scan(&options).unwrap();
//! for entry in &report.entries {
//!     println!("{} {}", entry.assessment.level, entry.extension.identifier);
//! }
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod manifest;
pub mod output;
pub mod provider;
pub mod report;
pub mod risk;

use std::path::PathBuf;

use config::Config;
use error::Result;
use host::{DirectoryHost, EditorCliDispatcher};
use output::OutputFormat;
use provider::ReportProvider;
use report::policy::PolicyVerdict;
use report::ReportEntry;
use risk::RiskLevel;

pub use manifest::{normalize_list, ExtensionManifest};
pub use report::build_report;
pub use risk::{assess, Assessment};

/// Default config file, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".trustlens.toml";

/// Options for a scan invocation.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Path to config file (defaults to `.trustlens.toml` in the working dir).
    pub config_path: Option<PathBuf>,
    /// Extensions directory override.
    pub extensions_dir: Option<PathBuf>,
    /// Additional builtin extension directories.
    pub builtin_dirs: Vec<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// CLI override for fail_on threshold.
    pub fail_on_override: Option<RiskLevel>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            extensions_dir: None,
            builtin_dirs: Vec::new(),
            format: OutputFormat::Console,
            fail_on_override: None,
        }
    }
}

/// Complete scan report.
#[derive(Debug)]
pub struct ScanReport {
    /// Directory the extensions were read from.
    pub source: String,
    pub entries: Vec<ReportEntry>,
    pub verdict: PolicyVerdict,
}

/// Load config and fold in the CLI overrides.
pub fn load_config(options: &ScanOptions) -> Result<Config> {
    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let mut config = Config::load(&config_path)?;

    if let Some(dir) = &options.extensions_dir {
        config.scan.extensions_dir = Some(dir.clone());
    }
    config
        .scan
        .builtin_dirs
        .extend(options.builtin_dirs.iter().cloned());
    if let Some(fail_on) = options.fail_on_override {
        config.policy.fail_on = fail_on;
    }

    Ok(config)
}

/// Provider over the configured extensions directory and editor CLI.
pub fn open_provider(
    config: &Config,
    dry_run: bool,
) -> Result<ReportProvider<DirectoryHost, EditorCliDispatcher>> {
    let host = DirectoryHost::new(config.extensions_dir()?).with_builtin_dirs(config.builtin_dirs());
    let dispatcher = EditorCliDispatcher::new(config.editor_command()).dry_run(dry_run);
    Ok(ReportProvider::new(host, dispatcher, config.policy.clone()))
}

/// Run a complete scan: load config, read manifests, classify, rank.
pub fn scan(options: &ScanOptions) -> Result<ScanReport> {
    let config = load_config(options)?;
    let source = config.extensions_dir()?.display().to_string();

    let mut provider = open_provider(&config, true)?;
    provider.refresh()?;

    Ok(ScanReport {
        source,
        verdict: provider.verdict(),
        entries: provider.entries().to_vec(),
    })
}

/// Render a scan report in the specified format.
pub fn render_report(report: &ScanReport, format: OutputFormat) -> Result<String> {
    output::render(&report.entries, &report.verdict, format, &report.source)
}
