//! Report provider: the `refresh`, `disable` and `uninstall` commands.

use crate::error::{Result, TrustLensError};
use crate::host::{Action, ActionDispatcher, ExtensionHost};
use crate::output::node::{self, DisplayNode};
use crate::report::policy::{Policy, PolicyVerdict};
use crate::report::{build_report, ReportEntry};

/// Holds the most recent report and routes user actions to the host.
pub struct ReportProvider<H, D> {
    host: H,
    dispatcher: D,
    policy: Policy,
    entries: Vec<ReportEntry>,
}

impl<H: ExtensionHost, D: ActionDispatcher> ReportProvider<H, D> {
    pub fn new(host: H, dispatcher: D, policy: Policy) -> Self {
        Self {
            host,
            dispatcher,
            policy,
            entries: Vec::new(),
        }
    }

    /// Reload manifests from the host and rebuild the report.
    pub fn refresh(&mut self) -> Result<&[ReportEntry]> {
        let manifests = self.policy.apply(self.host.installed()?);
        self.entries = build_report(&manifests);
        Ok(&self.entries)
    }

    /// Entries from the last refresh.
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn verdict(&self) -> PolicyVerdict {
        self.policy.evaluate(&self.entries)
    }

    pub fn nodes(&self) -> Vec<DisplayNode> {
        node::nodes(&self.entries)
    }

    pub fn disable(&self, identifier: &str) -> Result<()> {
        self.request(identifier, Action::disable)
    }

    pub fn uninstall(&self, identifier: &str) -> Result<()> {
        self.request(identifier, Action::uninstall)
    }

    /// Only extensions present in the last report can be acted on.
    fn request(&self, identifier: &str, make: fn(String) -> Action) -> Result<()> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.extension.identifier.eq_ignore_ascii_case(identifier))
            .ok_or_else(|| TrustLensError::UnknownExtension(identifier.to_string()))?;

        let action = make(entry.extension.identifier.clone());
        tracing::info!(action = %action.kind, extension = %action.identifier, "requesting host action");
        self.dispatcher.dispatch(&action)
    }
}
