use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrustLensError};

/// Remediation the user can request for an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Disable,
    Uninstall,
}

impl ActionKind {
    /// Editor command id that performs this action inside the editor.
    pub fn host_command(self) -> &'static str {
        match self {
            Self::Disable => "workbench.extensions.disableExtension",
            Self::Uninstall => "workbench.extensions.uninstallExtension",
        }
    }

    /// Editor CLI flag that performs this action from a shell.
    pub fn cli_flag(self) -> &'static str {
        match self {
            Self::Disable => "--disable-extension",
            Self::Uninstall => "--uninstall-extension",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disable => write!(f, "disable"),
            Self::Uninstall => write!(f, "uninstall"),
        }
    }
}

/// A request to act on one extension by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub identifier: String,
}

impl Action {
    pub fn disable(identifier: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Disable,
            identifier: identifier.into(),
        }
    }

    pub fn uninstall(identifier: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Uninstall,
            identifier: identifier.into(),
        }
    }
}

/// Hands actions to the host. Fire-and-forget: implementations return once
/// the request is issued and do not report whether the host completed it.
pub trait ActionDispatcher {
    fn dispatch(&self, action: &Action) -> Result<()>;
}

/// Forwards actions to the editor's command-line interface.
#[derive(Debug, Clone)]
pub struct EditorCliDispatcher {
    program: String,
    dry_run: bool,
}

impl EditorCliDispatcher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            dry_run: false,
        }
    }

    /// Log the command instead of running it.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Full command line for an action, program first.
    pub fn command_line(&self, action: &Action) -> Vec<String> {
        vec![
            self.program.clone(),
            action.kind.cli_flag().to_string(),
            action.identifier.clone(),
        ]
    }
}

impl ActionDispatcher for EditorCliDispatcher {
    fn dispatch(&self, action: &Action) -> Result<()> {
        let argv = self.command_line(action);

        if self.dry_run {
            tracing::info!(command = %argv.join(" "), "dry run, not dispatching");
            return Ok(());
        }

        tracing::debug!(
            action = %action.kind,
            extension = %action.identifier,
            host_command = action.kind.host_command(),
            "dispatching to editor"
        );

        Command::new(&argv[0])
            .args(&argv[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_child| ())
            .map_err(|e| TrustLensError::Dispatch {
                action: action.kind.to_string(),
                identifier: action.identifier.clone(),
                message: format!("{}: {}", self.program, e),
            })
    }
}
