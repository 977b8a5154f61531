use crate::manifest::ExtensionManifest;

use super::{Rule, RuleMetadata};

/// Returns the built-in rules in evaluation order.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(WildcardActivation),
        Box::new(StartupActivation),
        Box::new(WorkspaceExecution),
        Box::new(ExtensionHostCode),
    ]
}

/// TL-001: activates on every event (`"*"`).
pub struct WildcardActivation;

impl Rule for WildcardActivation {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata {
            id: "TL-001".into(),
            name: "Wildcard Activation".into(),
            description: "Extension declares the `*` activation event and loads for every session".into(),
            points: 3,
            reason: "Activates on all events".into(),
        }
    }

    fn matches(&self, manifest: &ExtensionManifest) -> bool {
        manifest.activation_events.iter().any(|e| e == "*")
    }
}

/// TL-002: activates once the editor has started.
pub struct StartupActivation;

impl Rule for StartupActivation {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata {
            id: "TL-002".into(),
            name: "Startup Activation".into(),
            description: "Extension declares `onStartupFinished` and runs without user action".into(),
            points: 2,
            reason: "Activates on startup".into(),
        }
    }

    fn matches(&self, manifest: &ExtensionManifest) -> bool {
        manifest
            .activation_events
            .iter()
            .any(|e| e == "onStartupFinished")
    }
}

/// TL-003: runs in the workspace extension host.
pub struct WorkspaceExecution;

impl Rule for WorkspaceExecution {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata {
            id: "TL-003".into(),
            name: "Workspace Execution".into(),
            description: "Extension kind includes `workspace` or is undeclared, giving filesystem access".into(),
            points: 2,
            reason: "Runs in workspace (filesystem access)".into(),
        }
    }

    fn matches(&self, manifest: &ExtensionManifest) -> bool {
        manifest.runs_in_workspace()
    }
}

/// TL-004: ships a `main` entry point executed by the workspace host.
pub struct ExtensionHostCode;

impl Rule for ExtensionHostCode {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata {
            id: "TL-004".into(),
            name: "Extension Host Code".into(),
            description: "Extension declares a `main` entry point that runs in the workspace Node.js host".into(),
            points: 1,
            reason: "Runs Node.js extension host code".into(),
        }
    }

    fn matches(&self, manifest: &ExtensionManifest) -> bool {
        manifest.has_main_entry && manifest.runs_in_workspace()
    }
}
