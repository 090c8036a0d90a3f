//! Structured results of graph operations.
//!
//! The graph engine never prints. Callers branch on these values and render
//! whatever text they need.

use serde::Serialize;

/// A component that became installed during an install request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Installation {
    pub name: String,
    /// Installed only to satisfy a dependent
    pub implicit: bool,
}

/// Result of `GraphEngine::install_component`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InstallOutcome {
    /// The target was already installed; nothing changed.
    AlreadyInstalled { name: String },
    /// Components installed by this request, dependencies before dependents.
    /// The requested component is always last.
    Installed { installed: Vec<Installation> },
}

impl InstallOutcome {
    /// Names of every component this request installed.
    pub fn installed_names(&self) -> Vec<&str> {
        match self {
            InstallOutcome::AlreadyInstalled { .. } => Vec::new(),
            InstallOutcome::Installed { installed } => {
                installed.iter().map(|i| i.name.as_str()).collect()
            }
        }
    }
}

/// Result of `GraphEngine::remove`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemoveOutcome {
    /// The target is unknown or not currently installed.
    NotInstalled { name: String },
    /// Removal refused; these installed components still require the target.
    StillNeeded { name: String, needed_by: Vec<String> },
    /// The target was removed, followed by the dependencies the cascade
    /// removed with it, in removal order.
    Removed { name: String, cascaded: Vec<String> },
}

impl RemoveOutcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, RemoveOutcome::Removed { .. })
    }

    /// Names of every component this request uninstalled, target first.
    pub fn removed_names(&self) -> Vec<&str> {
        match self {
            RemoveOutcome::Removed { name, cascaded } => std::iter::once(name.as_str())
                .chain(cascaded.iter().map(String::as_str))
                .collect(),
            _ => Vec::new(),
        }
    }
}
