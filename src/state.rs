//! Session state shared by the MCP tools.
//!
//! The current workspace is held as an `Arc` snapshot. Loading a workspace
//! builds a complete new [`CargoWorkspace`] and swaps the pointer; tool calls
//! already holding the previous snapshot keep a coherent view of it.

use crate::error::Result;
use crate::stdlib::StandardLibraryRoots;
use crate::workspace::CargoWorkspace;
use anyhow::anyhow;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// A loaded workspace and the directory it was loaded from.
#[derive(Debug, Clone)]
pub struct WorkspaceSnapshot {
    pub root: PathBuf,
    pub workspace: Arc<CargoWorkspace>,
}

/// Shared state for workspace queries.
///
/// `None` means no workspace has been loaded yet, which is distinct from a
/// loaded workspace that happens to have no packages.
#[derive(Debug, Default)]
pub struct WorkspaceState {
    current: RwLock<Option<WorkspaceSnapshot>>,
    stdlib: Option<StandardLibraryRoots>,
}

impl WorkspaceState {
    /// Create a new state with optional stdlib support.
    pub fn new(stdlib: Option<StandardLibraryRoots>) -> Self {
        Self {
            current: RwLock::new(None),
            stdlib,
        }
    }

    pub fn stdlib(&self) -> Option<&StandardLibraryRoots> {
        self.stdlib.as_ref()
    }

    /// The current snapshot, if a workspace has been loaded.
    pub async fn snapshot(&self) -> Option<WorkspaceSnapshot> {
        self.current.read().await.clone()
    }

    /// The current snapshot, or an error telling the caller how to load one.
    pub async fn require_snapshot(&self) -> Result<WorkspaceSnapshot> {
        self.snapshot()
            .await
            .ok_or_else(|| anyhow!("Workspace not configured. Use set_workspace tool first."))
    }

    /// Installs a freshly built workspace, adding the standard library if known.
    ///
    /// Returns the installed workspace and the previous root, if any.
    pub async fn replace(
        &self,
        root: PathBuf,
        workspace: CargoWorkspace,
    ) -> (Arc<CargoWorkspace>, Option<PathBuf>) {
        let workspace = match &self.stdlib {
            Some(stdlib) if !stdlib.crates().is_empty() => workspace.with_stdlib(stdlib.crates()),
            _ => workspace,
        };
        info!(
            "Workspace at {} loaded with {} packages",
            root.display(),
            workspace.packages().len()
        );

        let workspace = Arc::new(workspace);
        let snapshot = WorkspaceSnapshot {
            root,
            workspace: Arc::clone(&workspace),
        };
        let previous = self
            .current
            .write()
            .await
            .replace(snapshot)
            .map(|previous| previous.root);
        (workspace, previous)
    }
}
