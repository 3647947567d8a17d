use super::describe_target;
use crate::error::Result;
use crate::state::WorkspaceState;
use crate::vfs::LocalFile;
use crate::workspace::detection::expand_tilde;
use anyhow::anyhow;
use rmcp::schemars;
use serde::Deserialize;
use std::path::PathBuf;

/// Parameters for find_crate_root tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FindCrateRootRequest {
    /// Source file to check. Relative paths are resolved against the workspace root.
    pub path: String,
}

/// Report which target, if any, has `path` as its crate root.
pub async fn handle_find_crate_root(
    state: &WorkspaceState,
    request: FindCrateRootRequest,
) -> Result<String> {
    let snapshot = state.require_snapshot().await?;

    let path = PathBuf::from(expand_tilde(&request.path).as_ref());
    let path = if path.is_absolute() {
        path
    } else {
        snapshot.root.join(path)
    };
    let file = LocalFile::from_path(&path)
        .ok_or_else(|| anyhow!("Cannot build a file URL for {}", path.display()))?;

    Ok(match snapshot.workspace.find_target_for_crate_root_file(&file) {
        Some(target) => describe_target(target),
        None => format!("{} is not a crate root.\n", path.display()),
    })
}
