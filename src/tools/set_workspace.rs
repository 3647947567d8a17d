use crate::error::Result;
use crate::state::WorkspaceState;
use crate::workspace::detection::expand_tilde;
use crate::workspace::{CargoWorkspace, PackageOrigin, fetch_clean_metadata, find_workspace_root};
use anyhow::{Context, anyhow};
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Parameters for set_workspace tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetWorkspaceRequest {
    /// Path to the Rust project directory (must contain Cargo.toml)
    pub path: String,
}

/// Locate the workspace for `path`, run cargo metadata, and build the model.
///
/// Returns the canonical workspace root and the freshly built workspace.
pub async fn load_workspace(path: &str) -> Result<(PathBuf, CargoWorkspace)> {
    let expanded = expand_tilde(path);
    let canonical = tokio::fs::canonicalize(expanded.as_ref())
        .await
        .with_context(|| format!("Failed to resolve path '{}'", path))?;

    if !canonical.is_dir() {
        return Err(anyhow!(
            "Path is not a directory: {}",
            canonical.display()
        ));
    }
    if !canonical.join("Cargo.toml").is_file() {
        return Err(anyhow!(
            "No Cargo.toml found in directory: {}",
            canonical.display()
        ));
    }

    let root = find_workspace_root(&canonical).unwrap_or(canonical);
    let metadata = fetch_clean_metadata(&root.join("Cargo.toml")).await?;
    let workspace = CargoWorkspace::deserialize(metadata)
        .with_context(|| format!("Inconsistent cargo metadata for {}", root.display()))?;

    Ok((root, workspace))
}

/// Load the workspace at `path` into `state`.
pub async fn handle_set_workspace(state: &WorkspaceState, request: SetWorkspaceRequest) -> Result<String> {
    let (root, workspace) = load_workspace(&request.path).await?;
    let (workspace, previous) = state.replace(root.clone(), workspace).await;
    Ok(format_response(&root, &workspace, previous.as_deref()))
}

/// Format a user-friendly response showing workspace configuration results.
pub fn format_response(root: &Path, workspace: &CargoWorkspace, previous: Option<&Path>) -> String {
    let mut response = format!("Workspace configured: {}\n", root.display());
    if let Some(previous) = previous
        && previous != root
    {
        let _ = writeln!(response, "(previously: {})", previous.display());
    }
    response.push('\n');

    let members: Vec<_> = workspace
        .packages_with_origin(PackageOrigin::Workspace)
        .collect();
    if !members.is_empty() {
        let _ = writeln!(response, "Workspace members ({}):", members.len());
        for member in members {
            let _ = writeln!(response, "  - {}", member);
        }
        response.push('\n');
    }

    let direct = workspace
        .packages_with_origin(PackageOrigin::Dependency)
        .count();
    let transitive = workspace
        .packages_with_origin(PackageOrigin::TransitiveDependency)
        .count();
    let _ = writeln!(
        response,
        "Dependencies: {} direct, {} transitive",
        direct, transitive
    );

    if workspace.has_standard_library() {
        let names: Vec<&str> = workspace
            .packages_with_origin(PackageOrigin::StdLib)
            .map(|p| p.name())
            .collect();
        let _ = writeln!(response, "Standard library: {}", names.join(", "));
    } else {
        response.push_str("Standard library: not available (install rust-src)\n");
    }

    response
}
