use super::describe_target;
use crate::error::Result;
use crate::state::WorkspaceState;
use crate::workspace::{normalize_name, validate_crate_name};
use rmcp::schemars;
use serde::Deserialize;

/// Parameters for find_crate tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FindCrateRequest {
    /// Crate name as written in Cargo.toml or in Rust code (`serde-json` or `serde_json`)
    pub name: String,
}

/// Look up the library target that `use <name>` would refer to.
pub async fn handle_find_crate(state: &WorkspaceState, request: FindCrateRequest) -> Result<String> {
    validate_crate_name(&request.name)?;
    let snapshot = state.require_snapshot().await?;

    let norm_name = normalize_name(&request.name);
    Ok(match snapshot.workspace.find_crate_by_name(&norm_name) {
        Some(target) => describe_target(target),
        None => format!("No library crate named '{}' in the workspace.\n", norm_name),
    })
}
