//! MCP server exposing workspace queries.

use crate::state::WorkspaceState;
use crate::stdlib::StandardLibraryRoots;
use crate::tools::find_crate::{FindCrateRequest, handle_find_crate};
use crate::tools::find_crate_root::{FindCrateRootRequest, handle_find_crate_root};
use crate::tools::list_packages::{ListPackagesRequest, handle_list_packages};
use crate::tools::set_workspace::{SetWorkspaceRequest, handle_set_workspace};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP Server for cargo workspace queries
#[derive(Clone)]
pub struct WorkspaceServer {
    /// Shared workspace state (current snapshot, stdlib roots)
    state: Arc<WorkspaceState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for WorkspaceServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl WorkspaceServer {
    /// Create a new WorkspaceServer with optional stdlib support.
    pub fn new(stdlib: Option<StandardLibraryRoots>) -> Self {
        Self {
            state: Arc::new(WorkspaceState::new(stdlib)),
            tool_router: Self::tool_router(),
        }
    }

    /// Get a reference to the shared state.
    pub fn state(&self) -> &Arc<WorkspaceState> {
        &self.state
    }

    #[tool(
        description = "Load the cargo workspace containing the given directory. Runs cargo metadata and classifies every package as a workspace member, direct dependency, standard library crate, or transitive dependency."
    )]
    async fn set_workspace(
        &self,
        Parameters(request): Parameters<SetWorkspaceRequest>,
    ) -> std::result::Result<String, String> {
        handle_set_workspace(&self.state, request)
            .await
            .map_err(|e| format!("Failed to set workspace: {:#}", e))
    }

    #[tool(
        description = "List the packages of the loaded workspace grouped by origin (workspace, dependency, stdlib, transitive), with versions and library crate names."
    )]
    async fn list_packages(
        &self,
        Parameters(request): Parameters<ListPackagesRequest>,
    ) -> std::result::Result<String, String> {
        handle_list_packages(&self.state, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(
        description = "Find the library crate a name refers to, e.g. 'serde_json' or 'serde-json'. Shows the owning package, its origin, and the crate root file."
    )]
    async fn find_crate(
        &self,
        Parameters(request): Parameters<FindCrateRequest>,
    ) -> std::result::Result<String, String> {
        handle_find_crate(&self.state, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(
        description = "Check whether a source file is the crate root of some target (lib.rs, main.rs, an example, a test, ...). Symlinks and '..' are resolved before the lookup."
    )]
    async fn find_crate_root(
        &self,
        Parameters(request): Parameters<FindCrateRootRequest>,
    ) -> std::result::Result<String, String> {
        handle_find_crate_root(&self.state, request)
            .await
            .map_err(|e| e.to_string())
    }
}

#[tool_handler]
impl ServerHandler for WorkspaceServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "cargo-workspace-mcp: answers which target a source file belongs to and whether a \
                 crate is a workspace member, a direct dependency, or transitive. \
                 The workspace is detected automatically on startup; use set_workspace to load another one.",
            )
    }
}
