use cargo_workspace_mcp::server::WorkspaceServer;
use cargo_workspace_mcp::stdlib::StandardLibraryRoots;
use cargo_workspace_mcp::tools::load_workspace;
use cargo_workspace_mcp::workspace::detection::auto_detect_workspace;
use rmcp::{ServiceExt, transport::stdio};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cargo_workspace_mcp::tracing::init();
    info!("Starting cargo-workspace-mcp MCP server");

    let stdlib = match StandardLibraryRoots::discover() {
        Ok(roots) => Some(roots),
        Err(e) => {
            warn!("Standard library sources unavailable: {:#}", e);
            None
        }
    };
    let server = WorkspaceServer::new(stdlib);

    if let Some(root) = auto_detect_workspace().await {
        match load_workspace(&root.display().to_string()).await {
            Ok((root, workspace)) => {
                server.state().replace(root, workspace).await;
            }
            Err(e) => warn!("Failed to load detected workspace: {:#}", e),
        }
    }

    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;
    service.waiting().await?;

    Ok(())
}
