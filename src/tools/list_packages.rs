use crate::error::Result;
use crate::state::WorkspaceState;
use crate::workspace::{CargoWorkspace, PackageOrigin};
use anyhow::anyhow;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

/// Packages shown per origin before the list is abbreviated.
const MAX_LISTED: usize = 50;

/// Parameters for list_packages tool
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListPackagesRequest {
    /// Only list packages of this origin: "workspace", "dependency", "stdlib" or "transitive"
    #[serde(default)]
    pub origin: Option<String>,
}

/// List the packages of the loaded workspace, grouped by origin.
pub async fn handle_list_packages(
    state: &WorkspaceState,
    request: ListPackagesRequest,
) -> Result<String> {
    let origin = request
        .origin
        .as_deref()
        .map(str::parse::<PackageOrigin>)
        .transpose()
        .map_err(|e| anyhow!(e))?;
    let snapshot = state.require_snapshot().await?;
    Ok(format_packages(&snapshot.workspace, origin))
}

/// Render packages grouped by origin, most trusted group first.
pub fn format_packages(workspace: &CargoWorkspace, only: Option<PackageOrigin>) -> String {
    let mut output = String::new();

    for origin in PackageOrigin::ALL {
        if only.is_some_and(|only| only != origin) {
            continue;
        }

        let mut packages: Vec<_> = workspace.packages_with_origin(origin).collect();
        if packages.is_empty() {
            continue;
        }
        packages.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.version().cmp(b.version())));

        let _ = writeln!(output, "{} ({}):", heading(origin), packages.len());
        for package in packages.iter().take(MAX_LISTED) {
            let lib = package
                .lib_target()
                .map(|t| format!(" [lib {}]", t.norm_name()))
                .unwrap_or_default();
            let _ = writeln!(output, "  • {}{}", package, lib);
        }
        if packages.len() > MAX_LISTED {
            let _ = writeln!(output, "  ... and {} more", packages.len() - MAX_LISTED);
        }
        output.push('\n');
    }

    if output.is_empty() {
        output.push_str("No packages found.\n");
    }
    output
}

const fn heading(origin: PackageOrigin) -> &'static str {
    match origin {
        PackageOrigin::Workspace => "Workspace Members",
        PackageOrigin::Dependency => "Direct Dependencies",
        PackageOrigin::StdLib => "Standard Library",
        PackageOrigin::TransitiveDependency => "Transitive Dependencies",
    }
}
