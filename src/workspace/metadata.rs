//! Flat metadata consumed by the workspace model, and its construction from
//! `cargo metadata` output.

use super::target::TargetKind;
use crate::error::{Result, WorkspaceError};
use crate::vfs::path_to_url;
use anyhow::Context;
use cargo_metadata::{Metadata, MetadataCommand, PackageId};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

static CRATE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("crate name pattern is valid"));

/// Validate crate name contains only safe characters
pub fn validate_crate_name(name: &str) -> std::result::Result<(), WorkspaceError> {
    if CRATE_NAME.is_match(name) {
        Ok(())
    } else {
        Err(WorkspaceError::InvalidCrateName {
            name: name.to_string(),
        })
    }
}

/// Every package and target known to cargo's resolution, already parsed.
///
/// `dependencies` is indexed in parallel with `packages`. Only workspace
/// members carry resolved dependencies; the list may be shorter than
/// `packages`, in which case the missing tail has no dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanCargoMetadata {
    pub packages: Vec<CleanPackage>,
    #[serde(default)]
    pub dependencies: Vec<DependencyNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanPackage {
    /// URL of the directory holding the package manifest
    pub root_url: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub source: Option<String>,
    pub is_workspace_member: bool,
    pub targets: Vec<CleanTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanTarget {
    /// URL of the crate root file
    pub root_url: String,
    pub name: String,
    pub kind: TargetKind,
}

/// Positions (into [`CleanCargoMetadata::packages`]) of one package's dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    #[serde(default)]
    pub dependencies_indexes: Vec<usize>,
}

impl CleanCargoMetadata {
    /// Flattens `cargo metadata` output.
    ///
    /// Resolved dependencies are kept for workspace members only. They include
    /// dev-dependencies, so the resulting graph may contain cycles.
    pub fn from_cargo(metadata: &Metadata) -> Self {
        let index_of: HashMap<&PackageId, usize> = metadata
            .packages
            .iter()
            .enumerate()
            .map(|(index, pkg)| (&pkg.id, index))
            .collect();
        let members: HashSet<&PackageId> = metadata.workspace_members.iter().collect();

        let packages: Vec<CleanPackage> = metadata
            .packages
            .iter()
            .map(|pkg| CleanPackage {
                root_url: pkg
                    .manifest_path
                    .parent()
                    .and_then(|dir| path_to_url(dir.as_std_path()))
                    .unwrap_or_default(),
                name: pkg.name.to_string(),
                version: pkg.version.to_string(),
                source: pkg.source.as_ref().map(ToString::to_string),
                is_workspace_member: members.contains(&pkg.id),
                targets: pkg
                    .targets
                    .iter()
                    .map(|target| CleanTarget {
                        root_url: path_to_url(target.src_path.as_std_path()).unwrap_or_default(),
                        name: target.name.clone(),
                        kind: target_kind(&target.kind),
                    })
                    .collect(),
            })
            .collect();

        let mut dependencies = vec![DependencyNode::default(); packages.len()];
        if let Some(resolve) = &metadata.resolve {
            for node in &resolve.nodes {
                if !members.contains(&node.id) {
                    continue;
                }
                let Some(&index) = index_of.get(&node.id) else {
                    debug!("Resolve node {} has no matching package", node.id);
                    continue;
                };
                dependencies[index].dependencies_indexes = node
                    .dependencies
                    .iter()
                    .filter_map(|id| index_of.get(id).copied())
                    .collect();
            }
        }

        Self {
            packages,
            dependencies,
        }
    }
}

/// Picks the first kind of a cargo target that maps to a known [`TargetKind`].
fn target_kind(kinds: &[cargo_metadata::TargetKind]) -> TargetKind {
    use cargo_metadata::TargetKind as Cargo;

    kinds
        .iter()
        .map(|kind| match kind {
            Cargo::Lib
            | Cargo::RLib
            | Cargo::DyLib
            | Cargo::CDyLib
            | Cargo::StaticLib
            | Cargo::ProcMacro => TargetKind::Lib,
            Cargo::Bin => TargetKind::Bin,
            Cargo::Test => TargetKind::Test,
            Cargo::Example => TargetKind::Example,
            Cargo::Bench => TargetKind::Bench,
            _ => TargetKind::Unknown,
        })
        .find(|kind| *kind != TargetKind::Unknown)
        .unwrap_or(TargetKind::Unknown)
}

/// Runs `cargo metadata` for the given manifest on a blocking thread.
pub async fn load_cargo_metadata(manifest_path: &Path) -> Result<Metadata> {
    let manifest_path = manifest_path.to_path_buf();
    let metadata = tokio::task::spawn_blocking(move || {
        MetadataCommand::new()
            .manifest_path(&manifest_path)
            .exec()
            .with_context(|| {
                format!(
                    "Failed to run cargo metadata for {}",
                    manifest_path.display()
                )
            })
    })
    .await
    .context("Task panicked")??;

    info!(
        "cargo metadata: {} packages, {} workspace members",
        metadata.packages.len(),
        metadata.workspace_members.len()
    );
    Ok(metadata)
}

/// Runs `cargo metadata` and flattens the result.
pub async fn fetch_clean_metadata(manifest_path: &Path) -> Result<CleanCargoMetadata> {
    let metadata = load_cargo_metadata(manifest_path).await?;
    Ok(CleanCargoMetadata::from_cargo(&metadata))
}
