//! The workspace model: packages, their targets, and the queries over them.

use super::metadata::{CleanCargoMetadata, CleanTarget};
use super::origin::PackageOrigin;
use super::package::Package;
use super::target::{Target, TargetKind};
use crate::error::WorkspaceError;
use crate::stdlib::StdCrate;
use crate::vfs::{FileHandle, canonical_url};
use ahash::AHashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Rust project model represented roughly in the same way as in Cargo itself.
///
/// A workspace is immutable once built. Refreshing metadata means building a
/// new one; [`CargoWorkspace::with_stdlib`] likewise returns a sibling value.
#[derive(Debug)]
pub struct CargoWorkspace {
    packages: Vec<Arc<Package>>,
    /// Crate root URL to `(package index, target index)`
    target_by_crate_root_url: AHashMap<String, (usize, usize)>,
}

impl CargoWorkspace {
    /// Indexes every target under the URL cargo reported and, when the file
    /// exists and resolves differently, under its canonical URL as well.
    fn new(packages: Vec<Arc<Package>>) -> Self {
        let mut target_by_crate_root_url = AHashMap::new();
        for (package_index, package) in packages.iter().enumerate() {
            for (target_index, target) in package.targets().iter().enumerate() {
                let url = target.crate_root_url();
                if let Some(canonical) = canonical_url(url)
                    && canonical != url
                {
                    target_by_crate_root_url.insert(canonical, (package_index, target_index));
                }
                target_by_crate_root_url.insert(url.to_string(), (package_index, target_index));
            }
        }

        Self {
            packages,
            target_by_crate_root_url,
        }
    }

    /// Builds the workspace from flat metadata.
    ///
    /// Packages mostly form a DAG, but a dev-dependency `X` of package `P` may
    /// itself depend on `P`. Cargo handles that by building `P`, then `X`, then
    /// `P`'s tests. Origins are therefore classified by name with a monotone
    /// "more trusted wins" merge instead of a graph traversal:
    /// - a workspace member is `Workspace`
    /// - a direct dependency of a workspace member is `Dependency`
    /// - anything else is `TransitiveDependency`
    pub fn deserialize(data: CleanCargoMetadata) -> Result<Self, WorkspaceError> {
        let mut name_to_origin: HashMap<&str, PackageOrigin> =
            HashMap::with_capacity(data.packages.len());

        for (index, pkg) in data.packages.iter().enumerate() {
            if pkg.is_workspace_member {
                name_to_origin.insert(&pkg.name, PackageOrigin::Workspace);
                let Some(node) = data.dependencies.get(index) else {
                    continue;
                };
                for &dep_index in &node.dependencies_indexes {
                    let Some(dep) = data.packages.get(dep_index) else {
                        debug!(
                            "Skipping dependency index {} of {}: only {} packages",
                            dep_index,
                            pkg.name,
                            data.packages.len()
                        );
                        continue;
                    };
                    name_to_origin
                        .entry(&dep.name)
                        .and_modify(|origin| *origin = origin.merge(PackageOrigin::Dependency))
                        .or_insert(PackageOrigin::Dependency);
                }
            } else {
                name_to_origin
                    .entry(&pkg.name)
                    .or_insert(PackageOrigin::TransitiveDependency);
            }
        }

        let origins: Vec<PackageOrigin> = data
            .packages
            .iter()
            .map(|pkg| {
                name_to_origin
                    .get(pkg.name.as_str())
                    .copied()
                    .ok_or_else(|| WorkspaceError::UndefinedOrigin {
                        package: pkg.name.clone(),
                    })
            })
            .collect::<Result<_, _>>()?;

        let packages = data
            .packages
            .into_iter()
            .zip(origins)
            .map(|(pkg, origin)| {
                Package::new(
                    pkg.root_url,
                    pkg.name,
                    pkg.version,
                    pkg.targets,
                    pkg.source,
                    origin,
                )
            })
            .collect();

        Ok(Self::new(packages))
    }

    /// All packages, in metadata order.
    pub fn packages(&self) -> &[Arc<Package>] {
        &self.packages
    }

    /// Packages with the given origin.
    pub fn packages_with_origin(
        &self,
        origin: PackageOrigin,
    ) -> impl Iterator<Item = &Arc<Package>> + '_ {
        self.packages.iter().filter(move |p| p.origin() == origin)
    }

    /// Finds the library target whose normalized name is `norm_name`.
    pub fn find_crate_by_name(&self, norm_name: &str) -> Option<&Target> {
        self.packages
            .iter()
            .filter_map(|p| p.lib_target())
            .find(|t| t.norm_name() == norm_name)
    }

    /// If `file` is a crate root, returns the corresponding [`Target`].
    ///
    /// The lookup goes through the canonical file so that differently spelled
    /// paths (symlinks, `..`) of the same file agree.
    pub fn find_target_for_crate_root_file(&self, file: &dyn FileHandle) -> Option<&Target> {
        let canonical = file.canonical_file()?;
        self.target_for_crate_root_url(canonical.url())
    }

    /// Looks up a target by the exact crate root URL cargo reported.
    pub fn target_for_crate_root_url(&self, url: &str) -> Option<&Target> {
        let &(package_index, target_index) = self.target_by_crate_root_url.get(url)?;
        self.packages
            .get(package_index)?
            .targets()
            .get(target_index)
    }

    pub fn is_crate_root(&self, file: &dyn FileHandle) -> bool {
        self.find_target_for_crate_root_file(file).is_some()
    }

    /// First package named exactly `name`.
    pub fn find_package(&self, name: &str) -> Option<&Arc<Package>> {
        self.packages.iter().find(|p| p.name() == name)
    }

    pub fn has_standard_library(&self) -> bool {
        self.packages
            .iter()
            .any(|p| p.origin() == PackageOrigin::StdLib)
    }

    /// Returns a new workspace with one synthetic `StdLib` package per crate.
    pub fn with_stdlib(&self, crates: &[StdCrate]) -> Self {
        let stdlib = crates.iter().map(|krate| {
            Package::new(
                krate.package_root_url.clone(),
                krate.name.clone(),
                String::new(),
                vec![CleanTarget {
                    root_url: krate.crate_root_url.clone(),
                    name: krate.name.clone(),
                    kind: TargetKind::Lib,
                }],
                None,
                PackageOrigin::StdLib,
            )
        });

        let packages = self.packages.iter().cloned().chain(stdlib).collect();
        Self::new(packages)
    }
}
