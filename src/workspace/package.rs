//! Packages: named, versioned units of distribution that own their targets.

use super::metadata::CleanTarget;
use super::origin::PackageOrigin;
use super::target::Target;
use crate::vfs::{FileHandle, FileSystem};
use std::fmt;
use std::sync::Arc;

/// A package known to cargo's dependency resolution.
#[derive(Debug)]
pub struct Package {
    content_root_url: String,
    name: String,
    version: String,
    targets: Vec<Target>,
    /// `None` for local and path packages
    source: Option<String>,
    origin: PackageOrigin,
}

impl Package {
    /// Builds a package and its targets, wiring each target back to it.
    pub fn new(
        content_root_url: String,
        name: String,
        version: String,
        targets: Vec<CleanTarget>,
        source: Option<String>,
        origin: PackageOrigin,
    ) -> Arc<Self> {
        Arc::new_cyclic(|package| Self {
            content_root_url,
            name,
            version,
            targets: targets
                .into_iter()
                .map(|t| Target::new(t.root_url, t.name, t.kind, package.clone()))
                .collect(),
            source,
            origin,
        })
    }

    pub fn content_root_url(&self) -> &str {
        &self.content_root_url
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub const fn origin(&self) -> PackageOrigin {
        self.origin
    }

    /// The library target, if the package has one.
    pub fn lib_target(&self) -> Option<&Target> {
        self.targets.iter().find(|t| t.is_lib())
    }

    /// Resolves the package root directory through `fs`.
    pub fn content_root(&self, fs: &dyn FileSystem) -> Option<Arc<dyn FileHandle>> {
        fs.find_file_by_url(&self.content_root_url)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} v{}", self.name, self.version)
        }
    }
}
