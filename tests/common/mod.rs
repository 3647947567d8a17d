//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - [`MetadataBuilder`]: assembles `CleanCargoMetadata` by hand, one package
//!   per call, so origin classification can be tested without running cargo.
//! - [`TempWorkspace`]: a temp directory with real files, for crate-root
//!   lookups that go through the file system.

use cargo_workspace_mcp::vfs::path_to_url;
use cargo_workspace_mcp::workspace::{
    CargoWorkspace, CleanCargoMetadata, CleanPackage, CleanTarget, DependencyNode, TargetKind,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(dead_code)]
pub const CRATES_IO: &str = "registry+https://github.com/rust-lang/crates.io-index";

/// Returns the project root directory (where Cargo.toml lives).
#[allow(dead_code)]
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Builder for flat metadata.
///
/// Packages get a single lib target named after the package unless
/// [`MetadataBuilder::with_targets`] is used.
#[allow(dead_code)] // Methods used across different integration test crates
#[derive(Debug, Default)]
pub struct MetadataBuilder {
    metadata: CleanCargoMetadata,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl MetadataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a workspace member.
    pub fn member(self, name: &str) -> Self {
        self.push(name, true, None, vec![lib_target(name)])
    }

    /// Adds a registry package that is not a workspace member.
    pub fn package(self, name: &str) -> Self {
        self.push(name, false, Some(CRATES_IO), vec![lib_target(name)])
    }

    /// Adds a package with explicit targets.
    pub fn with_targets(self, name: &str, member: bool, targets: Vec<CleanTarget>) -> Self {
        let source = if member { None } else { Some(CRATES_IO) };
        self.push(name, member, source, targets)
    }

    /// Records the dependency positions of the package at `index`.
    pub fn deps(mut self, index: usize, dependencies: &[usize]) -> Self {
        let nodes = &mut self.metadata.dependencies;
        if nodes.len() <= index {
            nodes.resize(index + 1, DependencyNode::default());
        }
        nodes[index].dependencies_indexes = dependencies.to_vec();
        self
    }

    pub fn build(self) -> CleanCargoMetadata {
        self.metadata
    }

    /// Builds the workspace, panicking on a contract violation.
    pub fn workspace(self) -> CargoWorkspace {
        CargoWorkspace::deserialize(self.build()).expect("metadata must be consistent")
    }

    fn push(
        mut self,
        name: &str,
        member: bool,
        source: Option<&str>,
        targets: Vec<CleanTarget>,
    ) -> Self {
        self.metadata.packages.push(CleanPackage {
            root_url: format!("file:///ws/{}", name),
            name: name.to_string(),
            version: "1.0.0".to_string(),
            source: source.map(str::to_string),
            is_workspace_member: member,
            targets,
        });
        self
    }
}

#[allow(dead_code)]
/// A lib target rooted at `file:///ws/<name>/src/lib.rs`.
pub fn lib_target(name: &str) -> CleanTarget {
    target(name, TargetKind::Lib, &format!("file:///ws/{}/src/lib.rs", name))
}

#[allow(dead_code)]
pub fn target(name: &str, kind: TargetKind, root_url: &str) -> CleanTarget {
    CleanTarget {
        root_url: root_url.to_string(),
        name: name.to_string(),
        kind,
    }
}

/// A temporary workspace directory for test isolation.
///
/// The root is canonicalized up front so that the platform temp directory
/// (a symlink on macOS) does not leak into URLs; tests that need a
/// symlinked registration create the link inside the workspace.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp directory");
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a file with the given content within this workspace.
    ///
    /// Parent directories are created automatically if they don't exist.
    pub fn create_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
        full_path
    }

    /// URL of a path inside this workspace.
    pub fn url(&self, path: &str) -> String {
        path_to_url(&self.root.join(path)).expect("temp paths are absolute")
    }

    /// A target whose crate root is `path` inside this workspace.
    pub fn target(&self, name: &str, kind: TargetKind, path: &str) -> CleanTarget {
        target(name, kind, &self.url(path))
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
