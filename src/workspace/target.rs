//! Compilation targets and their crate root files.

use super::package::Package;
use crate::vfs::{FileHandle, FileSystem};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, Weak};
use tracing::debug;

/// Kind of a compilation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Lib,
    Bin,
    Test,
    Example,
    Bench,
    #[serde(other)]
    Unknown,
}

impl TargetKind {
    /// Maps one of cargo's target kind strings.
    ///
    /// Every library flavour (`rlib`, `cdylib`, `proc-macro`, ...) is a `Lib`.
    pub fn from_cargo_kind(kind: &str) -> Self {
        match kind {
            "lib" | "rlib" | "dylib" | "cdylib" | "staticlib" | "proc-macro" => Self::Lib,
            "bin" => Self::Bin,
            "test" => Self::Test,
            "example" => Self::Example,
            "bench" => Self::Bench,
            _ => Self::Unknown,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lib => "lib",
            Self::Bin => "bin",
            Self::Test => "test",
            Self::Example => "example",
            Self::Bench => "bench",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single compilation unit of a [`Package`].
#[derive(Debug)]
pub struct Target {
    /// Absolute URL of the crate root file
    crate_root_url: String,
    name: String,
    kind: TargetKind,
    /// `name` with `-` mapped to `_`, usable as a Rust identifier
    norm_name: String,
    /// Owning package, set once when the package is built
    package: Weak<Package>,
    crate_root_cache: RwLock<Option<Arc<dyn FileHandle>>>,
}

impl Target {
    pub(crate) fn new(
        crate_root_url: String,
        name: String,
        kind: TargetKind,
        package: Weak<Package>,
    ) -> Self {
        let norm_name = normalize_name(&name);
        Self {
            crate_root_url,
            name,
            kind,
            norm_name,
            package,
            crate_root_cache: RwLock::new(None),
        }
    }

    pub fn crate_root_url(&self) -> &str {
        &self.crate_root_url
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn norm_name(&self) -> &str {
        &self.norm_name
    }

    pub const fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn is_lib(&self) -> bool {
        self.kind == TargetKind::Lib
    }

    pub fn is_bin(&self) -> bool {
        self.kind == TargetKind::Bin
    }

    pub fn is_test(&self) -> bool {
        self.kind == TargetKind::Test
    }

    pub fn is_example(&self) -> bool {
        self.kind == TargetKind::Example
    }

    pub fn is_bench(&self) -> bool {
        self.kind == TargetKind::Bench
    }

    /// The package this target belongs to.
    pub fn package(&self) -> Arc<Package> {
        // Targets are only reachable through their package's Arc.
        self.package
            .upgrade()
            .expect("target must not outlive its package")
    }

    /// Resolves the crate root file, reusing the last handle while it stays valid.
    pub fn crate_root(&self, fs: &dyn FileSystem) -> Option<Arc<dyn FileHandle>> {
        let cached = self
            .crate_root_cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(cached) = cached
            && cached.is_valid()
        {
            return Some(cached);
        }

        debug!("Resolving crate root for {} at {}", self.name, self.crate_root_url);
        let file = fs.find_file_by_url(&self.crate_root_url);
        *self
            .crate_root_cache
            .write()
            .unwrap_or_else(PoisonError::into_inner) = file.clone();
        file
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) {}", self.name, self.kind, self.crate_root_url)
    }
}

/// Maps a cargo target name to the identifier rustc uses for it.
pub fn normalize_name(name: &str) -> String {
    name.replace('-', "_")
}
