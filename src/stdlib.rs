//! Standard library source discovery.
//!
//! The standard library is not part of `cargo metadata` output. Its sources
//! ship with the `rust-src` rustup component under the toolchain sysroot;
//! each crate found there becomes a [`StdCrate`] that
//! [`CargoWorkspace::with_stdlib`](crate::workspace::CargoWorkspace::with_stdlib)
//! turns into an ordinary package.

use crate::error::Result;
use crate::vfs::path_to_url;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Standard library crates exposed when `rust-src` is installed.
pub const STDLIB_CRATES: &[&str] = &["std", "core", "alloc", "proc_macro", "test"];

/// A standard library crate to be merged into a workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StdCrate {
    pub package_root_url: String,
    pub name: String,
    pub crate_root_url: String,
}

/// Located standard library sources of one toolchain.
#[derive(Debug, Clone)]
pub struct StandardLibraryRoots {
    crates: Vec<StdCrate>,
}

impl StandardLibraryRoots {
    /// Finds the library sources of the active toolchain.
    ///
    /// Uses `$RUSTC` when set, `rustc` from `PATH` otherwise.
    pub fn discover() -> Result<Self> {
        let rustc = std::env::var_os("RUSTC").unwrap_or_else(|| "rustc".into());
        let output = Command::new(&rustc)
            .args(["--print", "sysroot"])
            .output()
            .context("Failed to run rustc --print sysroot")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("rustc --print sysroot failed: {}", stderr.trim());
        }

        let sysroot = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        let library_dir = library_dir_in_sysroot(&sysroot).with_context(|| {
            format!(
                "rust-src component not found under {}. Install with: rustup component add rust-src",
                sysroot.display()
            )
        })?;

        let roots = Self::from_library_dir(&library_dir);
        tracing::info!(
            "Discovered {} stdlib crates at {}",
            roots.crates.len(),
            library_dir.display()
        );
        Ok(roots)
    }

    /// Collects the known crates present under `library_dir`.
    ///
    /// Both the current layout (`library/std/src/lib.rs`) and the pre-1.47
    /// layout (`src/libstd/lib.rs`) are recognised.
    pub fn from_library_dir(library_dir: &Path) -> Self {
        let crates = STDLIB_CRATES
            .iter()
            .filter_map(|name| find_crate(library_dir, name))
            .collect();

        Self { crates }
    }

    pub fn crates(&self) -> &[StdCrate] {
        &self.crates
    }
}

fn library_dir_in_sysroot(sysroot: &Path) -> Option<PathBuf> {
    let rust = sysroot.join("lib/rustlib/src/rust");
    [rust.join("library"), rust.join("src")]
        .into_iter()
        .find(|dir| dir.is_dir())
}

fn find_crate(library_dir: &Path, name: &str) -> Option<StdCrate> {
    let candidates = [
        library_dir.join(name),
        library_dir.join(format!("lib{}", name)),
    ];

    candidates.into_iter().find_map(|package_root| {
        let crate_root = [package_root.join("src/lib.rs"), package_root.join("lib.rs")]
            .into_iter()
            .find(|file| file.is_file())?;
        Some(StdCrate {
            package_root_url: path_to_url(&package_root)?,
            name: name.to_string(),
            crate_root_url: path_to_url(&crate_root)?,
        })
    })
}
