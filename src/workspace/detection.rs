//! Locating the cargo workspace a path belongs to.
//!
//! Detection walks up from a starting directory looking for `Cargo.toml`,
//! never leaving the enclosing Git repository and never treating system
//! directories as project roots. A manifest with a `[workspace]` table is
//! preferred over a plain package manifest.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Directories that never hold a project we should load.
const SYSTEM_DIRS: &[&str] = &[
    "/usr", "/etc", "/var", "/opt", "/srv", "/bin", "/sbin", "/lib", "/lib64", "/boot", "/dev",
    "/proc", "/sys", "/run",
];

/// Detect the workspace root for the process's current directory.
///
/// Returns the canonical workspace directory, or `None` if nothing suitable
/// was found.
pub async fn auto_detect_workspace() -> Option<PathBuf> {
    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            debug!("Failed to get current working directory: {}", e);
            return None;
        }
    };

    let manifest = find_cargo_toml(&cwd)?;
    let root = find_workspace_root(manifest.parent()?)?;

    match tokio::fs::canonicalize(&root).await {
        Ok(canonical) => {
            info!("Auto-detected workspace: {}", canonical.display());
            Some(canonical)
        }
        Err(e) => {
            warn!(
                "Found workspace at {} but canonicalization failed: {}",
                root.display(),
                e
            );
            None
        }
    }
}

/// Find the nearest `Cargo.toml` at or above `start`.
///
/// The walk stops at the Git repository root (if any), at system
/// directories, and at the filesystem root, whose own manifest is ignored.
pub fn find_cargo_toml(start: &Path) -> Option<PathBuf> {
    let git_root = find_git_root(start);

    for dir in start.ancestors() {
        if is_boundary_directory(dir) {
            debug!("Hit boundary directory: {}", dir.display());
            break;
        }

        let manifest = dir.join("Cargo.toml");
        if manifest.is_file() {
            debug!("Found Cargo.toml at: {}", manifest.display());
            return Some(manifest);
        }

        if git_root.as_deref() == Some(dir) {
            debug!("Reached Git repository root, stopping search");
            break;
        }
    }

    None
}

/// Directory containing the innermost `.git` entry (directory or submodule file).
pub fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Whether the walk must stop at `path`.
pub fn is_boundary_directory(path: &Path) -> bool {
    if path.parent().is_none() {
        return true;
    }

    let path_str = path.to_string_lossy();
    SYSTEM_DIRS.iter().any(|sys| {
        path_str == *sys
            || path_str
                .strip_prefix(sys)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Walk up from a package directory to the manifest declaring `[workspace]`.
///
/// Falls back to the first package manifest seen when no workspace manifest
/// exists above it.
pub fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    let mut first_package = None;

    for dir in start.ancestors() {
        if is_boundary_directory(dir) {
            break;
        }

        let manifest = dir.join("Cargo.toml");
        if !manifest.is_file() {
            continue;
        }

        match has_workspace_section(&manifest) {
            Some(true) => {
                debug!("Found [workspace] in {}", manifest.display());
                return Some(dir.to_path_buf());
            }
            Some(false) => {
                if first_package.is_none() {
                    first_package = Some(dir.to_path_buf());
                }
            }
            None => debug!("Failed to parse {}, skipping", manifest.display()),
        }
    }

    first_package
}

/// Check if a Cargo.toml file has a `[workspace]` section.
///
/// Returns `None` if the file cannot be read or parsed.
pub fn has_workspace_section(cargo_toml: &Path) -> Option<bool> {
    let content = std::fs::read_to_string(cargo_toml).ok()?;
    let toml: toml::Table = toml::from_str(&content).ok()?;
    Some(toml.contains_key("workspace"))
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    let Some(home) = dirs::home_dir() else {
        return Cow::Borrowed(path);
    };

    if path == "~" {
        Cow::Owned(home.display().to_string())
    } else if let Some(rest) = path.strip_prefix("~/") {
        Cow::Owned(home.join(rest).display().to_string())
    } else {
        Cow::Borrowed(path)
    }
}
