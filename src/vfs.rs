//! File-system seam between the workspace model and the host.
//!
//! The model only stores stable identifiers (`file://` URLs). Turning one into
//! a live handle, checking that a handle still points at something, and
//! resolving symlinks are all delegated to a [`FileSystem`] implementation.
//! [`LocalFileSystem`] is the implementation backed by the real disk.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// A resolved file, as handed out by a [`FileSystem`].
pub trait FileHandle: fmt::Debug + Send + Sync {
    /// Stable identifier of this file.
    fn url(&self) -> &str;

    /// Whether the handle still refers to an existing file.
    fn is_valid(&self) -> bool;

    /// The symlink-free form of this file, or `None` if it cannot be resolved.
    fn canonical_file(&self) -> Option<Arc<dyn FileHandle>>;
}

/// Resolves stable identifiers into live file handles.
pub trait FileSystem: Send + Sync {
    /// Returns a handle for `url`, or `None` if nothing resolvable lives there.
    fn find_file_by_url(&self, url: &str) -> Option<Arc<dyn FileHandle>>;
}

/// Converts an absolute path into a `file://` URL string.
pub fn path_to_url(path: &Path) -> Option<String> {
    Url::from_file_path(path).ok().map(String::from)
}

/// Converts a `file://` URL string back into a path.
pub fn url_to_path(url: &str) -> Option<PathBuf> {
    Url::parse(url).ok()?.to_file_path().ok()
}

/// URL of the symlink-free form of the file at `url`.
///
/// Returns `None` if `url` is not a `file://` URL of an existing file.
pub fn canonical_url(url: &str) -> Option<String> {
    let file = LocalFileSystem.find_file_by_url(url)?.canonical_file()?;
    Some(file.url().to_string())
}

/// A file on the local disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    path: PathBuf,
    url: String,
}

impl LocalFile {
    /// Wraps an absolute path. Existence is not checked here.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let url = path_to_url(&path)?;
        Some(Self { path, url })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileHandle for LocalFile {
    fn url(&self) -> &str {
        &self.url
    }

    fn is_valid(&self) -> bool {
        self.path.exists()
    }

    fn canonical_file(&self) -> Option<Arc<dyn FileHandle>> {
        match std::fs::canonicalize(&self.path) {
            Ok(canonical) => Self::from_path(canonical).map(|f| Arc::new(f) as Arc<dyn FileHandle>),
            Err(e) => {
                debug!("Failed to canonicalize {}: {}", self.path.display(), e);
                None
            }
        }
    }
}

/// [`FileSystem`] over the real disk, accepting only `file://` URLs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn find_file_by_url(&self, url: &str) -> Option<Arc<dyn FileHandle>> {
        let path = url_to_path(url)?;
        if !path.exists() {
            return None;
        }
        let file = LocalFile::from_path(path)?;
        Some(Arc::new(file))
    }
}
