//! Cargo workspace model: which target owns a source file, and where each
//! package comes from relative to the workspace.

pub mod error;
pub mod server;
pub mod state;
pub mod stdlib;
pub mod tools;
pub mod tracing;
pub mod vfs;
pub mod workspace;

pub use error::{Result, WorkspaceError};
pub use state::{WorkspaceSnapshot, WorkspaceState};
pub use stdlib::{StandardLibraryRoots, StdCrate};
pub use vfs::{FileHandle, FileSystem, LocalFile, LocalFileSystem};
pub use workspace::{CargoWorkspace, Package, PackageOrigin, Target, TargetKind};
