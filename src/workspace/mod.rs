//! Cargo workspace model: metadata ingestion, packages, targets, and origins.

pub mod detection;
pub mod metadata;
pub mod model;
pub mod origin;
pub mod package;
pub mod target;

pub use detection::{find_cargo_toml, find_workspace_root, has_workspace_section};
pub use metadata::{
    CleanCargoMetadata, CleanPackage, CleanTarget, DependencyNode, fetch_clean_metadata,
    load_cargo_metadata, validate_crate_name,
};
pub use model::CargoWorkspace;
pub use origin::PackageOrigin;
pub use package::Package;
pub use target::{Target, TargetKind, normalize_name};
