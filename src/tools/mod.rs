pub mod find_crate;
pub mod find_crate_root;
pub mod list_packages;
pub mod set_workspace;

pub use find_crate::*;
pub use find_crate_root::*;
pub use list_packages::*;
pub use set_workspace::*;

use crate::vfs::url_to_path;
use crate::workspace::Target;
use std::fmt::Write as _;

/// Multi-line summary of a target and the package that owns it.
pub(crate) fn describe_target(target: &Target) -> String {
    let package = target.package();
    let mut output = format!("Crate `{}` ({})\n", target.norm_name(), target.kind());

    let _ = writeln!(output, "  Package: {} [{}]", package, package.origin());
    let _ = writeln!(output, "  Source: {}", package.source().unwrap_or("local"));

    let crate_root = url_to_path(target.crate_root_url())
        .map_or_else(|| target.crate_root_url().to_string(), |p| p.display().to_string());
    let _ = writeln!(output, "  Crate root: {}", crate_root);
    output
}
