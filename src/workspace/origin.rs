//! Package provenance relative to the workspace.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a package comes from, ordered from most to least trusted.
///
/// The derived `Ord` follows declaration order, so `min` picks the more
/// trusted of two classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageOrigin {
    /// A workspace member (local crate)
    Workspace,
    /// A direct dependency of some workspace member
    Dependency,
    /// A synthetic standard library crate (std, core, alloc, etc.)
    #[serde(rename = "stdlib")]
    StdLib,
    /// Reachable only through other dependencies
    #[serde(rename = "transitive")]
    TransitiveDependency,
}

impl PackageOrigin {
    /// All origins, most trusted first.
    pub const ALL: [Self; 4] = [
        Self::Workspace,
        Self::Dependency,
        Self::StdLib,
        Self::TransitiveDependency,
    ];

    /// Keeps the more trusted of two classifications.
    pub fn merge(self, other: Self) -> Self {
        self.min(other)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Workspace => "workspace",
            Self::Dependency => "dependency",
            Self::StdLib => "stdlib",
            Self::TransitiveDependency => "transitive",
        }
    }
}

impl fmt::Display for PackageOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageOrigin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|origin| origin.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown origin '{}', expected one of: workspace, dependency, stdlib, transitive",
                    s
                )
            })
    }
}
