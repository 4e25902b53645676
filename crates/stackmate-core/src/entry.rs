use std::fmt;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::capability::CapabilityTag;
use crate::role::Role;
use crate::version::VersionWindow;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Directional compatibility rule: if the declaring entry is chosen and
/// `entry` is also chosen, the chosen version of `entry` must fall in the
/// window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintEdge {
    pub entry: EntryId,
    pub min: Version,
    #[serde(default)]
    pub max: Option<Version>,
}

impl ConstraintEdge {
    pub fn window(&self) -> VersionWindow {
        VersionWindow::new(self.min.clone(), self.max.clone())
    }
}

/// Companion package shipped alongside an entry at a fixed version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedPackage {
    pub name: String,
    pub version: Version,
    #[serde(default)]
    pub dev: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: EntryId,
    pub role: Role,
    /// Dependency name emitted into the manifest; may differ from `id`.
    pub package: String,
    #[serde(default)]
    pub satisfies: Vec<CapabilityTag>,
    pub min: Version,
    #[serde(default)]
    pub max: Option<Version>,
    /// Known published versions, kept sorted ascending once loaded.
    pub releases: Vec<Version>,
    #[serde(default)]
    pub requires: Vec<ConstraintEdge>,
    #[serde(default)]
    pub conflicts: Vec<EntryId>,
    #[serde(default)]
    pub extras: Vec<PinnedPackage>,
    #[serde(default)]
    pub dev: bool,
    #[serde(default)]
    pub env: Vec<String>,
}

impl CatalogEntry {
    pub fn window(&self) -> VersionWindow {
        VersionWindow::new(self.min.clone(), self.max.clone())
    }
}
