use std::collections::BTreeMap;

use serde::Deserialize;

use crate::entry::{CatalogEntry, EntryId};
use crate::error::CatalogError;
use crate::role::Role;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    entries: Vec<CatalogEntry>,
}

/// Read-only registry of stack components, validated once at load. Entry
/// order within a role is the fixed preference order.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_id: BTreeMap<EntryId, usize>,
}

impl Catalog {
    pub fn from_toml_str(input: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(input)
            .map_err(|err| CatalogError::Integrity(format!("catalog failed to parse: {err}")))?;
        Self::from_entries(file.entries)
    }

    pub fn from_entries(mut entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut by_id = BTreeMap::new();
        for (index, entry) in entries.iter().enumerate() {
            if by_id.insert(entry.id.clone(), index).is_some() {
                return Err(CatalogError::Integrity(format!(
                    "duplicate catalog entry '{}'",
                    entry.id
                )));
            }
        }

        for entry in &mut entries {
            entry.releases.sort();
        }

        for entry in &entries {
            let window = entry.window();
            if window.is_empty() {
                return Err(CatalogError::Integrity(format!(
                    "entry '{}' declares an empty version range",
                    entry.id
                )));
            }
            if entry.conflicts.contains(&entry.id) {
                return Err(CatalogError::Integrity(format!(
                    "entry '{}' conflicts with itself",
                    entry.id
                )));
            }
            for conflict in &entry.conflicts {
                if !by_id.contains_key(conflict) {
                    return Err(CatalogError::Integrity(format!(
                        "entry '{}' conflicts with unknown entry '{conflict}'",
                        entry.id
                    )));
                }
            }
            for edge in &entry.requires {
                let Some(&target) = by_id.get(&edge.entry) else {
                    return Err(CatalogError::Integrity(format!(
                        "entry '{}' constrains unknown entry '{}'",
                        entry.id, edge.entry
                    )));
                };
                if entries[target].role == entry.role {
                    return Err(CatalogError::Integrity(format!(
                        "entry '{}' constrains same-role entry '{}'",
                        entry.id, edge.entry
                    )));
                }
                if edge.window().is_empty() {
                    return Err(CatalogError::Integrity(format!(
                        "entry '{}' declares an empty constraint window for '{}'",
                        entry.id, edge.entry
                    )));
                }
            }
            if let Some(stray) = entry.releases.iter().find(|release| !window.contains(release)) {
                return Err(CatalogError::Integrity(format!(
                    "entry '{}' lists release {stray} outside its declared range",
                    entry.id
                )));
            }
            if entry.releases.is_empty() {
                return Err(CatalogError::Integrity(format!(
                    "entry '{}' has no release inside its declared range",
                    entry.id
                )));
            }
        }

        Ok(Self { entries, by_id })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entries_for_role(&self, role: Role) -> Vec<&CatalogEntry> {
        self.entries.iter().filter(|entry| entry.role == role).collect()
    }

    pub fn get(&self, id: &EntryId) -> Option<&CatalogEntry> {
        self.by_id.get(id).map(|&index| &self.entries[index])
    }
}

/// Symmetric conflict check: either side declaring the other is enough.
pub fn entries_conflict(left: &CatalogEntry, right: &CatalogEntry) -> bool {
    left.conflicts.contains(&right.id) || right.conflicts.contains(&left.id)
}
