use semver::Version;

use stackmate_core::{
    CatalogEntry, EntryId, ResolveError, ResolvedStack, StackSelection, VersionWindow,
};

/// Pin a concrete version for every chosen entry: intersect its declared
/// range with every constraint window contributed by the other chosen
/// entries, tracking which entry governs each bound, then take the greatest
/// release inside the intersection.
pub fn resolve_versions(selection: &StackSelection) -> Result<ResolvedStack, ResolveError> {
    let chosen: Vec<&CatalogEntry> = selection.iter().collect();
    let mut resolved = ResolvedStack::new();

    for entry in &chosen {
        let mut min = entry.min.clone();
        let mut min_by: (&EntryId, VersionWindow) = (&entry.id, entry.window());
        let mut max = entry.max.clone();
        let mut max_by: (&EntryId, VersionWindow) = (&entry.id, entry.window());

        for other in &chosen {
            if other.id == entry.id {
                continue;
            }
            for edge in &other.requires {
                if edge.entry != entry.id {
                    continue;
                }
                if edge.min > min {
                    min = edge.min.clone();
                    min_by = (&other.id, edge.window());
                }
                if let Some(edge_max) = &edge.max {
                    let tighter = match &max {
                        Some(current) => edge_max < current,
                        None => true,
                    };
                    if tighter {
                        max = Some(edge_max.clone());
                        max_by = (&other.id, edge.window());
                    }
                }
            }
        }

        let window = VersionWindow::new(min, max);
        let version: Option<&Version> = if window.is_empty() {
            None
        } else {
            entry
                .releases
                .iter()
                .filter(|release| window.contains(release))
                .max()
        };

        let Some(version) = version else {
            return Err(ResolveError::VersionConflict {
                entry_a: min_by.0.clone(),
                entry_b: max_by.0.clone(),
                window_a: min_by.1,
                window_b: max_by.1,
            });
        };
        resolved.insert((*entry).clone(), version.clone());
    }

    Ok(resolved)
}
