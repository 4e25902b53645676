use std::cmp::Reverse;
use std::collections::BTreeMap;

use stackmate_core::{
    entries_conflict, Catalog, CatalogEntry, EntryId, RequirementSet, ResolveError, Role,
    StackSelection,
};

/// Fill every role with one conflict-free catalog entry. Candidates are
/// ranked by how many requested capabilities they satisfy, with catalog
/// preference order as the tie-break; the search is ordered backtracking
/// over role slots with an explicit rewind. Overridden roles bypass ranking
/// but still participate in conflict checks.
pub fn recommend(
    catalog: &Catalog,
    requirements: &RequirementSet,
    overrides: &BTreeMap<Role, EntryId>,
) -> Result<StackSelection, ResolveError> {
    let mut pinned: BTreeMap<Role, &CatalogEntry> = BTreeMap::new();
    for (role, id) in overrides {
        let entry = catalog
            .get(id)
            .ok_or_else(|| ResolveError::UnknownOverride { id: id.clone() })?;
        if entry.role != *role {
            return Err(ResolveError::OverrideRoleMismatch {
                id: id.clone(),
                expected: *role,
                actual: entry.role,
            });
        }
        pinned.insert(*role, entry);
    }

    let pins: Vec<&CatalogEntry> = pinned.values().copied().collect();
    for (index, left) in pins.iter().enumerate() {
        for right in pins.iter().skip(index + 1) {
            if entries_conflict(left, right) {
                return Err(ResolveError::Unsatisfiable {
                    role: left.role.max(right.role),
                });
            }
        }
    }

    let mut open_roles: Vec<Role> = Vec::new();
    let mut candidates: Vec<Vec<&CatalogEntry>> = Vec::new();
    for role in Role::ORDER {
        if pinned.contains_key(&role) {
            continue;
        }
        let mut ranked = catalog.entries_for_role(role);
        if ranked.is_empty() {
            return Err(ResolveError::Unsatisfiable { role });
        }
        ranked.sort_by_key(|entry| Reverse(requirements.satisfied_by(&entry.satisfies)));
        open_roles.push(role);
        candidates.push(ranked);
    }

    let mut slots: Vec<Option<&CatalogEntry>> = vec![None; open_roles.len()];
    let mut cursors: Vec<usize> = vec![0; open_roles.len()];
    let mut depth = 0usize;
    let mut deepest_exhausted = 0usize;

    while depth < open_roles.len() {
        let mut placed = false;
        while cursors[depth] < candidates[depth].len() {
            let candidate = candidates[depth][cursors[depth]];
            cursors[depth] += 1;
            let clashes = pins.iter().any(|pin| entries_conflict(pin, candidate))
                || slots[..depth]
                    .iter()
                    .flatten()
                    .any(|chosen| entries_conflict(chosen, candidate));
            if !clashes {
                slots[depth] = Some(candidate);
                placed = true;
                break;
            }
        }
        if placed {
            depth += 1;
            continue;
        }

        deepest_exhausted = deepest_exhausted.max(depth);
        cursors[depth] = 0;
        slots[depth] = None;
        if depth == 0 {
            return Err(ResolveError::Unsatisfiable {
                role: open_roles[deepest_exhausted],
            });
        }
        depth -= 1;
        slots[depth] = None;
    }

    let mut selection = StackSelection::new();
    for entry in pins {
        selection.insert(entry.clone());
    }
    for slot in slots.into_iter().flatten() {
        selection.insert(slot.clone());
    }
    Ok(selection)
}
