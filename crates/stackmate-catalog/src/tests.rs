use stackmate_core::{EntryId, Role};

use super::*;

#[test]
fn builtin_catalog_passes_integrity_validation() {
    let catalog = builtin().expect("built-in catalog must load");
    assert!(catalog.entries().len() >= 20);
    for role in Role::ORDER {
        assert!(
            !catalog.entries_for_role(role).is_empty(),
            "role '{role}' must have at least one entry"
        );
    }
}

#[test]
fn builtin_catalog_prefers_next_for_frameworks() {
    let catalog = builtin().expect("built-in catalog must load");
    let frameworks = catalog.entries_for_role(Role::Framework);
    assert_eq!(frameworks[0].id, EntryId::from("next"));
}

#[test]
fn builtin_catalog_releases_are_sorted_ascending() {
    let catalog = builtin().expect("built-in catalog must load");
    for entry in catalog.entries() {
        let mut sorted = entry.releases.clone();
        sorted.sort();
        assert_eq!(entry.releases, sorted, "releases of '{}' must be sorted", entry.id);
    }
}

#[test]
fn builtin_catalog_carries_env_vars_for_data_stores() {
    let catalog = builtin().expect("built-in catalog must load");
    let postgres = catalog
        .get(&EntryId::from("postgresql"))
        .expect("postgresql entry must exist");
    assert_eq!(postgres.env, vec!["DATABASE_URL"]);
}

#[test]
fn load_path_reports_missing_file() {
    let err = load_path(std::path::Path::new("/nonexistent/catalog.toml"))
        .expect_err("missing file must fail");
    assert!(err.to_string().contains("failed to read catalog file"));
}
