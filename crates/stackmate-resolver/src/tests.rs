use std::collections::BTreeMap;

use semver::Version;
use stackmate_core::{
    entries_conflict, CapabilityTag, Catalog, CatalogEntry, EntryId, ExpectedUsers, Manifest,
    RequirementSet, ResolveError, Role, StackSelection,
};

use super::*;

fn requirements(tags: &[CapabilityTag]) -> RequirementSet {
    RequirementSet::new(tags.iter().copied(), ExpectedUsers::Small, false)
}

fn entry(raw: &str) -> CatalogEntry {
    toml::from_str(raw).expect("entry must parse")
}

fn builtin() -> Catalog {
    stackmate_catalog::builtin().expect("built-in catalog must load")
}

#[test]
fn fills_every_role_with_default_preferences() {
    let catalog = builtin();
    let selection = recommend(&catalog, &RequirementSet::default_web(), &BTreeMap::new())
        .expect("default requirements must resolve");

    assert_eq!(selection.len(), Role::ORDER.len());
    let framework = selection.get(Role::Framework).expect("framework chosen");
    assert_eq!(framework.id, EntryId::from("next"));
    let auth = selection.get(Role::Auth).expect("auth chosen");
    assert_eq!(auth.id, EntryId::from("next-auth"));
}

#[test]
fn capability_ranking_steers_the_whole_stack() {
    let catalog = builtin();
    let selection = recommend(
        &catalog,
        &requirements(&[CapabilityTag::Realtime]),
        &BTreeMap::new(),
    )
    .expect("realtime requirements must resolve");

    let chosen: Vec<&str> = Role::ORDER
        .iter()
        .map(|role| selection.get(*role).expect("role chosen").id.as_str())
        .collect();
    assert_eq!(
        chosen,
        vec!["express", "mongodb", "mongoose", "passport", "tailwindcss", "jest", "pm2"]
    );
}

#[test]
fn multi_tenant_hint_prefers_clerk() {
    let catalog = builtin();
    let reqs = RequirementSet::new([CapabilityTag::Auth], ExpectedUsers::Small, true);
    let selection =
        recommend(&catalog, &reqs, &BTreeMap::new()).expect("multi-tenant requirements resolve");
    assert_eq!(
        selection.get(Role::Auth).expect("auth chosen").id,
        EntryId::from("clerk")
    );
}

#[test]
fn content_requirements_skip_conflicting_auth_candidates() {
    let catalog = builtin();
    let selection = recommend(
        &catalog,
        &requirements(&[CapabilityTag::Blog, CapabilityTag::Cms, CapabilityTag::Seo]),
        &BTreeMap::new(),
    )
    .expect("content requirements must resolve");

    assert_eq!(
        selection.get(Role::Framework).expect("framework chosen").id,
        EntryId::from("astro")
    );
    assert_eq!(
        selection.get(Role::Auth).expect("auth chosen").id,
        EntryId::from("lucia")
    );
}

#[test]
fn override_pins_role_and_reroutes_dependents() {
    let catalog = builtin();
    let mut overrides = BTreeMap::new();
    overrides.insert(Role::Framework, EntryId::from("astro"));

    let selection = recommend(&catalog, &RequirementSet::default_web(), &overrides)
        .expect("override must resolve");
    assert_eq!(
        selection.get(Role::Framework).expect("framework chosen").id,
        EntryId::from("astro")
    );
    assert_eq!(
        selection.get(Role::Auth).expect("auth chosen").id,
        EntryId::from("lucia")
    );
}

#[test]
fn override_with_unknown_entry_fails() {
    let catalog = builtin();
    let mut overrides = BTreeMap::new();
    overrides.insert(Role::Framework, EntryId::from("rails"));

    let err = recommend(&catalog, &RequirementSet::default_web(), &overrides)
        .expect_err("unknown override must fail");
    assert!(matches!(err, ResolveError::UnknownOverride { id } if id == EntryId::from("rails")));
}

#[test]
fn override_with_mismatched_role_fails() {
    let catalog = builtin();
    let mut overrides = BTreeMap::new();
    overrides.insert(Role::Database, EntryId::from("next"));

    let err = recommend(&catalog, &RequirementSet::default_web(), &overrides)
        .expect_err("mismatched override must fail");
    assert!(matches!(
        err,
        ResolveError::OverrideRoleMismatch { expected: Role::Database, actual: Role::Framework, .. }
    ));
}

#[test]
fn backtracks_to_a_compatible_framework() {
    let catalog = Catalog::from_toml_str(
        r#"
[[entries]]
id = "f1"
role = "framework"
package = "f1"
min = "1.0.0"
max = "2.0.0"
releases = ["1.0.0"]

[[entries]]
id = "f2"
role = "framework"
package = "f2"
min = "1.0.0"
max = "2.0.0"
releases = ["1.0.0"]

[[entries]]
id = "d1"
role = "database"
package = "d1"
min = "1.0.0"
max = "2.0.0"
releases = ["1.0.0"]
conflicts = ["f1"]

[[entries]]
id = "o1"
role = "orm"
package = "o1"
min = "1.0.0"
max = "2.0.0"
releases = ["1.0.0"]

[[entries]]
id = "a1"
role = "auth"
package = "a1"
min = "1.0.0"
max = "2.0.0"
releases = ["1.0.0"]

[[entries]]
id = "s1"
role = "styling"
package = "s1"
min = "1.0.0"
max = "2.0.0"
releases = ["1.0.0"]

[[entries]]
id = "t1"
role = "testing"
package = "t1"
min = "1.0.0"
max = "2.0.0"
releases = ["1.0.0"]

[[entries]]
id = "p1"
role = "deployment"
package = "p1"
min = "1.0.0"
max = "2.0.0"
releases = ["1.0.0"]
"#,
    )
    .expect("catalog must load");

    let selection = recommend(&catalog, &RequirementSet::default_web(), &BTreeMap::new())
        .expect("must backtrack to f2");
    assert_eq!(
        selection.get(Role::Framework).expect("framework chosen").id,
        EntryId::from("f2")
    );
}

#[test]
fn unsatisfiable_when_every_candidate_conflicts_names_the_role() {
    let catalog = Catalog::from_toml_str(
        r#"
[[entries]]
id = "f1"
role = "framework"
package = "f1"
min = "1.0.0"
max = "2.0.0"
releases = ["1.0.0"]

[[entries]]
id = "d1"
role = "database"
package = "d1"
min = "1.0.0"
max = "2.0.0"
releases = ["1.0.0"]

[[entries]]
id = "o1"
role = "orm"
package = "o1"
min = "1.0.0"
max = "2.0.0"
releases = ["1.0.0"]

[[entries]]
id = "a1"
role = "auth"
package = "a1"
satisfies = ["auth"]
min = "1.0.0"
max = "2.0.0"
releases = ["1.0.0"]
conflicts = ["f1"]

[[entries]]
id = "a2"
role = "auth"
package = "a2"
satisfies = ["auth"]
min = "1.0.0"
max = "2.0.0"
releases = ["1.0.0"]
conflicts = ["f1"]

[[entries]]
id = "s1"
role = "styling"
package = "s1"
min = "1.0.0"
max = "2.0.0"
releases = ["1.0.0"]

[[entries]]
id = "t1"
role = "testing"
package = "t1"
min = "1.0.0"
max = "2.0.0"
releases = ["1.0.0"]

[[entries]]
id = "p1"
role = "deployment"
package = "p1"
min = "1.0.0"
max = "2.0.0"
releases = ["1.0.0"]
"#,
    )
    .expect("catalog must load");

    let err = recommend(
        &catalog,
        &requirements(&[CapabilityTag::Auth]),
        &BTreeMap::new(),
    )
    .expect_err("conflicting auth candidates must fail");
    assert!(matches!(err, ResolveError::Unsatisfiable { role: Role::Auth }));
}

#[test]
fn picks_greatest_release_inside_intersected_window() {
    let framework = entry(
        r#"
id = "b"
role = "framework"
package = "b"
min = "1.0.0"
max = "4.0.0"
releases = ["1.0.0", "2.5.0", "3.5.0"]
"#,
    );
    let orm = entry(
        r#"
id = "a"
role = "orm"
package = "a"
min = "1.0.0"
max = "2.0.0"
releases = ["1.1.0"]

[[requires]]
entry = "b"
min = "2.0.0"
max = "3.0.0"
"#,
    );

    let mut selection = StackSelection::new();
    selection.insert(framework);
    selection.insert(orm);

    let stack = resolve_versions(&selection).expect("versions must resolve");
    let (_, framework_version) = stack.get(Role::Framework).expect("framework pinned");
    assert_eq!(framework_version.to_string(), "2.5.0");
    let (_, orm_version) = stack.get(Role::Orm).expect("orm pinned");
    assert_eq!(orm_version.to_string(), "1.1.0");
}

#[test]
fn version_conflict_names_both_entries_and_windows() {
    let framework = entry(
        r#"
id = "b"
role = "framework"
package = "b"
min = "1.0.0"
max = "2.9.0"
releases = ["1.0.0", "2.8.0"]
"#,
    );
    let orm = entry(
        r#"
id = "a"
role = "orm"
package = "a"
min = "1.0.0"
max = "2.0.0"
releases = ["1.1.0"]

[[requires]]
entry = "b"
min = "3.0.0"
"#,
    );

    let mut selection = StackSelection::new();
    selection.insert(framework);
    selection.insert(orm);

    let err = resolve_versions(&selection).expect_err("disjoint windows must fail");
    match err {
        ResolveError::VersionConflict {
            entry_a,
            entry_b,
            window_a,
            window_b,
        } => {
            assert_eq!(entry_a, EntryId::from("a"));
            assert_eq!(entry_b, EntryId::from("b"));
            assert_eq!(window_a.to_string(), ">=3.0.0");
            assert_eq!(window_b.to_string(), ">=1.0.0, <2.9.0");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn resolution_is_deterministic_down_to_manifest_bytes() {
    let catalog = builtin();
    let reqs = requirements(&[CapabilityTag::Auth, CapabilityTag::Blog]);

    let mut manifests = Vec::new();
    for _ in 0..2 {
        let selection =
            recommend(&catalog, &reqs, &BTreeMap::new()).expect("requirements must resolve");
        let stack = resolve_versions(&selection).expect("versions must resolve");
        let manifest = serde_json::to_string_pretty(&Manifest::build(&stack))
            .expect("manifest must serialize");
        manifests.push(manifest);
    }
    assert_eq!(manifests[0], manifests[1]);
}

#[test]
fn successful_stacks_uphold_conflict_and_window_invariants() {
    let catalog = builtin();
    let selection = recommend(
        &catalog,
        &requirements(&[CapabilityTag::Realtime]),
        &BTreeMap::new(),
    )
    .expect("realtime requirements must resolve");
    let stack = resolve_versions(&selection).expect("versions must resolve");

    assert_eq!(stack.len(), Role::ORDER.len());

    let chosen: Vec<(&CatalogEntry, &Version)> = stack.iter().collect();
    for (index, (left, _)) in chosen.iter().enumerate() {
        for (right, _) in chosen.iter().skip(index + 1) {
            assert!(
                !entries_conflict(left, right),
                "'{}' and '{}' must not conflict",
                left.id,
                right.id
            );
        }
    }

    for (source, _) in &chosen {
        for edge in &source.requires {
            let Some((_, target_version)) = chosen
                .iter()
                .find(|(candidate, _)| candidate.id == edge.entry)
            else {
                continue;
            };
            assert!(
                edge.window().contains(target_version),
                "'{}' must honor the window '{}' on '{}'",
                source.id,
                edge.window(),
                edge.entry
            );
        }
    }
}
