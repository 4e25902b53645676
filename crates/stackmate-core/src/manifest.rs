use semver::Version;
use serde::Serialize;

use crate::entry::EntryId;
use crate::role::Role;
use crate::stack::ResolvedStack;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackFlag {
    pub role: Role,
    pub entry: EntryId,
    pub version: String,
}

/// Flattened artifact handed to the scaffolding collaborator. Keys are
/// grouped by role in the fixed role order and alphabetical within a role,
/// independent of resolution order; set-equal stacks serialize
/// byte-identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub dependencies: Vec<ManifestEntry>,
    pub dev_dependencies: Vec<ManifestEntry>,
    pub env: Vec<String>,
    pub stack: Vec<StackFlag>,
}

impl Manifest {
    pub fn build(stack: &ResolvedStack) -> Self {
        let mut dependencies: Vec<ManifestEntry> = Vec::new();
        let mut dev_dependencies: Vec<ManifestEntry> = Vec::new();
        let mut env: Vec<String> = Vec::new();
        let mut flags: Vec<StackFlag> = Vec::new();

        for role in Role::ORDER {
            let Some((entry, version)) = stack.get(role) else {
                continue;
            };

            let mut group: Vec<(String, String, bool)> = Vec::new();
            group.push((entry.package.clone(), caret(version), entry.dev));
            for extra in &entry.extras {
                group.push((
                    extra.name.clone(),
                    caret(&extra.version),
                    entry.dev || extra.dev,
                ));
            }
            group.sort_by(|a, b| a.0.cmp(&b.0));

            for (name, pinned, dev) in group {
                let target = if dev {
                    &mut dev_dependencies
                } else {
                    &mut dependencies
                };
                if target.iter().any(|existing| existing.name == name) {
                    continue;
                }
                target.push(ManifestEntry {
                    name,
                    version: pinned,
                });
            }

            env.extend(entry.env.iter().cloned());
            flags.push(StackFlag {
                role,
                entry: entry.id.clone(),
                version: version.to_string(),
            });
        }

        env.sort();
        env.dedup();

        Self {
            dependencies,
            dev_dependencies,
            env,
            stack: flags,
        }
    }
}

fn caret(version: &Version) -> String {
    format!("^{version}")
}
