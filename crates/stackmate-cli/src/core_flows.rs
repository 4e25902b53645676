use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{anyhow, Result};
use stackmate_analyzer::{extract, CompletionClient};
use stackmate_core::{Catalog, EntryId, Manifest, RequirementSet, Role};
use stackmate_resolver::{recommend, resolve_versions};

#[derive(Debug)]
pub(crate) struct GeneratedManifest {
    pub manifest: Manifest,
    pub warnings: Vec<String>,
}

/// Full generation flow: extract requirements, recommend a stack, pin
/// versions, build the manifest. Extraction failures degrade to the default
/// stack with a warning; resolution failures surface verbatim.
pub(crate) fn generate_manifest(
    catalog: &Catalog,
    client: &dyn CompletionClient,
    description: Option<&str>,
    overrides: &BTreeMap<Role, EntryId>,
    timeout: Duration,
) -> Result<GeneratedManifest> {
    let mut warnings = Vec::new();

    let requirements = match description {
        Some(text) if !text.trim().is_empty() => match extract(text, client, timeout) {
            Ok(extraction) => {
                if extraction.dropped_tokens > 0 {
                    warnings.push(format!(
                        "dropped {} unrecognized capability token(s) from the analysis",
                        extraction.dropped_tokens
                    ));
                }
                extraction.requirements
            }
            Err(err) => {
                warnings.push(format!(
                    "requirement analysis degraded, falling back to the default stack: {err}"
                ));
                RequirementSet::default_web()
            }
        },
        _ => RequirementSet::default_web(),
    };

    let selection = recommend(catalog, &requirements, overrides)?;
    let stack = resolve_versions(&selection)?;
    Ok(GeneratedManifest {
        manifest: Manifest::build(&stack),
        warnings,
    })
}

pub(crate) const TEMPLATES: [(&str, &str); 4] = [
    ("modern-react", "Next.js + Tailwind + Prisma on PostgreSQL"),
    ("t3", "Full-stack Next.js with Prisma, NextAuth, and Vitest"),
    ("enterprise-react", "Enterprise React: Clerk, Drizzle, Chakra, Playwright"),
    ("jamstack-blog", "Content-first Astro blog on SQLite"),
];

pub(crate) fn template_overrides(name: &str) -> Option<BTreeMap<Role, EntryId>> {
    let pins: &[(Role, &str)] = match name {
        "modern-react" => &[
            (Role::Framework, "next"),
            (Role::Database, "postgresql"),
            (Role::Orm, "prisma"),
            (Role::Auth, "next-auth"),
            (Role::Styling, "tailwindcss"),
            (Role::Testing, "jest"),
            (Role::Deployment, "vercel"),
        ],
        "t3" => &[
            (Role::Framework, "next"),
            (Role::Database, "postgresql"),
            (Role::Orm, "prisma"),
            (Role::Auth, "next-auth"),
            (Role::Styling, "tailwindcss"),
            (Role::Testing, "vitest"),
            (Role::Deployment, "vercel"),
        ],
        "enterprise-react" => &[
            (Role::Framework, "next"),
            (Role::Database, "postgresql"),
            (Role::Orm, "drizzle"),
            (Role::Auth, "clerk"),
            (Role::Styling, "chakra"),
            (Role::Testing, "playwright"),
            (Role::Deployment, "pm2"),
        ],
        "jamstack-blog" => &[
            (Role::Framework, "astro"),
            (Role::Database, "sqlite"),
            (Role::Orm, "drizzle"),
            (Role::Auth, "lucia"),
            (Role::Styling, "tailwindcss"),
            (Role::Testing, "playwright"),
            (Role::Deployment, "netlify"),
        ],
        _ => return None,
    };
    Some(
        pins.iter()
            .map(|(role, id)| (*role, EntryId::from(*id)))
            .collect(),
    )
}

pub(crate) fn format_template_lines() -> Vec<String> {
    TEMPLATES
        .iter()
        .map(|(name, description)| format!("{name:<18} {description}"))
        .collect()
}

pub(crate) fn parse_pins(values: &[String]) -> Result<BTreeMap<Role, EntryId>> {
    let mut pins = BTreeMap::new();
    for value in values {
        let (role_raw, entry_raw) = value
            .split_once('=')
            .ok_or_else(|| anyhow!("invalid pin '{value}': expected role=entry"))?;
        let role = Role::parse(role_raw.trim())
            .ok_or_else(|| anyhow!("invalid pin '{value}': unknown role '{role_raw}'"))?;
        let entry = entry_raw.trim();
        if entry.is_empty() {
            return Err(anyhow!("invalid pin '{value}': entry must not be empty"));
        }
        if pins.insert(role, EntryId::from(entry)).is_some() {
            return Err(anyhow!("duplicate pin for role '{role}'"));
        }
    }
    Ok(pins)
}
