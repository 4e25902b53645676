use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use stackmate_core::Catalog;

const BUILTIN_CATALOG: &str = include_str!("builtin.toml");

/// The curated registry shipped with the binary, validated on every load.
pub fn builtin() -> Result<Catalog> {
    Catalog::from_toml_str(BUILTIN_CATALOG).context("built-in catalog failed integrity validation")
}

/// Load a replacement catalog from an external TOML file.
pub fn load_path(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;
    Catalog::from_toml_str(&content)
        .with_context(|| format!("failed to load catalog file: {}", path.display()))
}

#[cfg(test)]
mod tests;
