use thiserror::Error;

use crate::entry::EntryId;
use crate::role::Role;
use crate::version::VersionWindow;

/// Requirement extraction failures. Only this family is recoverable: callers
/// fall back to the default stack with a warning.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no model credential is configured (set GEMINI_API_KEY)")]
    MissingCredential,
    #[error("model call timed out")]
    Timeout,
    #[error("model transport failed: {0}")]
    Transport(String),
    #[error("model response could not be parsed: {0}")]
    Malformed(String),
}

/// Corrupt static registry. Fatal at startup, never recoverable.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog integrity violation: {0}")]
    Integrity(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no conflict-free candidate can fill role '{role}'")]
    Unsatisfiable { role: Role },
    #[error(
        "version conflict between '{entry_a}' ({window_a}) and '{entry_b}' ({window_b})"
    )]
    VersionConflict {
        entry_a: EntryId,
        entry_b: EntryId,
        window_a: VersionWindow,
        window_b: VersionWindow,
    },
    #[error("override names unknown catalog entry '{id}'")]
    UnknownOverride { id: EntryId },
    #[error("override '{id}' fills role '{actual}', not '{expected}'")]
    OverrideRoleMismatch {
        id: EntryId,
        expected: Role,
        actual: Role,
    },
}
