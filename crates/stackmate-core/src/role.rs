use std::fmt;

use serde::{Deserialize, Serialize};

/// Architectural slot filled by exactly one catalog entry per resolved stack.
/// Declaration order is the fixed resolution order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Framework,
    Database,
    Orm,
    Auth,
    Styling,
    Testing,
    Deployment,
}

impl Role {
    pub const ORDER: [Role; 7] = [
        Role::Framework,
        Role::Database,
        Role::Orm,
        Role::Auth,
        Role::Styling,
        Role::Testing,
        Role::Deployment,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ORDER.iter().copied().find(|role| role.as_str() == raw)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Framework => "framework",
            Role::Database => "database",
            Role::Orm => "orm",
            Role::Auth => "auth",
            Role::Styling => "styling",
            Role::Testing => "testing",
            Role::Deployment => "deployment",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
