use serde::{Deserialize, Serialize};

/// Fixed vocabulary of project capabilities. The kebab-case string forms are
/// the wire vocabulary shared by the model response and catalog files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityTag {
    GeneralWeb,
    Auth,
    Blog,
    Cms,
    Api,
    Payments,
    Realtime,
    Analytics,
    Email,
    Search,
    Ecommerce,
    I18n,
    Seo,
    HighTraffic,
    MultiTenant,
}

impl CapabilityTag {
    pub const ALL: [CapabilityTag; 15] = [
        CapabilityTag::GeneralWeb,
        CapabilityTag::Auth,
        CapabilityTag::Blog,
        CapabilityTag::Cms,
        CapabilityTag::Api,
        CapabilityTag::Payments,
        CapabilityTag::Realtime,
        CapabilityTag::Analytics,
        CapabilityTag::Email,
        CapabilityTag::Search,
        CapabilityTag::Ecommerce,
        CapabilityTag::I18n,
        CapabilityTag::Seo,
        CapabilityTag::HighTraffic,
        CapabilityTag::MultiTenant,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tag| tag.as_str() == raw)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CapabilityTag::GeneralWeb => "general-web",
            CapabilityTag::Auth => "auth",
            CapabilityTag::Blog => "blog",
            CapabilityTag::Cms => "cms",
            CapabilityTag::Api => "api",
            CapabilityTag::Payments => "payments",
            CapabilityTag::Realtime => "realtime",
            CapabilityTag::Analytics => "analytics",
            CapabilityTag::Email => "email",
            CapabilityTag::Search => "search",
            CapabilityTag::Ecommerce => "ecommerce",
            CapabilityTag::I18n => "i18n",
            CapabilityTag::Seo => "seo",
            CapabilityTag::HighTraffic => "high-traffic",
            CapabilityTag::MultiTenant => "multi-tenant",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedUsers {
    #[default]
    Small,
    Medium,
    Large,
}

impl ExpectedUsers {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "small" => Some(ExpectedUsers::Small),
            "medium" => Some(ExpectedUsers::Medium),
            "large" => Some(ExpectedUsers::Large),
            _ => None,
        }
    }
}
