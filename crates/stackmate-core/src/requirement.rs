use crate::capability::{CapabilityTag, ExpectedUsers};

/// Ordered, deduplicated capability set for one invocation. Scale hints
/// fold into the tag set at construction; an empty set floors at
/// `general-web`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementSet {
    tags: Vec<CapabilityTag>,
    expected_users: ExpectedUsers,
    multi_tenant: bool,
}

impl RequirementSet {
    pub fn new(
        tags: impl IntoIterator<Item = CapabilityTag>,
        expected_users: ExpectedUsers,
        multi_tenant: bool,
    ) -> Self {
        let mut deduped: Vec<CapabilityTag> = Vec::new();
        for tag in tags {
            if !deduped.contains(&tag) {
                deduped.push(tag);
            }
        }
        if expected_users == ExpectedUsers::Large && !deduped.contains(&CapabilityTag::HighTraffic)
        {
            deduped.push(CapabilityTag::HighTraffic);
        }
        if multi_tenant && !deduped.contains(&CapabilityTag::MultiTenant) {
            deduped.push(CapabilityTag::MultiTenant);
        }
        if deduped.is_empty() {
            deduped.push(CapabilityTag::GeneralWeb);
        }
        Self {
            tags: deduped,
            expected_users,
            multi_tenant,
        }
    }

    /// The fixed offline fallback used when no description is available or
    /// extraction degrades.
    pub fn default_web() -> Self {
        Self::new([CapabilityTag::GeneralWeb], ExpectedUsers::Small, false)
    }

    pub fn tags(&self) -> &[CapabilityTag] {
        &self.tags
    }

    pub fn expected_users(&self) -> ExpectedUsers {
        self.expected_users
    }

    pub fn multi_tenant(&self) -> bool {
        self.multi_tenant
    }

    /// How many requested tags the given `satisfies` list covers.
    pub fn satisfied_by(&self, satisfies: &[CapabilityTag]) -> usize {
        self.tags.iter().filter(|tag| satisfies.contains(tag)).count()
    }
}
