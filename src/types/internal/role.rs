/// Closed set of application roles.
///
/// Roles are persisted as strings; anything that fails to parse back into
/// this enum is treated as an unknown role and rejected by the ownership
/// rules, so a corrupted role value can never silently grant access.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    StandardUser,
    Executive,
    Authority,
}

impl Role {
    pub const STANDARD_USER: &'static str = "StandardUser";
    pub const EXECUTIVE: &'static str = "Executive";
    pub const AUTHORITY: &'static str = "Authority";

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::StandardUser => Self::STANDARD_USER,
            Role::Executive => Self::EXECUTIVE,
            Role::Authority => Self::AUTHORITY,
        }
    }

    /// Parse a stored role string. Returns `None` for unknown values.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            Self::STANDARD_USER => Some(Role::StandardUser),
            Self::EXECUTIVE => Some(Role::Executive),
            Self::AUTHORITY => Some(Role::Authority),
            _ => None,
        }
    }

    /// Executives and Authorities bypass the per-list ownership predicates.
    pub fn has_full_list_access(&self) -> bool {
        matches!(self, Role::Executive | Role::Authority)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
