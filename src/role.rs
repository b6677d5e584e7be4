//! Closed role enumeration and the role → capability predicates.
//!
//! DESIGN
//! ======
//! The backend transports roles as strings, and uses two spellings for the
//! same role depending on the endpoint (`ADMIN` from login, `ROLE_ADMIN` from
//! the profile). Parsing is lenient: anything unrecognized maps to
//! [`Role::Unknown`], which carries no capabilities. Predicates are strict
//! equality checks with no inheritance between admin tiers.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// Role attribute of an authenticated principal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    /// Regular customer account.
    #[default]
    User,
    /// Business admin.
    Admin,
    /// Enterprise/system admin.
    EnterpriseAdmin,
    /// Unrecognized wire value; carries no capabilities.
    Unknown,
}

impl Role {
    /// Parse a wire role string, accepting both endpoint spellings.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "ROLE_USER" | "USER" => Self::User,
            "ROLE_ADMIN" | "ADMIN" => Self::Admin,
            "ROLE_ENTERPRISE_ADMIN" | "ENTERPRISE_ADMIN" => Self::EnterpriseAdmin,
            _ => Self::Unknown,
        }
    }

    /// Canonical wire spelling (the profile-endpoint form).
    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::User => "ROLE_USER",
            Self::Admin => "ROLE_ADMIN",
            Self::EnterpriseAdmin => "ROLE_ENTERPRISE_ADMIN",
            Self::Unknown => "ROLE_UNKNOWN",
        }
    }

    /// True for either admin tier.
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin | Self::EnterpriseAdmin)
    }

    /// True only for the business-admin tier.
    #[must_use]
    pub fn is_basic_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// True only for the enterprise/system-admin tier.
    #[must_use]
    pub fn is_enterprise_admin(self) -> bool {
        matches!(self, Self::EnterpriseAdmin)
    }
}

/// Admin check over an optional role. An absent role is never admin, so
/// anonymous sessions fail closed without a special case at each call site.
#[must_use]
pub fn is_admin_role(role: Option<Role>) -> bool {
    role.is_some_and(Role::is_admin)
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&value))
    }
}

#[cfg(test)]
#[path = "role_test.rs"]
mod tests;
