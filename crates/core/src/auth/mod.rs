//! Roles and password hashing.

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Staff roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Everything, including user management.
    SuperAdmin,
    /// Manages rules and data.
    Admin,
    /// Read-only access to records and reports.
    FinancialAuditor,
    /// Enters sales and collection data.
    DataEntry,
}

impl UserRole {
    /// All roles, most privileged first.
    pub const ALL: [Self; 4] = [
        Self::SuperAdmin,
        Self::Admin,
        Self::FinancialAuditor,
        Self::DataEntry,
    ];

    /// Returns true if this role can create, edit or delete commission rules.
    #[must_use]
    pub const fn can_manage_rules(&self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin)
    }

    /// Returns true if this role can write representatives, companies, sales and collections.
    #[must_use]
    pub const fn can_enter_data(&self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin | Self::DataEntry)
    }

    /// Returns true if this role can read commission reports.
    #[must_use]
    pub const fn can_view_reports(&self) -> bool {
        true
    }

    /// Returns true if this role can manage user accounts.
    #[must_use]
    pub const fn can_manage_users(&self) -> bool {
        matches!(self, Self::SuperAdmin)
    }

    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::FinancialAuditor => "financial_auditor",
            Self::DataEntry => "data_entry",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
