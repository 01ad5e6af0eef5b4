//! Role hierarchy.
//!
//! Roles form a total order: every role carries all the permissions of
//! the roles below it. Authorization checks compare with `>=` against
//! a minimum role, never with string equality, so adding a role means
//! slotting it into the ordering here and nothing else.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// User role, ordered by privilege: `User < Admin < Root`.
///
/// The `Ord` derive relies on variant declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    Root,
}

impl Role {
    /// Canonical lowercase name as stored in the `users.role` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Root => "root",
        }
    }

    /// Whether this role carries at least the permissions of `required`.
    pub fn permits(&self, required: Role) -> bool {
        *self >= required
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "root" => Ok(Role::Root),
            other => Err(crate::error::CoreError::Validation(format!(
                "Unknown role: {other}"
            ))),
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}
