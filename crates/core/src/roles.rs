//! Well-known role name constants and the resolved actor type.
//!
//! Authentication is out of scope for this core; callers arrive with their
//! role already resolved into a [`Role`] value.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TECHNICIAN: &str = "technician";

/// The party performing (or receiving the result of) an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    Technician,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Admin => ROLE_ADMIN,
            Role::Technician => ROLE_TECHNICIAN,
        }
    }

    /// Parse a stored role name. Unknown names return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            ROLE_USER => Some(Role::User),
            ROLE_ADMIN => Some(Role::Admin),
            ROLE_TECHNICIAN => Some(Role::Technician),
            _ => None,
        }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Technician)
    }
}

/// An authenticated caller, with the role check already resolved upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: DbId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: DbId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn user(id: DbId) -> Self {
        Self::new(id, Role::User)
    }

    pub fn admin(id: DbId) -> Self {
        Self::new(id, Role::Admin)
    }

    pub fn technician(id: DbId) -> Self {
        Self::new(id, Role::Technician)
    }
}
