//! Account lookup-table models.

use fixline_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `technicians` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Technician {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub is_active: bool,
}

/// A row from the `admins` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminAccount {
    pub id: DbId,
    pub name: String,
    pub is_active: bool,
}

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserAccount {
    pub id: DbId,
    pub name: String,
}
