//! Remark entity model and DTOs.
//!
//! Admin and technician remarks share one shape and live in two physical
//! tables; [`RemarkKind`] names which table a remark belongs to.

use fixline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Which remark table a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemarkKind {
    Admin,
    Technician,
}

impl RemarkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemarkKind::Admin => "admin",
            RemarkKind::Technician => "technician",
        }
    }
}

/// A row from the `admin_remarks` or `technician_remarks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Remark {
    pub id: DbId,
    pub complaint_id: DbId,
    pub author_id: DbId,
    pub note_transport: Option<String>,
    pub checking: Option<String>,
    pub remark: Option<String>,
    /// Optional status applied to the parent complaint by the same call.
    pub status: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for submitting a remark.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRemark {
    pub note_transport: Option<String>,
    pub checking: Option<String>,
    pub remark: Option<String>,
    pub status: Option<String>,
}

/// DTO for patching a technician remark. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRemark {
    pub note_transport: Option<String>,
    pub checking: Option<String>,
    pub remark: Option<String>,
    pub status: Option<String>,
}
