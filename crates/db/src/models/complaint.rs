//! Complaint entity model and DTOs.

use fixline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `complaints` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Complaint {
    pub id: DbId,
    /// Human-facing report number, unique and never reused.
    pub report_number: String,
    pub category_id: DbId,
    pub subcategory: String,
    pub complaint_type: String,
    pub brand_name: String,
    pub model_no: Option<String>,
    pub state: String,
    pub details: String,
    pub warranty_file_ref: Option<String>,
    pub receipt_file_ref: Option<String>,
    pub status: String,
    pub assigned_to: Option<DbId>,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a new complaint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComplaint {
    pub category_id: DbId,
    pub subcategory: String,
    pub complaint_type: String,
    pub brand_name: String,
    pub model_no: Option<String>,
    pub state: String,
    #[validate(length(
        min = 1,
        max = 2000,
        message = "details must be between 1 and 2000 characters"
    ))]
    pub details: String,
    pub warranty_file_ref: Option<String>,
    pub receipt_file_ref: Option<String>,
}

/// Query parameters for listing complaints.
#[derive(Debug, Default, Deserialize)]
pub struct ComplaintListParams {
    pub status: Option<String>,
    pub user_id: Option<DbId>,
    pub assigned_to: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
