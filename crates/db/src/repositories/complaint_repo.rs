//! Repository for the `complaints` table.

use fixline_core::status::STATUS_PENDING;
use fixline_core::types::DbId;
use sqlx::PgPool;

use crate::models::complaint::{Complaint, ComplaintListParams, CreateComplaint};

/// Column list for `complaints` queries.
const COLUMNS: &str = "id, report_number, category_id, subcategory, complaint_type, \
    brand_name, model_no, state, details, warranty_file_ref, receipt_file_ref, \
    status, assigned_to, user_id, created_at, updated_at";

/// Default page size for complaint listing.
const DEFAULT_LIMIT: i64 = 50;

/// Provides CRUD operations for complaints.
pub struct ComplaintRepo;

impl ComplaintRepo {
    /// Insert a new complaint in `pending` status, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        report_number: &str,
        input: &CreateComplaint,
    ) -> Result<Complaint, sqlx::Error> {
        let query = format!(
            "INSERT INTO complaints
                (report_number, category_id, subcategory, complaint_type, brand_name,
                 model_no, state, details, warranty_file_ref, receipt_file_ref,
                 status, user_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(report_number)
            .bind(input.category_id)
            .bind(&input.subcategory)
            .bind(&input.complaint_type)
            .bind(&input.brand_name)
            .bind(&input.model_no)
            .bind(&input.state)
            .bind(&input.details)
            .bind(&input.warranty_file_ref)
            .bind(&input.receipt_file_ref)
            .bind(STATUS_PENDING)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a complaint by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complaints WHERE id = $1");
        sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List complaints with optional status/owner/assignee filters, newest first.
    pub async fn list(
        pool: &PgPool,
        params: &ComplaintListParams,
    ) -> Result<Vec<Complaint>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
        let offset = params.offset.unwrap_or(0);
        let query = format!(
            "SELECT {COLUMNS} FROM complaints
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::bigint IS NULL OR user_id = $2)
               AND ($3::bigint IS NULL OR assigned_to = $3)
             ORDER BY created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(&params.status)
            .bind(params.user_id)
            .bind(params.assigned_to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List all complaints filed by a user, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Complaint>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM complaints
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List all complaints assigned to a technician, newest first.
    pub async fn list_for_assignee(
        pool: &PgPool,
        technician_id: DbId,
    ) -> Result<Vec<Complaint>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM complaints
             WHERE assigned_to = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(technician_id)
            .fetch_all(pool)
            .await
    }

    /// Set a complaint's status, returning the updated row.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Complaint, sqlx::Error> {
        let query = format!(
            "UPDATE complaints SET status = $1, updated_at = NOW()
             WHERE id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(status)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Assign a complaint to a technician and set its status in one statement.
    pub async fn assign(
        pool: &PgPool,
        id: DbId,
        technician_id: DbId,
        status: &str,
    ) -> Result<Complaint, sqlx::Error> {
        let query = format!(
            "UPDATE complaints SET assigned_to = $1, status = $2, updated_at = NOW()
             WHERE id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Complaint>(&query)
            .bind(technician_id)
            .bind(status)
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
