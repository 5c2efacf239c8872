//! Repositories for the `admin_remarks` and `technician_remarks` tables.
//!
//! Both tables share one shape; the two repos delegate to private helpers
//! parameterized by table name. The remark cap is enforced inside
//! `insert_below_cap`: the combined-count check and the insert are a single
//! statement, so concurrent submissions cannot both pass a stale count.

use fixline_core::remark::MAX_REMARKS_PER_COMPLAINT;
use fixline_core::types::DbId;
use sqlx::PgPool;

use crate::models::remark::{CreateRemark, Remark, UpdateRemark};

/// Column list for remark queries, identical for both tables.
const COLUMNS: &str = "id, complaint_id, author_id, note_transport, checking, remark, \
    status, created_at";

const ADMIN_TABLE: &str = "admin_remarks";
const TECH_TABLE: &str = "technician_remarks";

/// Total remarks recorded against a complaint, both kinds combined.
pub async fn combined_remark_count(
    pool: &PgPool,
    complaint_id: DbId,
) -> Result<i64, sqlx::Error> {
    let count: Option<i64> = sqlx::query_scalar(
        "SELECT (SELECT COUNT(*) FROM admin_remarks WHERE complaint_id = $1)
              + (SELECT COUNT(*) FROM technician_remarks WHERE complaint_id = $1)",
    )
    .bind(complaint_id)
    .fetch_one(pool)
    .await?;
    Ok(count.unwrap_or(0))
}

/// Insert a remark only while the combined count is below the cap.
///
/// Returns `None` when the cap is already reached; nothing is written.
async fn insert_below_cap(
    pool: &PgPool,
    table: &str,
    complaint_id: DbId,
    author_id: DbId,
    input: &CreateRemark,
) -> Result<Option<Remark>, sqlx::Error> {
    let query = format!(
        "INSERT INTO {table}
            (complaint_id, author_id, note_transport, checking, remark, status)
         SELECT $1, $2, $3, $4, $5, $6
         WHERE ((SELECT COUNT(*) FROM admin_remarks WHERE complaint_id = $1)
              + (SELECT COUNT(*) FROM technician_remarks WHERE complaint_id = $1)) < $7
         RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, Remark>(&query)
        .bind(complaint_id)
        .bind(author_id)
        .bind(&input.note_transport)
        .bind(&input.checking)
        .bind(&input.remark)
        .bind(&input.status)
        .bind(MAX_REMARKS_PER_COMPLAINT)
        .fetch_optional(pool)
        .await
}

async fn find_by_id(pool: &PgPool, table: &str, id: DbId) -> Result<Option<Remark>, sqlx::Error> {
    let query = format!("SELECT {COLUMNS} FROM {table} WHERE id = $1");
    sqlx::query_as::<_, Remark>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await
}

async fn list_for_complaint(
    pool: &PgPool,
    table: &str,
    complaint_id: DbId,
) -> Result<Vec<Remark>, sqlx::Error> {
    let query = format!(
        "SELECT {COLUMNS} FROM {table}
         WHERE complaint_id = $1
         ORDER BY created_at ASC"
    );
    sqlx::query_as::<_, Remark>(&query)
        .bind(complaint_id)
        .fetch_all(pool)
        .await
}

async fn update(
    pool: &PgPool,
    table: &str,
    id: DbId,
    input: &UpdateRemark,
) -> Result<Remark, sqlx::Error> {
    let query = format!(
        "UPDATE {table} SET
            note_transport = COALESCE($1, note_transport),
            checking = COALESCE($2, checking),
            remark = COALESCE($3, remark),
            status = COALESCE($4, status)
         WHERE id = $5
         RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, Remark>(&query)
        .bind(&input.note_transport)
        .bind(&input.checking)
        .bind(&input.remark)
        .bind(&input.status)
        .bind(id)
        .fetch_one(pool)
        .await
}

async fn delete(pool: &PgPool, table: &str, id: DbId) -> Result<(), sqlx::Error> {
    sqlx::query(&format!("DELETE FROM {table} WHERE id = $1"))
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

async fn count_for_complaint(
    pool: &PgPool,
    table: &str,
    complaint_id: DbId,
) -> Result<i64, sqlx::Error> {
    let count: Option<i64> =
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table} WHERE complaint_id = $1"))
            .bind(complaint_id)
            .fetch_one(pool)
            .await?;
    Ok(count.unwrap_or(0))
}

/// Provides CRUD operations for admin remarks.
pub struct AdminRemarkRepo;

impl AdminRemarkRepo {
    pub async fn insert_below_cap(
        pool: &PgPool,
        complaint_id: DbId,
        author_id: DbId,
        input: &CreateRemark,
    ) -> Result<Option<Remark>, sqlx::Error> {
        insert_below_cap(pool, ADMIN_TABLE, complaint_id, author_id, input).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Remark>, sqlx::Error> {
        find_by_id(pool, ADMIN_TABLE, id).await
    }

    pub async fn list_for_complaint(
        pool: &PgPool,
        complaint_id: DbId,
    ) -> Result<Vec<Remark>, sqlx::Error> {
        list_for_complaint(pool, ADMIN_TABLE, complaint_id).await
    }

    pub async fn count_for_complaint(
        pool: &PgPool,
        complaint_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        count_for_complaint(pool, ADMIN_TABLE, complaint_id).await
    }
}

/// Provides CRUD operations for technician remarks.
pub struct TechnicianRemarkRepo;

impl TechnicianRemarkRepo {
    pub async fn insert_below_cap(
        pool: &PgPool,
        complaint_id: DbId,
        author_id: DbId,
        input: &CreateRemark,
    ) -> Result<Option<Remark>, sqlx::Error> {
        insert_below_cap(pool, TECH_TABLE, complaint_id, author_id, input).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Remark>, sqlx::Error> {
        find_by_id(pool, TECH_TABLE, id).await
    }

    pub async fn list_for_complaint(
        pool: &PgPool,
        complaint_id: DbId,
    ) -> Result<Vec<Remark>, sqlx::Error> {
        list_for_complaint(pool, TECH_TABLE, complaint_id).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRemark,
    ) -> Result<Remark, sqlx::Error> {
        update(pool, TECH_TABLE, id, input).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        delete(pool, TECH_TABLE, id).await
    }

    pub async fn count_for_complaint(
        pool: &PgPool,
        complaint_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        count_for_complaint(pool, TECH_TABLE, complaint_id).await
    }
}
