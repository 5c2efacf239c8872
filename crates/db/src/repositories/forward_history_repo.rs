//! Repository for the `forward_history` table.

use fixline_core::types::DbId;
use sqlx::PgPool;

use crate::models::forward_history::ForwardHistoryEntry;

/// Column list for `forward_history` queries.
const COLUMNS: &str = "id, complaint_id, forward_from, forward_to, created_at";

/// Append-only access to the reassignment audit trail.
pub struct ForwardHistoryRepo;

impl ForwardHistoryRepo {
    /// Record a reassignment, returning the created row.
    pub async fn append(
        pool: &PgPool,
        complaint_id: DbId,
        forward_from: DbId,
        forward_to: DbId,
    ) -> Result<ForwardHistoryEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO forward_history (complaint_id, forward_from, forward_to)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ForwardHistoryEntry>(&query)
            .bind(complaint_id)
            .bind(forward_from)
            .bind(forward_to)
            .fetch_one(pool)
            .await
    }

    /// List a complaint's reassignment history, oldest first.
    pub async fn list_for_complaint(
        pool: &PgPool,
        complaint_id: DbId,
    ) -> Result<Vec<ForwardHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM forward_history
             WHERE complaint_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, ForwardHistoryEntry>(&query)
            .bind(complaint_id)
            .fetch_all(pool)
            .await
    }
}
