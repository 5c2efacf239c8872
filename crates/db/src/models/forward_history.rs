//! Forward-history entity model.

use fixline_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `forward_history` table. Append-only audit trail of
/// complaint reassignment; rows are never mutated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ForwardHistoryEntry {
    pub id: DbId,
    pub complaint_id: DbId,
    /// The previous assignee, or the admin who performed the first forward.
    pub forward_from: DbId,
    pub forward_to: DbId,
    pub created_at: Timestamp,
}
