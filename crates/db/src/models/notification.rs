//! Notification entity model and DTOs.

use fixline_core::roles::Role;
use fixline_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table.
///
/// Immutable after creation except for `is_read`, which only flips
/// false→true. `title` and `message` are hybrid-encoded; decode them with
/// `fixline_core::payload::decode`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub recipient_id: DbId,
    pub recipient_role: String,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    /// The complaint this notification refers to, or 0 when unlinked.
    pub reference_id: DbId,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// A notification record to be persisted.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient_id: DbId,
    pub recipient_role: Role,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub reference_id: DbId,
}
