use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// All variants are local and synchronous: they are returned to the
/// immediate caller of a workflow operation and are never retried by this
/// core. Notification-dispatch failures are deliberately absent: those are
/// logged and swallowed by the dispatcher, never surfaced here.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid status transition from '{from}' to '{to}'")]
    InvalidTransition { from: String, to: String },

    #[error("Remark limit reached for complaint {complaint_id}")]
    RemarkLimitReached { complaint_id: DbId },

    #[error("Invalid assignee: {id} is not an active technician")]
    InvalidAssignee { id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),
}
