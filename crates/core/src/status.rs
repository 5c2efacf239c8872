//! Complaint status vocabulary and transition guards.
//!
//! The lifecycle is `pending -> in_process -> closed`, with `cancelled`
//! reachable only from `pending`. `closed` and `cancelled` are terminal:
//! no operation moves a complaint out of either.

use crate::error::CoreError;

/// Complaint has been filed and awaits assignment.
pub const STATUS_PENDING: &str = "pending";

/// Complaint is assigned and being worked on.
pub const STATUS_IN_PROCESS: &str = "in_process";

/// Work is finished; the item is ready for pickup.
pub const STATUS_CLOSED: &str = "closed";

/// Complaint was withdrawn by its owner before any work started.
pub const STATUS_CANCELLED: &str = "cancelled";

/// All valid complaint status values.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_IN_PROCESS,
    STATUS_CLOSED,
    STATUS_CANCELLED,
];

/// Validate that a status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Whether a status admits no further transitions.
pub fn is_terminal(status: &str) -> bool {
    status == STATUS_CLOSED || status == STATUS_CANCELLED
}

/// Guard a status change: the target must be a known status and the current
/// status must not be terminal.
pub fn ensure_transition(from: &str, to: &str) -> Result<(), CoreError> {
    validate_status(to)?;
    if is_terminal(from) {
        return Err(CoreError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        });
    }
    Ok(())
}
