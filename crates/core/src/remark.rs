//! Remark constants and validation.
//!
//! The remark cap is a hard business rule with no override path: a
//! complaint carries at most three remarks, counted across the admin and
//! technician kinds combined.

use crate::error::CoreError;

/// Maximum number of remarks per complaint, admin and technician combined.
pub const MAX_REMARKS_PER_COMPLAINT: i64 = 3;

/// Validate that a remark submission carries at least one populated field.
///
/// A remark may describe transport arrangements, a checking result, free
/// text, or a status to apply to the parent complaint; an entirely empty
/// submission does nothing and is rejected.
pub fn validate_remark_content(
    note_transport: &Option<String>,
    checking: &Option<String>,
    remark: &Option<String>,
    status: &Option<String>,
) -> Result<(), CoreError> {
    let filled = |field: &Option<String>| field.as_ref().is_some_and(|v| !v.trim().is_empty());

    if filled(note_transport) || filled(checking) || filled(remark) || filled(status) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "A remark must carry a transport note, a checking note, remark text, or a status"
                .to_string(),
        ))
    }
}
