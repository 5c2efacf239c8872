//! Complaint field constants and validation functions.
//!
//! Used by the workflow before any write. The warranty-document check is
//! soft: an under-warranty complaint without both file refs is accepted and
//! only logged by the caller.

use crate::error::CoreError;

/// Maximum length for a complaint's free-text details.
pub const MAX_DETAILS_LENGTH: usize = 2_000;

/// The product is still covered by the manufacturer warranty.
pub const TYPE_UNDER_WARRANTY: &str = "under_warranty";

/// Warranty has lapsed; repair is billable.
pub const TYPE_OVER_WARRANTY: &str = "over_warranty";

/// All valid complaint type values.
pub const VALID_COMPLAINT_TYPES: &[&str] = &[TYPE_UNDER_WARRANTY, TYPE_OVER_WARRANTY];

/// Validate that a complaint type string is one of the accepted values.
pub fn validate_complaint_type(complaint_type: &str) -> Result<(), CoreError> {
    if VALID_COMPLAINT_TYPES.contains(&complaint_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid complaint type '{complaint_type}'. Must be one of: {}",
            VALID_COMPLAINT_TYPES.join(", ")
        )))
    }
}

/// Validate complaint details: non-empty and within the length cap.
pub fn validate_details(details: &str) -> Result<(), CoreError> {
    if details.trim().is_empty() {
        return Err(CoreError::Validation(
            "Complaint details must not be empty".to_string(),
        ));
    }
    if details.len() > MAX_DETAILS_LENGTH {
        return Err(CoreError::Validation(format!(
            "Complaint details exceed maximum length of {MAX_DETAILS_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Soft check that an under-warranty complaint carries both document refs.
///
/// Returns `true` when the complaint type does not require documents, or
/// when both refs are present. A `false` result is a warning condition, not
/// an error: the original intake form tolerates the omission.
pub fn warranty_documents_complete(
    complaint_type: &str,
    warranty_file_ref: &Option<String>,
    receipt_file_ref: &Option<String>,
) -> bool {
    if complaint_type != TYPE_UNDER_WARRANTY {
        return true;
    }
    let has_warranty = warranty_file_ref.as_ref().is_some_and(|r| !r.trim().is_empty());
    let has_receipt = receipt_file_ref.as_ref().is_some_and(|r| !r.trim().is_empty());
    has_warranty && has_receipt
}
