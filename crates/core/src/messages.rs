//! Well-known notification type tags, translation keys, and param names.
//!
//! Type tags are stored in the `notifications.notification_type` column;
//! translation keys travel inside structured payload envelopes and must
//! match the render-side catalog. The title of a message keyed `K` is
//! cataloged under `K_title`.

// ---------------------------------------------------------------------------
// Notification type tags
// ---------------------------------------------------------------------------

/// A lifecycle status change (creation, direct status edit, cancellation).
pub const TYPE_STATUS_UPDATE: &str = "status_update";

/// A status change carried by a remark submission.
pub const TYPE_STATUS_UPDATE_DETAILED: &str = "status_update_detailed";

/// A complaint was forwarded to a technician.
pub const TYPE_ASSIGNMENT: &str = "assignment";

/// A remark's transport note changed.
pub const TYPE_TRANSPORT_UPDATE: &str = "transport_update";

/// A remark's checking note changed.
pub const TYPE_CHECKING_UPDATE: &str = "checking_update";

/// A remark's free text changed, or a technician's job was touched by an admin.
pub const TYPE_REMARK_UPDATE: &str = "remark_update";

// ---------------------------------------------------------------------------
// Translation keys
// ---------------------------------------------------------------------------

/// To every admin when a complaint is filed.
pub const KEY_NEW_COMPLAINT: &str = "new_complaint_msg";

/// To the owner confirming their complaint was filed.
pub const KEY_USER_COMPLAINT_CREATED: &str = "user_complaint_created_msg";

/// To the technician a complaint was forwarded to.
pub const KEY_PROCESSING_TECH: &str = "notif_processing_tech";

/// To the owner when their complaint enters processing.
pub const KEY_PROCESSING_USER: &str = "notif_processing_user";

/// Admin wording for a complaint moving to `in_process`.
pub const KEY_ADMIN_STATUS_IN_PROCESS: &str = "admin_status_in_process_msg";

/// Admin wording for a complaint being closed.
pub const KEY_ADMIN_STATUS_CLOSED: &str = "admin_status_closed_msg";

/// Admin wording for any other status value.
pub const KEY_ADMIN_STATUS_UPDATED: &str = "admin_status_update_msg";

/// Owner wording for a complaint moving to `in_process`.
pub const KEY_USER_STATUS_IN_PROCESS: &str = "user_status_in_process_msg";

/// Owner wording for a closed complaint (ready-for-pickup framing).
pub const KEY_USER_STATUS_CLOSED: &str = "user_status_closed_msg";

/// Owner wording for any other status value.
pub const KEY_USER_STATUS_UPDATED: &str = "user_status_update_msg";

/// Transport-note update, admin audience.
pub const KEY_ADMIN_TRANSPORT_UPDATE: &str = "admin_transport_update_msg";

/// Transport-note update, owner audience.
pub const KEY_USER_TRANSPORT_UPDATE: &str = "user_transport_update_msg";

/// Checking-note update, admin audience.
pub const KEY_ADMIN_CHECKING_UPDATE: &str = "admin_checking_update_msg";

/// Checking-note update, owner audience.
pub const KEY_USER_CHECKING_UPDATE: &str = "user_checking_update_msg";

/// Remark-text update, admin audience.
pub const KEY_ADMIN_REMARK_UPDATE: &str = "admin_remark_update_msg";

/// Remark-text update, owner audience.
pub const KEY_USER_REMARK_UPDATE: &str = "user_remark_update_msg";

/// To the assigned technician when an admin leaves a remark on their job.
pub const KEY_TECH_JOB_TOUCHED: &str = "tech_remark_by_admin_msg";

/// Cancellation confirmation to the owner.
pub const KEY_USER_CANCELLED: &str = "user_complaint_cancelled_msg";

/// Cancellation notice to the picked admin.
pub const KEY_ADMIN_CANCELLED: &str = "admin_complaint_cancelled_msg";

// ---------------------------------------------------------------------------
// Param names and title keys
// ---------------------------------------------------------------------------

pub const PARAM_REPORT_NUMBER: &str = "report_number";
pub const PARAM_TECHNICIAN: &str = "technician";
pub const PARAM_STATUS: &str = "status";
pub const PARAM_DATE: &str = "date";
pub const PARAM_TIME: &str = "time";

/// Suffix distinguishing a title catalog entry from its message entry.
pub const TITLE_SUFFIX: &str = "_title";

/// The catalog key holding the title text for a message key.
pub fn title_key(message_key: &str) -> String {
    format!("{message_key}{TITLE_SUFFIX}")
}
