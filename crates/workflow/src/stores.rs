//! Collaborator seams for the workflow engine.
//!
//! Every external dependency of the lifecycle logic (complaint rows,
//! remark rows, the forward audit trail, notification records, staff
//! lookups, wall-clock time, report-number generation) enters through one
//! of these traits, so tests substitute fixed in-memory collaborators and
//! production wires the Postgres implementations from [`crate::pg`].

use async_trait::async_trait;
use fixline_core::types::{DbId, Timestamp};
use fixline_db::models::complaint::{Complaint, CreateComplaint};
use fixline_db::models::notification::{NewNotification, Notification};
use fixline_db::models::remark::{CreateRemark, Remark, RemarkKind, UpdateRemark};
use fixline_db::models::staff::Technician;

/// Error type crossing a storage seam.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Complaint row access.
#[async_trait]
pub trait ComplaintStore: Send + Sync {
    /// Insert a new complaint in `pending` status.
    async fn insert(
        &self,
        user_id: DbId,
        report_number: &str,
        input: &CreateComplaint,
    ) -> Result<Complaint, StoreError>;

    async fn find(&self, id: DbId) -> Result<Option<Complaint>, StoreError>;

    async fn set_status(&self, id: DbId, status: &str) -> Result<Complaint, StoreError>;

    /// Set assignee and status in one write.
    async fn assign(
        &self,
        id: DbId,
        technician_id: DbId,
        status: &str,
    ) -> Result<Complaint, StoreError>;
}

/// Remark row access across both physical kinds.
///
/// Admin remarks are immutable once created, so only technician remarks
/// have lookup/update/delete entry points.
#[async_trait]
pub trait RemarkStore: Send + Sync {
    /// Insert a remark unless the combined cap is already reached.
    ///
    /// The cap decision and the insert must be atomic; `None` means the cap
    /// was reached and nothing was written.
    async fn insert(
        &self,
        kind: RemarkKind,
        complaint_id: DbId,
        author_id: DbId,
        input: &CreateRemark,
    ) -> Result<Option<Remark>, StoreError>;

    /// Total remarks against a complaint, both kinds combined.
    async fn count_for(&self, complaint_id: DbId) -> Result<i64, StoreError>;

    async fn find_technician_remark(&self, id: DbId) -> Result<Option<Remark>, StoreError>;

    async fn update_technician_remark(
        &self,
        id: DbId,
        input: &UpdateRemark,
    ) -> Result<Remark, StoreError>;

    async fn delete_technician_remark(&self, id: DbId) -> Result<(), StoreError>;
}

/// Append-only reassignment audit trail.
#[async_trait]
pub trait ForwardHistoryStore: Send + Sync {
    async fn append(
        &self,
        complaint_id: DbId,
        forward_from: DbId,
        forward_to: DbId,
    ) -> Result<(), StoreError>;
}

/// Per-recipient notification persistence.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn create(&self, record: &NewNotification) -> Result<DbId, StoreError>;

    async fn list(&self, recipient_id: DbId) -> Result<Vec<Notification>, StoreError>;

    /// Flip `is_read` false→true for one notification owned by `recipient_id`.
    async fn mark_read(&self, notification_id: DbId, recipient_id: DbId)
        -> Result<bool, StoreError>;

    async fn mark_all_read(&self, recipient_id: DbId) -> Result<u64, StoreError>;
}

/// Staff account lookups for assignment guards and fan-out targeting.
#[async_trait]
pub trait StaffDirectory: Send + Sync {
    /// Resolve a forward target. `None` means the id does not belong to an
    /// active technician and the forward must be rejected.
    async fn find_active_technician(&self, id: DbId) -> Result<Option<Technician>, StoreError>;

    /// The current admin broadcast roster.
    async fn list_active_admins(&self) -> Result<Vec<DbId>, StoreError>;

    /// One admin to receive single-recipient notices (cancellations).
    ///
    /// The choice is arbitrary by policy: the implementation picks whichever
    /// active admin it finds first.
    async fn pick_notification_target(&self) -> Result<Option<DbId>, StoreError>;
}

/// Wall-clock seam, injected so dispatched payload params are testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Production clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        chrono::Utc::now()
    }
}

/// Report-number source. Numbers are opaque, unique, and never reused.
pub trait ReportNumberGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// UUIDv4-derived report numbers, e.g. `RPT-3F9A60C21D`.
pub struct UuidReportNumbers;

impl ReportNumberGenerator for UuidReportNumbers {
    fn generate(&self) -> String {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        format!("RPT-{}", hex[..10].to_ascii_uppercase())
    }
}
