//! Postgres-backed implementations of the collaborator seams.
//!
//! Thin adapters from the [`crate::stores`] traits onto the `fixline-db`
//! repositories. Each holds a pool clone; `sqlx` errors cross the seam
//! boxed as [`StoreError`].

use async_trait::async_trait;
use fixline_core::types::DbId;
use fixline_db::models::complaint::{Complaint, CreateComplaint};
use fixline_db::models::notification::{NewNotification, Notification};
use fixline_db::models::remark::{CreateRemark, Remark, RemarkKind, UpdateRemark};
use fixline_db::models::staff::Technician;
use fixline_db::repositories::{
    combined_remark_count, AdminRemarkRepo, ComplaintRepo, ForwardHistoryRepo, NotificationRepo,
    StaffRepo, TechnicianRemarkRepo,
};
use fixline_db::DbPool;

use crate::stores::{
    ComplaintStore, ForwardHistoryStore, NotificationStore, RemarkStore, StaffDirectory,
    StoreError,
};

/// Page size for the notification listing seam.
const LIST_LIMIT: i64 = 100;

pub struct PgComplaintStore {
    pool: DbPool,
}

impl PgComplaintStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComplaintStore for PgComplaintStore {
    async fn insert(
        &self,
        user_id: DbId,
        report_number: &str,
        input: &CreateComplaint,
    ) -> Result<Complaint, StoreError> {
        Ok(ComplaintRepo::create(&self.pool, user_id, report_number, input).await?)
    }

    async fn find(&self, id: DbId) -> Result<Option<Complaint>, StoreError> {
        Ok(ComplaintRepo::find_by_id(&self.pool, id).await?)
    }

    async fn set_status(&self, id: DbId, status: &str) -> Result<Complaint, StoreError> {
        Ok(ComplaintRepo::update_status(&self.pool, id, status).await?)
    }

    async fn assign(
        &self,
        id: DbId,
        technician_id: DbId,
        status: &str,
    ) -> Result<Complaint, StoreError> {
        Ok(ComplaintRepo::assign(&self.pool, id, technician_id, status).await?)
    }
}

pub struct PgRemarkStore {
    pool: DbPool,
}

impl PgRemarkStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RemarkStore for PgRemarkStore {
    async fn insert(
        &self,
        kind: RemarkKind,
        complaint_id: DbId,
        author_id: DbId,
        input: &CreateRemark,
    ) -> Result<Option<Remark>, StoreError> {
        let inserted = match kind {
            RemarkKind::Admin => {
                AdminRemarkRepo::insert_below_cap(&self.pool, complaint_id, author_id, input)
                    .await?
            }
            RemarkKind::Technician => {
                TechnicianRemarkRepo::insert_below_cap(&self.pool, complaint_id, author_id, input)
                    .await?
            }
        };
        Ok(inserted)
    }

    async fn count_for(&self, complaint_id: DbId) -> Result<i64, StoreError> {
        Ok(combined_remark_count(&self.pool, complaint_id).await?)
    }

    async fn find_technician_remark(&self, id: DbId) -> Result<Option<Remark>, StoreError> {
        Ok(TechnicianRemarkRepo::find_by_id(&self.pool, id).await?)
    }

    async fn update_technician_remark(
        &self,
        id: DbId,
        input: &UpdateRemark,
    ) -> Result<Remark, StoreError> {
        Ok(TechnicianRemarkRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_technician_remark(&self, id: DbId) -> Result<(), StoreError> {
        Ok(TechnicianRemarkRepo::delete(&self.pool, id).await?)
    }
}

pub struct PgForwardHistory {
    pool: DbPool,
}

impl PgForwardHistory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ForwardHistoryStore for PgForwardHistory {
    async fn append(
        &self,
        complaint_id: DbId,
        forward_from: DbId,
        forward_to: DbId,
    ) -> Result<(), StoreError> {
        ForwardHistoryRepo::append(&self.pool, complaint_id, forward_from, forward_to).await?;
        Ok(())
    }
}

pub struct PgNotificationStore {
    pool: DbPool,
}

impl PgNotificationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for PgNotificationStore {
    async fn create(&self, record: &NewNotification) -> Result<DbId, StoreError> {
        Ok(NotificationRepo::create(&self.pool, record).await?)
    }

    async fn list(&self, recipient_id: DbId) -> Result<Vec<Notification>, StoreError> {
        Ok(
            NotificationRepo::list_for_recipient(&self.pool, recipient_id, false, LIST_LIMIT, 0)
                .await?,
        )
    }

    async fn mark_read(
        &self,
        notification_id: DbId,
        recipient_id: DbId,
    ) -> Result<bool, StoreError> {
        Ok(NotificationRepo::mark_read(&self.pool, notification_id, recipient_id).await?)
    }

    async fn mark_all_read(&self, recipient_id: DbId) -> Result<u64, StoreError> {
        Ok(NotificationRepo::mark_all_read(&self.pool, recipient_id).await?)
    }
}

pub struct PgStaffDirectory {
    pool: DbPool,
}

impl PgStaffDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffDirectory for PgStaffDirectory {
    async fn find_active_technician(&self, id: DbId) -> Result<Option<Technician>, StoreError> {
        Ok(StaffRepo::find_active_technician(&self.pool, id).await?)
    }

    async fn list_active_admins(&self) -> Result<Vec<DbId>, StoreError> {
        Ok(StaffRepo::list_active_admin_ids(&self.pool).await?)
    }

    async fn pick_notification_target(&self) -> Result<Option<DbId>, StoreError> {
        Ok(StaffRepo::first_active_admin(&self.pool).await?)
    }
}
