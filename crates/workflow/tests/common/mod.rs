//! In-memory collaborator fakes and fixtures for workflow tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::TimeZone;
use fixline_core::payload::{self, DecodedMessage};
use fixline_core::status::STATUS_PENDING;
use fixline_core::types::{DbId, Timestamp};
use fixline_db::models::complaint::{Complaint, CreateComplaint};
use fixline_db::models::notification::{NewNotification, Notification};
use fixline_db::models::remark::{CreateRemark, Remark, RemarkKind, UpdateRemark};
use fixline_db::models::staff::Technician;
use fixline_workflow::stores::{
    Clock, ComplaintStore, ForwardHistoryStore, NotificationStore, RemarkStore,
    ReportNumberGenerator, StaffDirectory, StoreError,
};
use fixline_workflow::{ComplaintWorkflow, NotificationDispatcher, RemarkLedger};

pub const OWNER: DbId = 1;
pub const OTHER_USER: DbId = 2;
pub const ADMIN_ONE: DbId = 100;
pub const ADMIN_TWO: DbId = 101;
pub const TECH_ONE: DbId = 200;
pub const TECH_TWO: DbId = 201;

/// Fixed instant used by every fake.
pub fn ts() -> Timestamp {
    chrono::Utc.with_ymd_and_hms(2026, 8, 7, 9, 30, 0).unwrap()
}

/// A recorded reassignment: (complaint_id, forward_from, forward_to).
pub type ForwardRecord = (DbId, DbId, DbId);

#[derive(Default)]
struct MemState {
    complaints: Vec<Complaint>,
    admin_remarks: Vec<Remark>,
    tech_remarks: Vec<Remark>,
    forwards: Vec<ForwardRecord>,
    notifications: Vec<Notification>,
    next_id: DbId,
}

impl MemState {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn remark_count(&self, complaint_id: DbId) -> i64 {
        let admin = self
            .admin_remarks
            .iter()
            .filter(|r| r.complaint_id == complaint_id)
            .count();
        let tech = self
            .tech_remarks
            .iter()
            .filter(|r| r.complaint_id == complaint_id)
            .count();
        (admin + tech) as i64
    }
}

/// One in-memory backing store implementing every storage seam.
#[derive(Default)]
pub struct MemStore {
    state: Mutex<MemState>,
    /// Recipients whose notification writes fail, for best-effort tests.
    fail_recipients: Mutex<HashSet<DbId>>,
}

impl MemStore {
    pub fn fail_notifications_for(&self, recipient_id: DbId) {
        self.fail_recipients.lock().unwrap().insert(recipient_id);
    }

    pub fn complaint(&self, id: DbId) -> Complaint {
        self.state
            .lock()
            .unwrap()
            .complaints
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .expect("complaint should exist")
    }

    pub fn notifications_for(&self, recipient_id: DbId) -> Vec<Notification> {
        self.state
            .lock()
            .unwrap()
            .notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id)
            .cloned()
            .collect()
    }

    pub fn notification_count(&self) -> usize {
        self.state.lock().unwrap().notifications.len()
    }

    pub fn forwards(&self) -> Vec<ForwardRecord> {
        self.state.lock().unwrap().forwards.clone()
    }

    pub fn total_remarks(&self, complaint_id: DbId) -> i64 {
        self.state.lock().unwrap().remark_count(complaint_id)
    }

    /// Seed a complaint directly, bypassing the workflow.
    pub fn seed_complaint(&self, user_id: DbId, status: &str, assigned_to: Option<DbId>) -> DbId {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.complaints.push(Complaint {
            id,
            report_number: format!("RPT-SEED{id:04}"),
            category_id: 1,
            subcategory: "refrigerator".to_string(),
            complaint_type: "over_warranty".to_string(),
            brand_name: "Coldspot".to_string(),
            model_no: None,
            state: "not cooling".to_string(),
            details: "Compressor runs but never cools.".to_string(),
            warranty_file_ref: None,
            receipt_file_ref: None,
            status: status.to_string(),
            assigned_to,
            user_id,
            created_at: ts(),
            updated_at: ts(),
        });
        id
    }

    /// Seed a technician remark directly, returning its id.
    pub fn seed_technician_remark(&self, complaint_id: DbId, author_id: DbId) -> DbId {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.tech_remarks.push(Remark {
            id,
            complaint_id,
            author_id,
            note_transport: None,
            checking: None,
            remark: Some("initial diagnosis".to_string()),
            status: None,
            created_at: ts(),
        });
        id
    }
}

#[async_trait]
impl ComplaintStore for MemStore {
    async fn insert(
        &self,
        user_id: DbId,
        report_number: &str,
        input: &CreateComplaint,
    ) -> Result<Complaint, StoreError> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let complaint = Complaint {
            id,
            report_number: report_number.to_string(),
            category_id: input.category_id,
            subcategory: input.subcategory.clone(),
            complaint_type: input.complaint_type.clone(),
            brand_name: input.brand_name.clone(),
            model_no: input.model_no.clone(),
            state: input.state.clone(),
            details: input.details.clone(),
            warranty_file_ref: input.warranty_file_ref.clone(),
            receipt_file_ref: input.receipt_file_ref.clone(),
            status: STATUS_PENDING.to_string(),
            assigned_to: None,
            user_id,
            created_at: ts(),
            updated_at: ts(),
        };
        state.complaints.push(complaint.clone());
        Ok(complaint)
    }

    async fn find(&self, id: DbId) -> Result<Option<Complaint>, StoreError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .complaints
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn set_status(&self, id: DbId, status: &str) -> Result<Complaint, StoreError> {
        let mut state = self.state.lock().unwrap();
        let complaint = state
            .complaints
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or("complaint not found")?;
        complaint.status = status.to_string();
        complaint.updated_at = ts();
        Ok(complaint.clone())
    }

    async fn assign(
        &self,
        id: DbId,
        technician_id: DbId,
        status: &str,
    ) -> Result<Complaint, StoreError> {
        let mut state = self.state.lock().unwrap();
        let complaint = state
            .complaints
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or("complaint not found")?;
        complaint.assigned_to = Some(technician_id);
        complaint.status = status.to_string();
        complaint.updated_at = ts();
        Ok(complaint.clone())
    }
}

#[async_trait]
impl RemarkStore for MemStore {
    async fn insert(
        &self,
        kind: RemarkKind,
        complaint_id: DbId,
        author_id: DbId,
        input: &CreateRemark,
    ) -> Result<Option<Remark>, StoreError> {
        let mut state = self.state.lock().unwrap();
        if state.remark_count(complaint_id) >= fixline_core::remark::MAX_REMARKS_PER_COMPLAINT {
            return Ok(None);
        }
        let id = state.next_id();
        let remark = Remark {
            id,
            complaint_id,
            author_id,
            note_transport: input.note_transport.clone(),
            checking: input.checking.clone(),
            remark: input.remark.clone(),
            status: input.status.clone(),
            created_at: ts(),
        };
        match kind {
            RemarkKind::Admin => state.admin_remarks.push(remark.clone()),
            RemarkKind::Technician => state.tech_remarks.push(remark.clone()),
        }
        Ok(Some(remark))
    }

    async fn count_for(&self, complaint_id: DbId) -> Result<i64, StoreError> {
        Ok(self.state.lock().unwrap().remark_count(complaint_id))
    }

    async fn find_technician_remark(&self, id: DbId) -> Result<Option<Remark>, StoreError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .tech_remarks
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn update_technician_remark(
        &self,
        id: DbId,
        input: &UpdateRemark,
    ) -> Result<Remark, StoreError> {
        let mut state = self.state.lock().unwrap();
        let remark = state
            .tech_remarks
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or("remark not found")?;
        if input.note_transport.is_some() {
            remark.note_transport = input.note_transport.clone();
        }
        if input.checking.is_some() {
            remark.checking = input.checking.clone();
        }
        if input.remark.is_some() {
            remark.remark = input.remark.clone();
        }
        if input.status.is_some() {
            remark.status = input.status.clone();
        }
        Ok(remark.clone())
    }

    async fn delete_technician_remark(&self, id: DbId) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.tech_remarks.retain(|r| r.id != id);
        Ok(())
    }
}

#[async_trait]
impl ForwardHistoryStore for MemStore {
    async fn append(
        &self,
        complaint_id: DbId,
        forward_from: DbId,
        forward_to: DbId,
    ) -> Result<(), StoreError> {
        self.state
            .lock()
            .unwrap()
            .forwards
            .push((complaint_id, forward_from, forward_to));
        Ok(())
    }
}

#[async_trait]
impl NotificationStore for MemStore {
    async fn create(&self, record: &NewNotification) -> Result<DbId, StoreError> {
        if self
            .fail_recipients
            .lock()
            .unwrap()
            .contains(&record.recipient_id)
        {
            return Err("notification store unavailable".into());
        }
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.notifications.push(Notification {
            id,
            recipient_id: record.recipient_id,
            recipient_role: record.recipient_role.as_str().to_string(),
            title: record.title.clone(),
            message: record.message.clone(),
            notification_type: record.notification_type.clone(),
            reference_id: record.reference_id,
            is_read: false,
            created_at: ts(),
        });
        Ok(id)
    }

    async fn list(&self, recipient_id: DbId) -> Result<Vec<Notification>, StoreError> {
        let mut notifications = self.notifications_for(recipient_id);
        notifications.reverse();
        Ok(notifications)
    }

    async fn mark_read(
        &self,
        notification_id: DbId,
        recipient_id: DbId,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.lock().unwrap();
        match state
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id && n.recipient_id == recipient_id && !n.is_read)
        {
            Some(notification) => {
                notification.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, recipient_id: DbId) -> Result<u64, StoreError> {
        let mut state = self.state.lock().unwrap();
        let mut marked = 0;
        for notification in state
            .notifications
            .iter_mut()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read)
        {
            notification.is_read = true;
            marked += 1;
        }
        Ok(marked)
    }
}

/// Fixed staff roster.
pub struct StaffRoster {
    admins: Vec<DbId>,
    technicians: Vec<Technician>,
}

impl Default for StaffRoster {
    fn default() -> Self {
        Self {
            admins: vec![ADMIN_ONE, ADMIN_TWO],
            technicians: vec![
                Technician {
                    id: TECH_ONE,
                    name: "Mara Voss".to_string(),
                    email: Some("mara@fixline.test".to_string()),
                    is_active: true,
                },
                Technician {
                    id: TECH_TWO,
                    name: "Jonas Brandt".to_string(),
                    email: None,
                    is_active: false,
                },
            ],
        }
    }
}

#[async_trait]
impl StaffDirectory for StaffRoster {
    async fn find_active_technician(&self, id: DbId) -> Result<Option<Technician>, StoreError> {
        Ok(self
            .technicians
            .iter()
            .find(|t| t.id == id && t.is_active)
            .cloned())
    }

    async fn list_active_admins(&self) -> Result<Vec<DbId>, StoreError> {
        Ok(self.admins.clone())
    }

    async fn pick_notification_target(&self) -> Result<Option<DbId>, StoreError> {
        Ok(self.admins.first().copied())
    }
}

/// Clock pinned to [`ts`].
pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        ts()
    }
}

/// Deterministic report numbers: RPT-0001, RPT-0002, ...
#[derive(Default)]
pub struct SequentialReportNumbers {
    next: Mutex<u32>,
}

impl ReportNumberGenerator for SequentialReportNumbers {
    fn generate(&self) -> String {
        let mut next = self.next.lock().unwrap();
        *next += 1;
        format!("RPT-{:04}", *next)
    }
}

/// Everything a workflow test needs.
pub struct Harness {
    pub store: Arc<MemStore>,
    pub workflow: ComplaintWorkflow,
}

pub fn harness() -> Harness {
    let store = Arc::new(MemStore::default());
    let staff = Arc::new(StaffRoster::default());
    let dispatcher = NotificationDispatcher::new(
        store.clone(),
        staff.clone(),
        Arc::new(FixedClock),
    );
    let workflow = ComplaintWorkflow::new(
        store.clone(),
        RemarkLedger::new(store.clone()),
        store.clone(),
        staff,
        Arc::new(SequentialReportNumbers::default()),
        dispatcher,
    );
    Harness { store, workflow }
}

/// A valid create-complaint input of the given type.
pub fn complaint_input(complaint_type: &str) -> CreateComplaint {
    CreateComplaint {
        category_id: 3,
        subcategory: "washing machine".to_string(),
        complaint_type: complaint_type.to_string(),
        brand_name: "Whirlwind".to_string(),
        model_no: Some("WW-500".to_string()),
        state: "drum does not spin".to_string(),
        details: "Machine fills and drains but the drum never turns.".to_string(),
        warranty_file_ref: None,
        receipt_file_ref: None,
    }
}

/// The translation key inside a stored structured message.
pub fn message_key(notification: &Notification) -> String {
    match payload::decode(&notification.message) {
        DecodedMessage::Structured { key, .. } => key,
        DecodedMessage::Legacy { .. } => panic!("expected structured payload"),
    }
}
