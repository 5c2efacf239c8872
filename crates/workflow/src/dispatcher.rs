//! Event-to-notification fan-out.
//!
//! [`NotificationDispatcher`] translates one domain event into the set of
//! notification records the affected parties must receive, encodes each
//! title and message as a structured payload envelope, and writes them
//! through the [`NotificationStore`] best-effort: a failed write is logged
//! and skipped, and never fails or rolls back the workflow mutation that
//! triggered it.

use std::sync::Arc;

use fixline_core::messages::{
    title_key, KEY_ADMIN_CANCELLED, KEY_ADMIN_CHECKING_UPDATE, KEY_ADMIN_REMARK_UPDATE,
    KEY_ADMIN_STATUS_CLOSED, KEY_ADMIN_STATUS_IN_PROCESS, KEY_ADMIN_STATUS_UPDATED,
    KEY_ADMIN_TRANSPORT_UPDATE, KEY_NEW_COMPLAINT, KEY_PROCESSING_TECH, KEY_PROCESSING_USER,
    KEY_TECH_JOB_TOUCHED, KEY_USER_CANCELLED, KEY_USER_CHECKING_UPDATE,
    KEY_USER_COMPLAINT_CREATED, KEY_USER_REMARK_UPDATE, KEY_USER_STATUS_CLOSED,
    KEY_USER_STATUS_IN_PROCESS, KEY_USER_STATUS_UPDATED, KEY_USER_TRANSPORT_UPDATE,
    PARAM_DATE, PARAM_REPORT_NUMBER, PARAM_STATUS, PARAM_TECHNICIAN, PARAM_TIME,
    TYPE_ASSIGNMENT, TYPE_CHECKING_UPDATE, TYPE_REMARK_UPDATE, TYPE_STATUS_UPDATE,
    TYPE_STATUS_UPDATE_DETAILED, TYPE_TRANSPORT_UPDATE,
};
use fixline_core::payload::{encode, MessageParams};
use fixline_core::roles::{Actor, Role};
use fixline_core::status::{STATUS_CLOSED, STATUS_IN_PROCESS};
use fixline_core::types::DbId;
use fixline_db::models::complaint::Complaint;
use fixline_db::models::notification::NewNotification;
use fixline_db::models::remark::Remark;
use fixline_db::models::staff::Technician;

use crate::stores::{Clock, NotificationStore, StaffDirectory, StoreError};

/// A domain event emitted by a workflow mutation, carrying the
/// event-specific data the fan-out needs.
#[derive(Debug)]
pub enum ComplaintEvent<'a> {
    Created,
    Forwarded {
        technician: &'a Technician,
        status: &'a str,
    },
    RemarkAdded {
        remark: &'a Remark,
        applied_status: Option<&'a str>,
    },
    RemarkUpdated {
        remark: &'a Remark,
        applied_status: Option<&'a str>,
    },
    StatusChanged {
        status: &'a str,
    },
    Cancelled,
}

/// Computes and persists the notification fan-out for domain events.
pub struct NotificationDispatcher {
    notifications: Arc<dyn NotificationStore>,
    staff: Arc<dyn StaffDirectory>,
    clock: Arc<dyn Clock>,
}

impl NotificationDispatcher {
    pub fn new(
        notifications: Arc<dyn NotificationStore>,
        staff: Arc<dyn StaffDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            notifications,
            staff,
            clock,
        }
    }

    /// Fan one event out to its recipients.
    ///
    /// Never fails: a recipient whose write errors is logged and skipped,
    /// and an error while computing the recipient set drops the whole
    /// fan-out with a log line. Returns the number of records written.
    pub async fn dispatch(
        &self,
        event: ComplaintEvent<'_>,
        complaint: &Complaint,
        actor: &Actor,
    ) -> usize {
        let records = match self.build_records(&event, complaint, actor).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    complaint_id = complaint.id,
                    "Failed to compute notification fan-out"
                );
                return 0;
            }
        };

        let mut delivered = 0;
        for record in &records {
            match self.notifications.create(record).await {
                Ok(_) => delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        recipient_id = record.recipient_id,
                        recipient_role = record.recipient_role.as_str(),
                        "Failed to write notification, skipping recipient"
                    );
                }
            }
        }
        delivered
    }

    /// Compute the recipient tuples for an event per the fan-out table.
    async fn build_records(
        &self,
        event: &ComplaintEvent<'_>,
        complaint: &Complaint,
        actor: &Actor,
    ) -> Result<Vec<NewNotification>, StoreError> {
        let params = self.base_params(complaint);
        let mut records = Vec::new();

        match event {
            ComplaintEvent::Created => {
                for admin_id in self.staff.list_active_admins().await? {
                    records.push(record(
                        admin_id,
                        Role::Admin,
                        KEY_NEW_COMPLAINT,
                        &params,
                        TYPE_STATUS_UPDATE,
                        complaint.id,
                    ));
                }
                records.push(record(
                    complaint.user_id,
                    Role::User,
                    KEY_USER_COMPLAINT_CREATED,
                    &params,
                    TYPE_STATUS_UPDATE,
                    complaint.id,
                ));
            }

            ComplaintEvent::Forwarded { technician, status } => {
                let mut params = params;
                params.insert(PARAM_TECHNICIAN.to_string(), technician.name.clone());
                params.insert(PARAM_STATUS.to_string(), status.to_string());

                records.push(record(
                    technician.id,
                    Role::Technician,
                    KEY_PROCESSING_TECH,
                    &params,
                    TYPE_ASSIGNMENT,
                    complaint.id,
                ));

                // The owner sees the assignment, unless the forward carried
                // an explicit status other than in_process, in which case the
                // status wording describes the event instead.
                if *status == STATUS_IN_PROCESS {
                    records.push(record(
                        complaint.user_id,
                        Role::User,
                        KEY_PROCESSING_USER,
                        &params,
                        TYPE_ASSIGNMENT,
                        complaint.id,
                    ));
                } else {
                    records.push(record(
                        complaint.user_id,
                        Role::User,
                        user_status_key(status),
                        &params,
                        TYPE_STATUS_UPDATE,
                        complaint.id,
                    ));
                }
            }

            ComplaintEvent::RemarkAdded {
                remark,
                applied_status,
            }
            | ComplaintEvent::RemarkUpdated {
                remark,
                applied_status,
            } => {
                self.build_remark_records(
                    &mut records,
                    complaint,
                    actor,
                    remark,
                    *applied_status,
                    params,
                )
                .await?;
            }

            ComplaintEvent::StatusChanged { status } => {
                let mut params = params;
                params.insert(PARAM_STATUS.to_string(), status.to_string());

                // The admin broadcast mirrors technician-initiated changes;
                // an admin's own status edit only notifies the owner.
                if actor.role == Role::Technician {
                    for admin_id in self.staff.list_active_admins().await? {
                        records.push(record(
                            admin_id,
                            Role::Admin,
                            admin_status_key(status),
                            &params,
                            TYPE_STATUS_UPDATE,
                            complaint.id,
                        ));
                    }
                }
                records.push(record(
                    complaint.user_id,
                    Role::User,
                    user_status_key(status),
                    &params,
                    TYPE_STATUS_UPDATE,
                    complaint.id,
                ));
            }

            ComplaintEvent::Cancelled => {
                records.push(record(
                    complaint.user_id,
                    Role::User,
                    KEY_USER_CANCELLED,
                    &params,
                    TYPE_STATUS_UPDATE,
                    complaint.id,
                ));
                if let Some(admin_id) = self.staff.pick_notification_target().await? {
                    records.push(record(
                        admin_id,
                        Role::Admin,
                        KEY_ADMIN_CANCELLED,
                        &params,
                        TYPE_STATUS_UPDATE,
                        complaint.id,
                    ));
                }
            }
        }

        Ok(records)
    }

    /// Remark fan-out: one independent admin+owner pair per populated facet
    /// (status, transport, checking, remark text), plus a notice to the
    /// assigned technician when an admin touched their job. One submission
    /// can legitimately produce up to four pairs; the facets are never
    /// collapsed into a single message.
    async fn build_remark_records(
        &self,
        records: &mut Vec<NewNotification>,
        complaint: &Complaint,
        actor: &Actor,
        remark: &Remark,
        applied_status: Option<&str>,
        params: MessageParams,
    ) -> Result<(), StoreError> {
        let admins = self.staff.list_active_admins().await?;

        let mut pair = |key_admin: &str, key_user: &str, ntype: &str, params: &MessageParams| {
            for admin_id in &admins {
                records.push(record(
                    *admin_id,
                    Role::Admin,
                    key_admin,
                    params,
                    ntype,
                    complaint.id,
                ));
            }
            records.push(record(
                complaint.user_id,
                Role::User,
                key_user,
                params,
                ntype,
                complaint.id,
            ));
        };

        if let Some(status) = applied_status {
            let mut status_params = params.clone();
            status_params.insert(PARAM_STATUS.to_string(), status.to_string());
            pair(
                admin_status_key(status),
                user_status_key(status),
                TYPE_STATUS_UPDATE_DETAILED,
                &status_params,
            );
        }

        if filled(&remark.note_transport) {
            pair(
                KEY_ADMIN_TRANSPORT_UPDATE,
                KEY_USER_TRANSPORT_UPDATE,
                TYPE_TRANSPORT_UPDATE,
                &params,
            );
        }

        if filled(&remark.checking) {
            pair(
                KEY_ADMIN_CHECKING_UPDATE,
                KEY_USER_CHECKING_UPDATE,
                TYPE_CHECKING_UPDATE,
                &params,
            );
        }

        if filled(&remark.remark) {
            pair(
                KEY_ADMIN_REMARK_UPDATE,
                KEY_USER_REMARK_UPDATE,
                TYPE_REMARK_UPDATE,
                &params,
            );
        }

        if actor.role == Role::Admin {
            if let Some(technician_id) = complaint.assigned_to {
                records.push(record(
                    technician_id,
                    Role::Technician,
                    KEY_TECH_JOB_TOUCHED,
                    &params,
                    TYPE_REMARK_UPDATE,
                    complaint.id,
                ));
            }
        }

        Ok(())
    }

    /// Params common to every payload: report number plus the formatted
    /// date and time of dispatch.
    fn base_params(&self, complaint: &Complaint) -> MessageParams {
        let now = self.clock.now();
        let mut params = MessageParams::new();
        params.insert(
            PARAM_REPORT_NUMBER.to_string(),
            complaint.report_number.clone(),
        );
        params.insert(PARAM_DATE.to_string(), now.format("%Y-%m-%d").to_string());
        params.insert(PARAM_TIME.to_string(), now.format("%H:%M").to_string());
        params
    }
}

/// Build one notification record with encoded title and message envelopes.
fn record(
    recipient_id: DbId,
    recipient_role: Role,
    key: &str,
    params: &MessageParams,
    notification_type: &str,
    reference_id: DbId,
) -> NewNotification {
    NewNotification {
        recipient_id,
        recipient_role,
        title: encode(&title_key(key), params),
        message: encode(key, params),
        notification_type: notification_type.to_string(),
        reference_id,
    }
}

/// Admin wording key for a status value.
fn admin_status_key(status: &str) -> &'static str {
    match status {
        STATUS_IN_PROCESS => KEY_ADMIN_STATUS_IN_PROCESS,
        STATUS_CLOSED => KEY_ADMIN_STATUS_CLOSED,
        _ => KEY_ADMIN_STATUS_UPDATED,
    }
}

/// Owner wording key for a status value. `closed` carries the
/// ready-for-pickup framing.
fn user_status_key(status: &str) -> &'static str {
    match status {
        STATUS_IN_PROCESS => KEY_USER_STATUS_IN_PROCESS,
        STATUS_CLOSED => KEY_USER_STATUS_CLOSED,
        _ => KEY_USER_STATUS_UPDATED,
    }
}

fn filled(field: &Option<String>) -> bool {
    field.as_ref().is_some_and(|v| !v.trim().is_empty())
}
