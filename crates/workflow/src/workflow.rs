//! The complaint lifecycle state machine.
//!
//! Every mutation validates role, ownership, and state before touching
//! storage, then fires the matching domain event through the dispatcher.
//! Notification fan-out is best-effort and cannot fail an operation; every
//! failed guard leaves prior state intact.
//!
//! Mutations are idempotent-unsafe: repeating a `forward` call re-assigns
//! and re-notifies. Concurrent mutations of one complaint are not
//! coordinated here; the store's row-level atomicity is the only
//! protection, and the last writer wins.

use std::sync::Arc;

use fixline_core::complaint as complaint_rules;
use fixline_core::error::CoreError;
use fixline_core::remark as remark_rules;
use fixline_core::roles::{Actor, Role};
use fixline_core::status::{self, STATUS_CANCELLED, STATUS_IN_PROCESS, STATUS_PENDING};
use fixline_core::types::DbId;
use fixline_db::models::complaint::{Complaint, CreateComplaint};
use fixline_db::models::remark::{CreateRemark, Remark, RemarkKind, UpdateRemark};
use validator::Validate;

use crate::dispatcher::{ComplaintEvent, NotificationDispatcher};
use crate::error::WorkflowError;
use crate::ledger::RemarkLedger;
use crate::stores::{ComplaintStore, ForwardHistoryStore, ReportNumberGenerator, StaffDirectory};

/// Result of a remark submission: the persisted remark plus the status
/// side effect made explicit, instead of leaving callers to infer it from
/// the presence of a field.
#[derive(Debug, Clone)]
pub struct RemarkOutcome {
    pub remark: Remark,
    pub status_changed: bool,
    pub new_status: Option<String>,
}

/// Guarded mutation operations over the complaint lifecycle.
pub struct ComplaintWorkflow {
    complaints: Arc<dyn ComplaintStore>,
    ledger: RemarkLedger,
    forwards: Arc<dyn ForwardHistoryStore>,
    staff: Arc<dyn StaffDirectory>,
    report_numbers: Arc<dyn ReportNumberGenerator>,
    dispatcher: NotificationDispatcher,
}

impl ComplaintWorkflow {
    pub fn new(
        complaints: Arc<dyn ComplaintStore>,
        ledger: RemarkLedger,
        forwards: Arc<dyn ForwardHistoryStore>,
        staff: Arc<dyn StaffDirectory>,
        report_numbers: Arc<dyn ReportNumberGenerator>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            complaints,
            ledger,
            forwards,
            staff,
            report_numbers,
            dispatcher,
        }
    }

    /// File a new complaint. Always lands in `pending`, unassigned.
    pub async fn create(
        &self,
        user_id: DbId,
        input: CreateComplaint,
    ) -> Result<Complaint, WorkflowError> {
        input
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        complaint_rules::validate_complaint_type(&input.complaint_type)?;
        complaint_rules::validate_details(&input.details)?;

        // The intake form tolerates missing warranty documents; flag it but
        // do not reject.
        if !complaint_rules::warranty_documents_complete(
            &input.complaint_type,
            &input.warranty_file_ref,
            &input.receipt_file_ref,
        ) {
            tracing::warn!(
                user_id,
                "Under-warranty complaint filed without both document refs"
            );
        }

        let report_number = self.report_numbers.generate();
        let created = self
            .complaints
            .insert(user_id, &report_number, &input)
            .await?;

        self.dispatcher
            .dispatch(ComplaintEvent::Created, &created, &Actor::user(user_id))
            .await;
        Ok(created)
    }

    /// Assign or reassign a complaint to a technician.
    ///
    /// Admin-only. The target must resolve to an active technician, so a
    /// complaint can never be assigned to a non-technician account id.
    /// Status becomes `status_override`, or `in_process` when none is given.
    pub async fn forward(
        &self,
        actor: Actor,
        complaint_id: DbId,
        technician_id: DbId,
        status_override: Option<String>,
    ) -> Result<Complaint, WorkflowError> {
        if actor.role != Role::Admin {
            return Err(forbidden("only admins may forward complaints"));
        }
        let complaint = self.require_complaint(complaint_id).await?;

        let next_status = status_override.unwrap_or_else(|| STATUS_IN_PROCESS.to_string());
        status::ensure_transition(&complaint.status, &next_status)?;

        let technician = self
            .staff
            .find_active_technician(technician_id)
            .await?
            .ok_or(CoreError::InvalidAssignee { id: technician_id })?;

        let forward_from = complaint.assigned_to.unwrap_or(actor.id);
        let updated = self
            .complaints
            .assign(complaint_id, technician.id, &next_status)
            .await?;
        self.forwards
            .append(complaint_id, forward_from, technician.id)
            .await?;

        self.dispatcher
            .dispatch(
                ComplaintEvent::Forwarded {
                    technician: &technician,
                    status: &next_status,
                },
                &updated,
                &actor,
            )
            .await;
        Ok(updated)
    }

    /// Record a staff remark, optionally applying a status to the parent
    /// complaint in the same call.
    pub async fn add_remark(
        &self,
        actor: Actor,
        complaint_id: DbId,
        input: CreateRemark,
    ) -> Result<RemarkOutcome, WorkflowError> {
        let kind = remark_kind_for(&actor)?;
        let complaint = self.require_complaint(complaint_id).await?;
        ensure_staff_access(&actor, &complaint)?;

        // Remarks stay legal on closed complaints (pickup coordination),
        // but a cancelled complaint accepts nothing further.
        if complaint.status == STATUS_CANCELLED {
            return Err(CoreError::InvalidTransition {
                from: complaint.status.clone(),
                to: complaint.status.clone(),
            }
            .into());
        }

        remark_rules::validate_remark_content(
            &input.note_transport,
            &input.checking,
            &input.remark,
            &input.status,
        )?;

        let applied_status = match requested_status(&input.status) {
            Some(target) => {
                status::ensure_transition(&complaint.status, target)?;
                Some(target.to_string())
            }
            None => None,
        };

        let remark = self
            .ledger
            .append(kind, complaint_id, actor.id, &input)
            .await?;

        let (updated, status_changed) = match applied_status.as_deref() {
            Some(target) => (self.complaints.set_status(complaint_id, target).await?, true),
            None => (complaint, false),
        };

        self.dispatcher
            .dispatch(
                ComplaintEvent::RemarkAdded {
                    remark: &remark,
                    applied_status: applied_status.as_deref(),
                },
                &updated,
                &actor,
            )
            .await;

        Ok(RemarkOutcome {
            remark,
            status_changed,
            new_status: applied_status,
        })
    }

    /// Edit a technician remark. Only the authoring technician may edit;
    /// admin remarks are immutable once created.
    pub async fn update_remark(
        &self,
        actor: Actor,
        remark_id: DbId,
        input: UpdateRemark,
    ) -> Result<RemarkOutcome, WorkflowError> {
        let existing = self.require_owned_technician_remark(&actor, remark_id).await?;
        let complaint = self.require_complaint(existing.complaint_id).await?;

        let applied_status = match requested_status(&input.status) {
            Some(target) => {
                status::ensure_transition(&complaint.status, target)?;
                Some(target.to_string())
            }
            None => None,
        };

        let remark = self.ledger.update_technician_remark(remark_id, &input).await?;

        let (updated, status_changed) = match applied_status.as_deref() {
            Some(target) => (
                self.complaints
                    .set_status(existing.complaint_id, target)
                    .await?,
                true,
            ),
            None => (complaint, false),
        };

        self.dispatcher
            .dispatch(
                ComplaintEvent::RemarkUpdated {
                    remark: &remark,
                    applied_status: applied_status.as_deref(),
                },
                &updated,
                &actor,
            )
            .await;

        Ok(RemarkOutcome {
            remark,
            status_changed,
            new_status: applied_status,
        })
    }

    /// Delete a technician remark. Author-only; fires no notification.
    pub async fn delete_remark(&self, actor: Actor, remark_id: DbId) -> Result<(), WorkflowError> {
        self.require_owned_technician_remark(&actor, remark_id).await?;
        self.ledger.delete_technician_remark(remark_id).await
    }

    /// Set a complaint's status directly, outside a remark submission.
    pub async fn update_status(
        &self,
        actor: Actor,
        complaint_id: DbId,
        new_status: &str,
    ) -> Result<Complaint, WorkflowError> {
        if !actor.role.is_staff() {
            return Err(forbidden("only staff may update complaint status"));
        }
        let complaint = self.require_complaint(complaint_id).await?;
        ensure_staff_access(&actor, &complaint)?;
        status::ensure_transition(&complaint.status, new_status)?;

        let updated = self.complaints.set_status(complaint_id, new_status).await?;

        self.dispatcher
            .dispatch(
                ComplaintEvent::StatusChanged { status: new_status },
                &updated,
                &actor,
            )
            .await;
        Ok(updated)
    }

    /// Withdraw a complaint. Owner-only, and only while still `pending`.
    pub async fn cancel(&self, actor: Actor, complaint_id: DbId) -> Result<Complaint, WorkflowError> {
        let complaint = self.require_complaint(complaint_id).await?;
        if actor.role != Role::User || complaint.user_id != actor.id {
            return Err(forbidden("only the owning user may cancel a complaint"));
        }
        if complaint.status != STATUS_PENDING {
            return Err(CoreError::InvalidTransition {
                from: complaint.status.clone(),
                to: STATUS_CANCELLED.to_string(),
            }
            .into());
        }

        let updated = self
            .complaints
            .set_status(complaint_id, STATUS_CANCELLED)
            .await?;

        self.dispatcher
            .dispatch(ComplaintEvent::Cancelled, &updated, &actor)
            .await;
        Ok(updated)
    }

    async fn require_complaint(&self, id: DbId) -> Result<Complaint, WorkflowError> {
        self.complaints
            .find(id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Complaint",
                id,
            })
            .map_err(Into::into)
    }

    async fn require_owned_technician_remark(
        &self,
        actor: &Actor,
        remark_id: DbId,
    ) -> Result<Remark, WorkflowError> {
        if actor.role != Role::Technician {
            return Err(forbidden("only the authoring technician may modify a remark"));
        }
        let remark = self
            .ledger
            .find_technician_remark(remark_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Remark",
                id: remark_id,
            })?;
        if remark.author_id != actor.id {
            return Err(forbidden("only the authoring technician may modify a remark"));
        }
        Ok(remark)
    }
}

/// The remark table a staff actor writes to. Plain users have none.
fn remark_kind_for(actor: &Actor) -> Result<RemarkKind, WorkflowError> {
    match actor.role {
        Role::Admin => Ok(RemarkKind::Admin),
        Role::Technician => Ok(RemarkKind::Technician),
        Role::User => Err(forbidden("only staff may add remarks")),
    }
}

/// Technicians may only act on complaints assigned to them; admins on any.
fn ensure_staff_access(actor: &Actor, complaint: &Complaint) -> Result<(), WorkflowError> {
    if actor.role == Role::Technician && complaint.assigned_to != Some(actor.id) {
        return Err(forbidden(
            "technicians may only act on their own assignments",
        ));
    }
    Ok(())
}

/// A status field counts as a requested transition only when non-blank.
fn requested_status(status: &Option<String>) -> Option<&str> {
    status.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn forbidden(msg: &str) -> WorkflowError {
    CoreError::Forbidden(msg.to_string()).into()
}
