//! State machine coverage: creation, forwarding, direct status changes,
//! and cancellation, including every guard's failure path.

mod common;

use assert_matches::assert_matches;
use common::*;
use fixline_core::error::CoreError;
use fixline_core::messages::{
    KEY_PROCESSING_TECH, KEY_PROCESSING_USER, KEY_USER_STATUS_CLOSED,
};
use fixline_core::roles::Actor;
use fixline_core::status::{
    STATUS_CANCELLED, STATUS_CLOSED, STATUS_IN_PROCESS, STATUS_PENDING,
};
use fixline_workflow::WorkflowError;

#[tokio::test]
async fn test_creation_lands_pending_and_unassigned() {
    let h = harness();
    let created = h
        .workflow
        .create(OWNER, complaint_input("over_warranty"))
        .await
        .unwrap();

    assert_eq!(created.status, STATUS_PENDING);
    assert!(created.assigned_to.is_none());
    assert_eq!(created.report_number, "RPT-0001");
}

#[tokio::test]
async fn test_creation_rejects_unknown_complaint_type() {
    let h = harness();
    let result = h
        .workflow
        .create(OWNER, complaint_input("lifetime_warranty"))
        .await;

    assert_matches!(
        result,
        Err(WorkflowError::Domain(CoreError::Validation(_)))
    );
    assert_eq!(h.store.notification_count(), 0);
}

#[tokio::test]
async fn test_creation_tolerates_missing_warranty_documents() {
    // The intake form historically allows under-warranty complaints without
    // document refs; the omission is logged, never rejected.
    let h = harness();
    let created = h
        .workflow
        .create(OWNER, complaint_input("under_warranty"))
        .await
        .unwrap();

    assert_eq!(created.status, STATUS_PENDING);
}

#[tokio::test]
async fn test_forward_assigns_technician_and_records_history() {
    let h = harness();
    let created = h
        .workflow
        .create(OWNER, complaint_input("over_warranty"))
        .await
        .unwrap();

    let updated = h
        .workflow
        .forward(Actor::admin(ADMIN_ONE), created.id, TECH_ONE, None)
        .await
        .unwrap();

    assert_eq!(updated.assigned_to, Some(TECH_ONE));
    assert_eq!(updated.status, STATUS_IN_PROCESS);
    assert_eq!(h.store.forwards(), vec![(created.id, ADMIN_ONE, TECH_ONE)]);

    let tech_notifications = h.store.notifications_for(TECH_ONE);
    assert_eq!(tech_notifications.len(), 1);
    assert_eq!(message_key(&tech_notifications[0]), KEY_PROCESSING_TECH);
    assert_eq!(tech_notifications[0].notification_type, "assignment");

    let owner_notifications = h.store.notifications_for(OWNER);
    let last = owner_notifications.last().unwrap();
    assert_eq!(message_key(last), KEY_PROCESSING_USER);
}

#[tokio::test]
async fn test_reforward_records_previous_assignee_as_source() {
    let h = harness();
    let id = h.store.seed_complaint(OWNER, STATUS_IN_PROCESS, Some(TECH_ONE));

    // Re-forwarding an already-assigned complaint records the previous
    // assignee, not the acting admin, as the source.
    h.workflow
        .forward(Actor::admin(ADMIN_TWO), id, TECH_ONE, None)
        .await
        .unwrap();

    assert_eq!(h.store.forwards(), vec![(id, TECH_ONE, TECH_ONE)]);
}

#[tokio::test]
async fn test_forward_with_status_override_uses_status_wording_for_owner() {
    let h = harness();
    let created = h
        .workflow
        .create(OWNER, complaint_input("over_warranty"))
        .await
        .unwrap();

    let updated = h
        .workflow
        .forward(
            Actor::admin(ADMIN_ONE),
            created.id,
            TECH_ONE,
            Some(STATUS_CLOSED.to_string()),
        )
        .await
        .unwrap();

    assert_eq!(updated.status, STATUS_CLOSED);
    let owner_notifications = h.store.notifications_for(OWNER);
    assert_eq!(
        message_key(owner_notifications.last().unwrap()),
        KEY_USER_STATUS_CLOSED
    );
}

#[tokio::test]
async fn test_forward_to_non_technician_rejected_with_state_unchanged() {
    let h = harness();
    let created = h
        .workflow
        .create(OWNER, complaint_input("over_warranty"))
        .await
        .unwrap();

    for bad_target in [TECH_TWO, 9999] {
        let result = h
            .workflow
            .forward(Actor::admin(ADMIN_ONE), created.id, bad_target, None)
            .await;
        assert_matches!(
            result,
            Err(WorkflowError::Domain(CoreError::InvalidAssignee { id })) if id == bad_target
        );
    }

    let current = h.store.complaint(created.id);
    assert_eq!(current.status, STATUS_PENDING);
    assert!(current.assigned_to.is_none());
    assert!(h.store.forwards().is_empty());
}

#[tokio::test]
async fn test_forward_requires_admin_role() {
    let h = harness();
    let created = h
        .workflow
        .create(OWNER, complaint_input("over_warranty"))
        .await
        .unwrap();

    for actor in [Actor::technician(TECH_ONE), Actor::user(OWNER)] {
        let result = h.workflow.forward(actor, created.id, TECH_ONE, None).await;
        assert_matches!(result, Err(WorkflowError::Domain(CoreError::Forbidden(_))));
    }
}

#[tokio::test]
async fn test_forward_of_missing_complaint_is_not_found() {
    let h = harness();
    let result = h
        .workflow
        .forward(Actor::admin(ADMIN_ONE), 424242, TECH_ONE, None)
        .await;
    assert_matches!(
        result,
        Err(WorkflowError::Domain(CoreError::NotFound { entity: "Complaint", .. }))
    );
}

#[tokio::test]
async fn test_forward_out_of_terminal_status_rejected() {
    let h = harness();
    let id = h.store.seed_complaint(OWNER, STATUS_CLOSED, None);

    let result = h
        .workflow
        .forward(Actor::admin(ADMIN_ONE), id, TECH_ONE, None)
        .await;
    assert_matches!(
        result,
        Err(WorkflowError::Domain(CoreError::InvalidTransition { .. }))
    );
}

#[tokio::test]
async fn test_cancel_succeeds_only_for_owner_on_pending() {
    let h = harness();
    let created = h
        .workflow
        .create(OWNER, complaint_input("over_warranty"))
        .await
        .unwrap();

    let cancelled = h.workflow.cancel(Actor::user(OWNER), created.id).await.unwrap();
    assert_eq!(cancelled.status, STATUS_CANCELLED);
}

#[tokio::test]
async fn test_cancel_by_non_owner_is_forbidden() {
    let h = harness();
    let created = h
        .workflow
        .create(OWNER, complaint_input("over_warranty"))
        .await
        .unwrap();

    for actor in [
        Actor::user(OTHER_USER),
        Actor::admin(ADMIN_ONE),
        Actor::technician(TECH_ONE),
    ] {
        let result = h.workflow.cancel(actor, created.id).await;
        assert_matches!(result, Err(WorkflowError::Domain(CoreError::Forbidden(_))));
    }
    assert_eq!(h.store.complaint(created.id).status, STATUS_PENDING);
}

#[tokio::test]
async fn test_cancel_of_non_pending_complaint_rejected() {
    let h = harness();
    for status in [STATUS_IN_PROCESS, STATUS_CLOSED, STATUS_CANCELLED] {
        let id = h.store.seed_complaint(OWNER, status, None);
        let result = h.workflow.cancel(Actor::user(OWNER), id).await;
        assert_matches!(
            result,
            Err(WorkflowError::Domain(CoreError::InvalidTransition { .. }))
        );
        assert_eq!(h.store.complaint(id).status, status);
    }
}

#[tokio::test]
async fn test_status_update_by_assigned_technician_succeeds() {
    let h = harness();
    let id = h.store.seed_complaint(OWNER, STATUS_IN_PROCESS, Some(TECH_ONE));

    let updated = h
        .workflow
        .update_status(Actor::technician(TECH_ONE), id, STATUS_CLOSED)
        .await
        .unwrap();
    assert_eq!(updated.status, STATUS_CLOSED);
}

#[tokio::test]
async fn test_status_update_by_unassigned_technician_forbidden() {
    let h = harness();
    let id = h.store.seed_complaint(OWNER, STATUS_IN_PROCESS, Some(TECH_ONE));

    let result = h
        .workflow
        .update_status(Actor::technician(TECH_TWO), id, STATUS_CLOSED)
        .await;
    assert_matches!(result, Err(WorkflowError::Domain(CoreError::Forbidden(_))));
    assert_eq!(h.store.complaint(id).status, STATUS_IN_PROCESS);
}

#[tokio::test]
async fn test_status_update_requires_staff_role() {
    let h = harness();
    let id = h.store.seed_complaint(OWNER, STATUS_PENDING, None);

    let result = h
        .workflow
        .update_status(Actor::user(OWNER), id, STATUS_CLOSED)
        .await;
    assert_matches!(result, Err(WorkflowError::Domain(CoreError::Forbidden(_))));
}

#[tokio::test]
async fn test_status_update_rejects_unknown_status_value() {
    let h = harness();
    let id = h.store.seed_complaint(OWNER, STATUS_PENDING, None);

    let result = h
        .workflow
        .update_status(Actor::admin(ADMIN_ONE), id, "archived")
        .await;
    assert_matches!(
        result,
        Err(WorkflowError::Domain(CoreError::Validation(_)))
    );
}

#[tokio::test]
async fn test_terminal_statuses_admit_no_further_transitions() {
    let h = harness();
    for status in [STATUS_CLOSED, STATUS_CANCELLED] {
        let id = h.store.seed_complaint(OWNER, status, None);
        let result = h
            .workflow
            .update_status(Actor::admin(ADMIN_ONE), id, STATUS_IN_PROCESS)
            .await;
        assert_matches!(
            result,
            Err(WorkflowError::Domain(CoreError::InvalidTransition { .. }))
        );
        assert_eq!(h.store.complaint(id).status, status);
    }
}
