//! Complaint lifecycle engine.
//!
//! This crate ties the domain rules from `fixline-core` to the persistence
//! layer behind injected collaborator seams:
//!
//! - [`stores`] — the collaborator traits ([`stores::ComplaintStore`],
//!   [`stores::RemarkStore`], [`stores::NotificationStore`],
//!   [`stores::StaffDirectory`], [`stores::Clock`],
//!   [`stores::ReportNumberGenerator`]).
//! - [`RemarkLedger`] — bounded append log enforcing the remark cap.
//! - [`NotificationDispatcher`] — event-to-notification fan-out, best-effort
//!   per recipient.
//! - [`ComplaintWorkflow`] — the guarded state machine over complaints.
//! - [`pg`] — Postgres-backed implementations of the seams over the
//!   `fixline-db` repositories.

pub mod dispatcher;
pub mod error;
pub mod ledger;
pub mod pg;
pub mod stores;
pub mod workflow;

pub use dispatcher::{ComplaintEvent, NotificationDispatcher};
pub use error::WorkflowError;
pub use ledger::RemarkLedger;
pub use workflow::{ComplaintWorkflow, RemarkOutcome};
