//! Domain logic for the fixline complaint-tracking core.
//!
//! This crate holds everything that is pure and synchronous: the error
//! taxonomy, role and status vocabularies, complaint and remark validation,
//! the hybrid notification payload codec, and the render-side message
//! resolver. Persistence and the workflow engine live in `fixline-db` and
//! `fixline-workflow`.

pub mod complaint;
pub mod error;
pub mod messages;
pub mod payload;
pub mod remark;
pub mod resolve;
pub mod roles;
pub mod status;
pub mod types;
