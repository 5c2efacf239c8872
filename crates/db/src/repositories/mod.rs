//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod complaint_repo;
pub mod forward_history_repo;
pub mod notification_repo;
pub mod remark_repo;
pub mod staff_repo;

pub use complaint_repo::ComplaintRepo;
pub use forward_history_repo::ForwardHistoryRepo;
pub use notification_repo::NotificationRepo;
pub use remark_repo::{combined_remark_count, AdminRemarkRepo, TechnicianRemarkRepo};
pub use staff_repo::StaffRepo;
