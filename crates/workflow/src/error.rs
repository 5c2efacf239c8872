use fixline_core::error::CoreError;

use crate::stores::StoreError;

/// Error type for workflow operations.
///
/// Domain guard failures surface as [`CoreError`]; anything that went wrong
/// inside a storage collaborator is wrapped as [`WorkflowError::Store`].
/// Notification-dispatch failures never appear here; the dispatcher logs
/// and swallows them.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error("Storage error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for WorkflowError {
    fn from(err: StoreError) -> Self {
        WorkflowError::Store(err)
    }
}
