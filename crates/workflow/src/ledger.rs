//! Bounded append log of complaint remarks.
//!
//! [`RemarkLedger`] is the only write path for remarks. The three-remark
//! ceiling is a hard business rule with no override: the backing store
//! decides cap-vs-insert atomically and the ledger translates a refusal
//! into [`CoreError::RemarkLimitReached`]. The cap counts admin and
//! technician remarks combined.

use std::sync::Arc;

use fixline_core::error::CoreError;
use fixline_core::types::DbId;
use fixline_db::models::remark::{CreateRemark, Remark, RemarkKind, UpdateRemark};

use crate::error::WorkflowError;
use crate::stores::RemarkStore;

pub struct RemarkLedger {
    store: Arc<dyn RemarkStore>,
}

impl RemarkLedger {
    pub fn new(store: Arc<dyn RemarkStore>) -> Self {
        Self { store }
    }

    /// Total remarks recorded against a complaint, both kinds combined.
    pub async fn count_for(&self, complaint_id: DbId) -> Result<i64, WorkflowError> {
        Ok(self.store.count_for(complaint_id).await?)
    }

    /// Append a remark, rejecting the write once the cap is reached.
    pub async fn append(
        &self,
        kind: RemarkKind,
        complaint_id: DbId,
        author_id: DbId,
        input: &CreateRemark,
    ) -> Result<Remark, WorkflowError> {
        match self.store.insert(kind, complaint_id, author_id, input).await? {
            Some(remark) => Ok(remark),
            None => Err(CoreError::RemarkLimitReached { complaint_id }.into()),
        }
    }

    /// Look up a technician remark. Admin remarks have no lookup path here:
    /// they are immutable and never edited after creation.
    pub async fn find_technician_remark(
        &self,
        remark_id: DbId,
    ) -> Result<Option<Remark>, WorkflowError> {
        Ok(self.store.find_technician_remark(remark_id).await?)
    }

    /// The author of a technician remark, for ownership checks.
    pub async fn owner_of(&self, remark_id: DbId) -> Result<DbId, WorkflowError> {
        let remark = self
            .store
            .find_technician_remark(remark_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Remark",
                id: remark_id,
            })?;
        Ok(remark.author_id)
    }

    pub async fn update_technician_remark(
        &self,
        remark_id: DbId,
        input: &UpdateRemark,
    ) -> Result<Remark, WorkflowError> {
        Ok(self.store.update_technician_remark(remark_id, input).await?)
    }

    pub async fn delete_technician_remark(&self, remark_id: DbId) -> Result<(), WorkflowError> {
        Ok(self.store.delete_technician_remark(remark_id).await?)
    }
}
