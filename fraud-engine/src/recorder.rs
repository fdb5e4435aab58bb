//! Audit recording
//!
//! Persists decisions for audit without ever blocking or failing the
//! assessment that produced them.

use crate::repository::AssessmentStore;
use crate::types::{RiskAssessment, TransactionContext};
use std::sync::Arc;
use tracing::warn;

/// Fire-and-forget writer for finished assessments. The append runs on a
/// spawned task; failures are logged and swallowed so a broken audit sink
/// can never change or delay a returned decision.
#[derive(Clone)]
pub struct AssessmentRecorder {
    store: Arc<dyn AssessmentStore>,
}

impl AssessmentRecorder {
    /// Create a recorder over the given store
    pub fn new(store: Arc<dyn AssessmentStore>) -> Self {
        Self { store }
    }

    /// Queue one assessment for persistence
    pub fn record(&self, assessment: &RiskAssessment, ctx: &TransactionContext) {
        let store = Arc::clone(&self.store);
        let assessment = assessment.clone();
        let ctx = ctx.clone();
        tokio::spawn(async move {
            if let Err(e) = store.append(&assessment, &ctx).await {
                warn!(
                    user_id = %ctx.user_id,
                    error = %e,
                    "failed to append assessment to audit store"
                );
            }
        });
    }
}

impl std::fmt::Debug for AssessmentRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentRecorder").finish_non_exhaustive()
    }
}
