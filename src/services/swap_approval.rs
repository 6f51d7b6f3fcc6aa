use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{
    ApprovalChain, ApproveSwapInput, AuditTrailEntry, PendingApproval, RejectSwapInput,
};

/// Swap-request approval workflow endpoints
#[derive(Clone, Debug)]
pub struct SwapApprovalService {
    client: ApiClient,
}

impl SwapApprovalService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Approvals waiting on the caller
    pub async fn pending(&self) -> ClientResult<Vec<PendingApproval>> {
        self.client.get("/swap-approvals/pending").await
    }

    pub async fn approve(&self, approval_id: Uuid, comments: Option<String>) -> ClientResult<()> {
        self.client
            .post_empty(
                &format!("/swap-approvals/{}/approve", approval_id),
                &ApproveSwapInput { comments },
            )
            .await
    }

    pub async fn reject(&self, approval_id: Uuid, reason: String) -> ClientResult<()> {
        self.client
            .post_empty(
                &format!("/swap-approvals/{}/reject", approval_id),
                &RejectSwapInput { reason },
            )
            .await
    }

    pub async fn chain(&self, approval_id: Uuid) -> ClientResult<ApprovalChain> {
        self.client
            .get(&format!("/swap-approvals/{}/chain", approval_id))
            .await
    }

    pub async fn audit_trail(&self, approval_id: Uuid) -> ClientResult<Vec<AuditTrailEntry>> {
        self.client
            .get(&format!("/swap-approvals/{}/audit-trail", approval_id))
            .await
    }
}
