use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{PendingUser, RejectUserInput};

/// Pending self-registrations
#[derive(Clone, Debug)]
pub struct AdminService {
    client: ApiClient,
}

impl AdminService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn pending_users(&self) -> ClientResult<Vec<PendingUser>> {
        self.client.get("/admin/pending-users").await
    }

    pub async fn approve_user(&self, user_id: Uuid) -> ClientResult<()> {
        self.client
            .post_empty(
                &format!("/admin/pending-users/{}/approve", user_id),
                &serde_json::json!({}),
            )
            .await
    }

    pub async fn reject_user(&self, user_id: Uuid, reason: Option<String>) -> ClientResult<()> {
        self.client
            .post_empty(
                &format!("/admin/pending-users/{}/reject", user_id),
                &RejectUserInput { reason },
            )
            .await
    }
}
