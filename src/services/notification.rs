use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{NotificationPage, NotificationQuery};

#[derive(Clone, Debug)]
pub struct NotificationService {
    client: ApiClient,
}

impl NotificationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &NotificationQuery) -> ClientResult<NotificationPage> {
        self.client.get_query("/notifications", query).await
    }

    pub async fn mark_read(&self, id: Uuid) -> ClientResult<()> {
        self.client
            .patch_empty(&format!("/notifications/{}/read", id))
            .await
    }

    pub async fn mark_unread(&self, id: Uuid) -> ClientResult<()> {
        self.client
            .patch_empty(&format!("/notifications/{}/unread", id))
            .await
    }

    pub async fn mark_all_read(&self) -> ClientResult<()> {
        self.client.patch_empty("/notifications/read-all").await
    }
}
