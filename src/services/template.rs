use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{CloneTemplateInput, ShiftTemplate, ShiftTemplateInput};

#[derive(Clone, Debug)]
pub struct TemplateService {
    client: ApiClient,
}

impl TemplateService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<ShiftTemplate>> {
        self.client.get("/shift-templates").await
    }

    pub async fn create(&self, input: &ShiftTemplateInput) -> ClientResult<ShiftTemplate> {
        self.client.post("/shift-templates", input).await
    }

    pub async fn update(&self, id: Uuid, input: &ShiftTemplateInput) -> ClientResult<ShiftTemplate> {
        self.client
            .put(&format!("/shift-templates/{}", id), input)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> ClientResult<()> {
        self.client.delete(&format!("/shift-templates/{}", id)).await
    }

    pub async fn clone_template(&self, id: Uuid, name: String) -> ClientResult<ShiftTemplate> {
        self.client
            .post(
                &format!("/shift-templates/{}/clone", id),
                &CloneTemplateInput { name },
            )
            .await
    }

    /// Flips the favorite flag server-side and returns the updated template
    pub async fn toggle_favorite(&self, id: Uuid) -> ClientResult<ShiftTemplate> {
        self.client
            .post_action(&format!("/shift-templates/{}/favorite", id))
            .await
    }
}
