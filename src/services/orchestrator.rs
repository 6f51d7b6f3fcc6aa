use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{
    ApplyRequest, ApplyResult, AutoOverview, OrchestrationPreview, OrchestrationRun,
    PreviewRequest, RollingPlanStatus, RollingToggleRequest, ShiftType,
};

#[derive(Clone, Debug)]
pub struct OrchestratorService {
    client: ApiClient,
}

impl OrchestratorService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn preview(&self, request: &PreviewRequest) -> ClientResult<OrchestrationPreview> {
        self.client.post("/orchestrator/preview", request).await
    }

    pub async fn apply(&self, request: &ApplyRequest) -> ClientResult<ApplyResult> {
        self.client.post("/orchestrator/apply", request).await
    }

    /// Run history, newest first as the server orders it
    pub async fn status(&self) -> ClientResult<Vec<OrchestrationRun>> {
        self.client.get("/orchestrator/status").await
    }

    pub async fn auto_overview(&self) -> ClientResult<AutoOverview> {
        self.client.get("/orchestrator/auto/overview").await
    }

    pub async fn toggle_rolling(
        &self,
        shift_type: ShiftType,
        enabled: bool,
    ) -> ClientResult<RollingPlanStatus> {
        self.client
            .post(
                "/orchestrator/auto/toggle",
                &RollingToggleRequest {
                    shift_type,
                    enabled,
                },
            )
            .await
    }
}
