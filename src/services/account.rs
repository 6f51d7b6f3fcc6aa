use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{ChangePasswordInput, Profile, UpdateProfileInput, VerifyEmailResult};

/// The signed-in user's own account
#[derive(Clone, Debug)]
pub struct AccountService {
    client: ApiClient,
}

impl AccountService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn profile(&self) -> ClientResult<Profile> {
        self.client.get("/auth/me").await
    }

    pub async fn update_profile(&self, input: &UpdateProfileInput) -> ClientResult<Profile> {
        self.client.put("/auth/me", input).await
    }

    pub async fn change_password(&self, input: &ChangePasswordInput) -> ClientResult<()> {
        self.client.post_empty("/auth/change-password", input).await
    }

    pub async fn verify_email(&self, token: &str) -> ClientResult<VerifyEmailResult> {
        self.client
            .get(&format!("/auth/verify-email/{}", urlencoding::encode(token)))
            .await
    }
}
