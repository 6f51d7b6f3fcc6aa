use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{Permission, PermissionCheck, Role, UpdateUserRoleInput, User};

#[derive(Clone, Debug)]
pub struct RoleService {
    client: ApiClient,
}

impl RoleService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn roles(&self) -> ClientResult<Vec<Role>> {
        self.client.get("/roles").await
    }

    pub async fn permissions(&self, role: &str) -> ClientResult<Vec<Permission>> {
        self.client
            .get(&format!("/roles/{}/permissions", urlencoding::encode(role)))
            .await
    }

    pub async fn update_user_role(&self, user_id: Uuid, role: String) -> ClientResult<User> {
        self.client
            .patch(
                &format!("/admin/users/{}/role", user_id),
                &UpdateUserRoleInput { role },
            )
            .await
    }

    /// Ask the server whether the caller holds `permission`
    pub async fn check_permission(&self, permission: &str) -> ClientResult<bool> {
        let check: PermissionCheck = self
            .client
            .get_query("/permissions/check", &[("permission", permission)])
            .await?;

        Ok(check.allowed)
    }
}
