use std::time::Duration;

use moka::future::Cache;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{Permission, Role, User};
use crate::pages::{PageAlerts, TableView};
use crate::services::{OrganizationService, RoleService};

pub const MANAGE_ROLES_PERMISSION: &str = "roles.manage";

#[derive(Debug, Clone, PartialEq)]
pub struct RoleChangeDialog {
    pub user_id: Uuid,
    pub user_name: String,
    pub current_role: String,
    pub selected_role: String,
    pub permission_preview: Option<Vec<Permission>>,
    pub preview_loading: bool,
}

/// User list with a change-role dialog that previews the new role's permissions
pub struct RoleManagementPage {
    roles_service: RoleService,
    organization: OrganizationService,
    permission_cache: Cache<String, Vec<Permission>>,
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub can_manage: bool,
    pub loading: bool,
    pub submitting: bool,
    pub alerts: PageAlerts,
    pub dialog: Option<RoleChangeDialog>,
}

impl RoleManagementPage {
    pub fn new(client: ApiClient) -> Self {
        Self {
            roles_service: RoleService::new(client.clone()),
            organization: OrganizationService::new(client),
            permission_cache: Cache::builder()
                .max_capacity(64)
                .time_to_live(Duration::from_secs(300))
                .build(),
            users: Vec::new(),
            roles: Vec::new(),
            can_manage: false,
            loading: false,
            submitting: false,
            alerts: PageAlerts::default(),
            dialog: None,
        }
    }

    /// Users, roles and the caller's manage permission, fetched together
    pub async fn mount(&mut self) {
        self.loading = true;
        let result = futures::try_join!(
            self.organization.users(),
            self.roles_service.roles(),
            self.roles_service.check_permission(MANAGE_ROLES_PERMISSION)
        );
        self.loading = false;

        match result {
            Ok((users, roles, can_manage)) => {
                self.users = users;
                self.roles = roles;
                self.can_manage = can_manage;
                self.alerts.dismiss_error();
            }
            Err(err) => self.alerts.fail("Failed to load users and roles", &err),
        }
    }

    pub async fn reload_users(&mut self) {
        match self.organization.users().await {
            Ok(users) => {
                self.users = users;
                self.alerts.dismiss_error();
            }
            Err(err) => self.alerts.fail("Failed to load users", &err),
        }
    }

    pub fn rows(&self) -> TableView<User> {
        TableView::from_rows(self.loading, self.users.clone(), "No users found")
    }

    pub fn role_display_name<'a>(&'a self, role: &'a str) -> &'a str {
        self.roles
            .iter()
            .find(|r| r.name == role)
            .map(|r| r.display_name.as_str())
            .unwrap_or(role)
    }

    pub fn open_dialog(&mut self, user_id: Uuid) {
        self.dialog = self
            .users
            .iter()
            .find(|u| u.id == user_id)
            .map(|user| RoleChangeDialog {
                user_id: user.id,
                user_name: user.name.clone(),
                current_role: user.role.clone(),
                selected_role: user.role.clone(),
                permission_preview: None,
                preview_loading: false,
            });
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// Pick a role in the dialog and preview what it grants
    pub async fn select_role(&mut self, role: &str) -> ClientResult<()> {
        let Some(dialog) = self.dialog.as_mut() else {
            return Ok(());
        };
        dialog.selected_role = role.to_string();
        dialog.permission_preview = None;
        dialog.preview_loading = true;

        let result = self.permissions_for(role).await;

        if let Some(dialog) = self.dialog.as_mut() {
            dialog.preview_loading = false;
            if let Ok(permissions) = &result {
                dialog.permission_preview = Some(permissions.clone());
            }
        }

        result.map(|_| ()).inspect_err(|err| {
            self.alerts.fail("Failed to load role permissions", err);
        })
    }

    async fn permissions_for(&self, role: &str) -> ClientResult<Vec<Permission>> {
        if let Some(cached) = self.permission_cache.get(role).await {
            return Ok(cached);
        }

        let permissions = self.roles_service.permissions(role).await?;
        self.permission_cache
            .insert(role.to_string(), permissions.clone())
            .await;
        Ok(permissions)
    }

    pub async fn confirm_role_change(&mut self) -> ClientResult<()> {
        let Some(dialog) = self.dialog.clone() else {
            return Ok(());
        };

        if !self.can_manage {
            let err = ClientError::Permission(
                "You do not have permission to manage roles".to_string(),
            );
            self.alerts.fail("Role change blocked", &err);
            return Err(err);
        }
        if dialog.selected_role == dialog.current_role {
            let err = ClientError::validation("Select a different role");
            self.alerts.fail("Role change blocked", &err);
            return Err(err);
        }

        self.submitting = true;
        let result = self
            .roles_service
            .update_user_role(dialog.user_id, dialog.selected_role.clone())
            .await;
        self.submitting = false;

        match result {
            Ok(_) => {
                let message = format!(
                    "{} is now {}",
                    dialog.user_name,
                    self.role_display_name(&dialog.selected_role)
                );
                self.dialog = None;
                self.alerts.succeed(message);
                self.reload_users().await;
                Ok(())
            }
            Err(err) => {
                self.alerts.fail("Failed to change role", &err);
                Err(err)
            }
        }
    }
}
