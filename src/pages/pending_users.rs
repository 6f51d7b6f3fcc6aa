use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::PendingUser;
use crate::pages::{PageAlerts, TableView, non_blank};
use crate::services::AdminService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationDecision {
    Approve,
    Reject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmDialog {
    pub user: PendingUser,
    pub decision: RegistrationDecision,
    pub reason: String,
}

impl ConfirmDialog {
    pub fn title(&self) -> String {
        match self.decision {
            RegistrationDecision::Approve => format!("Approve {}?", self.user.name),
            RegistrationDecision::Reject => format!("Reject {}?", self.user.name),
        }
    }
}

/// Self-registrations waiting for an administrator
pub struct PendingUsersPage {
    service: AdminService,
    pub users: Vec<PendingUser>,
    pub loading: bool,
    pub submitting: bool,
    pub alerts: PageAlerts,
    pub dialog: Option<ConfirmDialog>,
}

impl PendingUsersPage {
    pub fn new(client: ApiClient) -> Self {
        Self {
            service: AdminService::new(client),
            users: Vec::new(),
            loading: false,
            submitting: false,
            alerts: PageAlerts::default(),
            dialog: None,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        let result = self.service.pending_users().await;
        self.loading = false;

        match result {
            Ok(users) => {
                self.users = users;
                self.alerts.dismiss_error();
            }
            Err(err) => self.alerts.fail("Failed to load pending users", &err),
        }
    }

    pub fn rows(&self) -> TableView<PendingUser> {
        TableView::from_rows(self.loading, self.users.clone(), "No pending registrations")
    }

    pub fn open_dialog(&mut self, user_id: Uuid, decision: RegistrationDecision) {
        self.dialog = self
            .users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .map(|user| ConfirmDialog {
                user,
                decision,
                reason: String::new(),
            });
    }

    pub fn set_reason(&mut self, reason: impl Into<String>) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.reason = reason.into();
        }
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    pub async fn confirm(&mut self) -> ClientResult<()> {
        let Some(dialog) = self.dialog.clone() else {
            return Ok(());
        };

        self.submitting = true;
        let result = match dialog.decision {
            RegistrationDecision::Approve => self.service.approve_user(dialog.user.id).await,
            RegistrationDecision::Reject => {
                self.service
                    .reject_user(dialog.user.id, non_blank(&dialog.reason))
                    .await
            }
        };
        self.submitting = false;

        match result {
            Ok(()) => {
                self.dialog = None;
                self.alerts.succeed(match dialog.decision {
                    RegistrationDecision::Approve => format!("{} approved", dialog.user.name),
                    RegistrationDecision::Reject => format!("{} rejected", dialog.user.name),
                });
                self.load().await;
                Ok(())
            }
            Err(err) => {
                self.alerts.fail("Failed to process registration", &err);
                Err(err)
            }
        }
    }
}
