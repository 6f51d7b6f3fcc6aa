//! Headless page controllers.
//!
//! Each page owns its local view state and exposes user-triggered handlers as
//! async methods. Rendering is left to the caller; pages expose view helpers
//! (`rows()`, placeholders, chips) describing what should be shown.

pub mod notifications;
pub mod orchestrator;
pub mod orchestrator_history;
pub mod pending_approvals;
pub mod pending_users;
pub mod profile;
pub mod reports;
pub mod role_management;
pub mod team_management;
pub mod template_library;
pub mod verify_email;

pub use notifications::NotificationListPage;
pub use orchestrator::OrchestratorPage;
pub use orchestrator_history::OrchestratorHistoryPage;
pub use pending_approvals::PendingApprovalsPage;
pub use pending_users::PendingUsersPage;
pub use profile::ProfilePage;
pub use reports::ReportsDashboardPage;
pub use role_management::RoleManagementPage;
pub use team_management::TeamManagementPage;
pub use template_library::ShiftTemplateLibraryPage;
pub use verify_email::VerifyEmailPage;

use uuid::Uuid;

use crate::error::ClientError;

/// Dismissible error/success banners shown at the top of a page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageAlerts {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl PageAlerts {
    /// Record a failed call; validation problems are expected, everything else is logged
    pub fn fail(&mut self, context: &str, err: &ClientError) {
        if err.is_validation() {
            log::warn!("{}: {}", context, err);
        } else {
            log::error!("{}: {}", context, err);
        }
        self.success = None;
        self.error = Some(err.display_message());
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.error = None;
        self.success = Some(message.into());
    }

    pub fn clear(&mut self) {
        self.error = None;
        self.success = None;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn dismiss_success(&mut self) {
        self.success = None;
    }
}

/// What a table area renders
#[derive(Debug, Clone, PartialEq)]
pub enum TableView<R> {
    Loading,
    /// A single placeholder row with this text
    Empty(&'static str),
    Rows(Vec<R>),
}

impl<R> TableView<R> {
    pub fn from_rows(loading: bool, rows: Vec<R>, empty: &'static str) -> Self {
        if loading {
            TableView::Loading
        } else if rows.is_empty() {
            TableView::Empty(empty)
        } else {
            TableView::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[R] {
        match self {
            TableView::Rows(rows) => rows,
            _ => &[],
        }
    }
}

/// Whether a form dialog creates a new record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Edit(Uuid),
}

/// Trimmed, `None` when blank
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Fails with "`<field>` is required" when blank
pub(crate) fn require(value: &str, field: &str) -> Result<String, ClientError> {
    non_blank(value).ok_or_else(|| ClientError::validation(format!("{} is required", field)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_view_placeholder() {
        let view: TableView<u32> = TableView::from_rows(false, vec![], "Nothing here");
        assert_eq!(view, TableView::Empty("Nothing here"));
        assert!(view.rows().is_empty());

        let loading: TableView<u32> = TableView::from_rows(true, vec![1], "Nothing here");
        assert_eq!(loading, TableView::Loading);
    }

    #[test]
    fn test_require_trims() {
        assert_eq!(require("  Night crew ", "Name").unwrap(), "Night crew");
        assert_eq!(
            require("   ", "Name").unwrap_err().display_message(),
            "Name is required"
        );
    }

    #[test]
    fn test_alerts_replace_each_other() {
        let mut alerts = PageAlerts::default();
        alerts.succeed("Saved");
        alerts.fail("save", &ClientError::validation("Name is required"));
        assert_eq!(alerts.success, None);
        assert_eq!(alerts.error.as_deref(), Some("Name is required"));

        alerts.dismiss_error();
        assert_eq!(alerts, PageAlerts::default());
    }
}
