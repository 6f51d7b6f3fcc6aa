use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{ApprovalChain, AuditTrailEntry, PendingApproval, StepStatus};
use crate::pages::{PageAlerts, TableView, non_blank};
use crate::services::SwapApprovalService;

pub const NO_PENDING_APPROVALS: &str = "No pending approvals";

#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalRow {
    pub id: Uuid,
    pub requesting_employee: String,
    pub target_employee: String,
    pub shift: String,
    pub shift_type: String,
    pub level: String,
    pub delegated: bool,
}

impl From<&PendingApproval> for ApprovalRow {
    fn from(approval: &PendingApproval) -> Self {
        ApprovalRow {
            id: approval.id,
            requesting_employee: approval.requesting_employee_name.clone(),
            target_employee: approval
                .target_employee_name
                .clone()
                .unwrap_or_else(|| "Open swap".to_string()),
            shift: format!(
                "{} - {}",
                approval.shift_start.format("%b %d, %Y %H:%M"),
                approval.shift_end.format("%H:%M")
            ),
            shift_type: approval.shift_type.label().to_string(),
            level: level_label(approval.current_level, approval.total_levels),
            delegated: approval.is_delegated,
        }
    }
}

pub fn level_label(current: u32, total: u32) -> String {
    format!("Level {} of {}", current, total)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApproveDialog {
    pub approval_id: Uuid,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectDialog {
    pub approval_id: Uuid,
    pub reason: String,
    pub reason_error: Option<String>,
}

/// How a stepper renders each server-supplied step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Rejected,
    Waiting,
}

impl From<StepStatus> for StepState {
    fn from(status: StepStatus) -> Self {
        match status {
            StepStatus::Approved | StepStatus::AutoApproved | StepStatus::Skipped => {
                StepState::Completed
            }
            StepStatus::Rejected => StepState::Rejected,
            StepStatus::Pending => StepState::Waiting,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepView {
    pub label: String,
    pub approver: String,
    pub state: StepState,
    pub acted_at: Option<DateTime<Utc>>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalDetails {
    pub approval_id: Uuid,
    pub chain: ApprovalChain,
    pub audit_trail: Vec<AuditTrailEntry>,
}

impl ApprovalDetails {
    pub fn steps(&self) -> Vec<StepView> {
        self.chain
            .steps
            .iter()
            .map(|step| StepView {
                label: format!("Level {}", step.level),
                approver: match &step.approver_role {
                    Some(role) => format!("{} ({})", step.approver_name, role),
                    None => step.approver_name.clone(),
                },
                state: step.status.into(),
                acted_at: step.acted_at,
                comments: step.comments.clone(),
            })
            .collect()
    }

    /// Banner text when the server says remaining steps can be skipped
    pub fn auto_approval_notice(&self) -> Option<String> {
        if !self.chain.auto_approval_eligible {
            return None;
        }
        Some(match &self.chain.auto_approval_reason {
            Some(reason) => format!("Eligible for auto-approval: {}", reason),
            None => "Eligible for auto-approval".to_string(),
        })
    }
}

/// Swap requests awaiting the caller's approval
pub struct PendingApprovalsPage {
    service: SwapApprovalService,
    pub approvals: Vec<PendingApproval>,
    pub loading: bool,
    pub submitting: bool,
    pub alerts: PageAlerts,
    pub approve_dialog: Option<ApproveDialog>,
    pub reject_dialog: Option<RejectDialog>,
    pub details: Option<ApprovalDetails>,
    pub details_loading: bool,
}

impl PendingApprovalsPage {
    pub fn new(client: ApiClient) -> Self {
        Self {
            service: SwapApprovalService::new(client),
            approvals: Vec::new(),
            loading: false,
            submitting: false,
            alerts: PageAlerts::default(),
            approve_dialog: None,
            reject_dialog: None,
            details: None,
            details_loading: false,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        let result = self.service.pending().await;
        self.loading = false;

        match result {
            Ok(approvals) => {
                self.approvals = approvals;
                self.alerts.dismiss_error();
            }
            Err(err) => self.alerts.fail("Failed to load pending approvals", &err),
        }
    }

    pub fn rows(&self) -> TableView<ApprovalRow> {
        let rows = self.approvals.iter().map(ApprovalRow::from).collect();
        TableView::from_rows(self.loading, rows, NO_PENDING_APPROVALS)
    }

    pub fn open_approve(&mut self, approval_id: Uuid) {
        self.approve_dialog = Some(ApproveDialog {
            approval_id,
            comment: String::new(),
        });
    }

    pub fn set_approve_comment(&mut self, comment: impl Into<String>) {
        if let Some(dialog) = self.approve_dialog.as_mut() {
            dialog.comment = comment.into();
        }
    }

    pub fn close_approve(&mut self) {
        self.approve_dialog = None;
    }

    pub async fn confirm_approve(&mut self) -> ClientResult<()> {
        let Some(dialog) = self.approve_dialog.clone() else {
            return Ok(());
        };

        self.submitting = true;
        let result = self
            .service
            .approve(dialog.approval_id, non_blank(&dialog.comment))
            .await;
        self.submitting = false;

        match result {
            Ok(()) => {
                self.approve_dialog = None;
                self.alerts.succeed("Swap request approved");
                self.load().await;
                Ok(())
            }
            Err(err) => {
                self.alerts.fail("Failed to approve swap request", &err);
                Err(err)
            }
        }
    }

    pub fn open_reject(&mut self, approval_id: Uuid) {
        self.reject_dialog = Some(RejectDialog {
            approval_id,
            reason: String::new(),
            reason_error: None,
        });
    }

    pub fn set_reject_reason(&mut self, reason: impl Into<String>) {
        if let Some(dialog) = self.reject_dialog.as_mut() {
            dialog.reason = reason.into();
            dialog.reason_error = None;
        }
    }

    pub fn close_reject(&mut self) {
        self.reject_dialog = None;
    }

    /// The reason is mandatory; a blank one never reaches the server
    pub async fn confirm_reject(&mut self) -> ClientResult<()> {
        let Some(dialog) = self.reject_dialog.as_mut() else {
            return Ok(());
        };

        let Some(reason) = non_blank(&dialog.reason) else {
            let err = ClientError::validation("Rejection reason is required");
            dialog.reason_error = Some(err.display_message());
            log::warn!("Reject blocked: empty reason for {}", dialog.approval_id);
            return Err(err);
        };
        let approval_id = dialog.approval_id;

        self.submitting = true;
        let result = self.service.reject(approval_id, reason).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                self.reject_dialog = None;
                self.alerts.succeed("Swap request rejected");
                self.load().await;
                Ok(())
            }
            Err(err) => {
                self.alerts.fail("Failed to reject swap request", &err);
                Err(err)
            }
        }
    }

    /// Fetch chain and audit trail together; neither is shown unless both arrive
    pub async fn view_details(&mut self, approval_id: Uuid) -> ClientResult<()> {
        self.details = None;
        self.details_loading = true;
        let result = futures::try_join!(
            self.service.chain(approval_id),
            self.service.audit_trail(approval_id)
        );
        self.details_loading = false;

        match result {
            Ok((chain, audit_trail)) => {
                self.details = Some(ApprovalDetails {
                    approval_id,
                    chain,
                    audit_trail,
                });
                Ok(())
            }
            Err(err) => {
                self.alerts.fail("Failed to load approval details", &err);
                Err(err)
            }
        }
    }

    pub fn close_details(&mut self) {
        self.details = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApprovalStep;
    use pretty_assertions::assert_eq;

    fn step(level: u32, status: StepStatus) -> ApprovalStep {
        ApprovalStep {
            level,
            approver_name: format!("Approver {}", level),
            approver_role: (level == 1).then(|| "Team Lead".to_string()),
            status,
            acted_at: None,
            comments: None,
        }
    }

    #[test]
    fn test_steps_mirror_server_status() {
        let details = ApprovalDetails {
            approval_id: Uuid::new_v4(),
            chain: ApprovalChain {
                swap_request_id: Uuid::new_v4(),
                steps: vec![
                    step(1, StepStatus::Approved),
                    step(2, StepStatus::AutoApproved),
                    step(3, StepStatus::Pending),
                ],
                auto_approval_eligible: false,
                auto_approval_reason: None,
            },
            audit_trail: vec![],
        };

        let steps = details.steps();
        assert_eq!(steps[0].approver, "Approver 1 (Team Lead)");
        assert_eq!(steps[0].label, "Level 1");
        assert_eq!(
            steps.iter().map(|s| s.state).collect::<Vec<_>>(),
            vec![StepState::Completed, StepState::Completed, StepState::Waiting]
        );
        assert_eq!(details.auto_approval_notice(), None);
    }

    #[test]
    fn test_auto_approval_notice() {
        let details = ApprovalDetails {
            approval_id: Uuid::new_v4(),
            chain: ApprovalChain {
                swap_request_id: Uuid::new_v4(),
                steps: vec![step(1, StepStatus::Rejected)],
                auto_approval_eligible: true,
                auto_approval_reason: Some("same qualification".to_string()),
            },
            audit_trail: vec![],
        };

        assert_eq!(details.steps()[0].state, StepState::Rejected);
        assert_eq!(
            details.auto_approval_notice().as_deref(),
            Some("Eligible for auto-approval: same qualification")
        );
    }
}
