use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ShiftType, macros::string_enum};

/// A swap request waiting on the caller's sign-off
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PendingApproval {
    pub id: Uuid,
    pub swap_request_id: Uuid,
    pub requesting_employee_id: Uuid,
    pub requesting_employee_name: String,
    pub target_employee_id: Option<Uuid>,
    pub target_employee_name: Option<String>,
    pub shift_start: DateTime<Utc>,
    pub shift_end: DateTime<Utc>,
    pub shift_type: ShiftType,
    pub current_level: u32,
    pub total_levels: u32,
    #[serde(default)]
    pub is_delegated: bool,
    pub delegated_from: Option<String>,
    pub reason: Option<String>,
    pub requested_at: DateTime<Utc>,
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum StepStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Skipped => "skipped",
        AutoApproved => "auto_approved",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalStep {
    pub level: u32,
    pub approver_name: String,
    pub approver_role: Option<String>,
    pub status: StepStatus,
    pub acted_at: Option<DateTime<Utc>>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalChain {
    pub swap_request_id: Uuid,
    pub steps: Vec<ApprovalStep>,
    #[serde(default)]
    pub auto_approval_eligible: bool,
    pub auto_approval_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditTrailEntry {
    pub id: Uuid,
    pub action: String,
    pub actor_name: String,
    pub timestamp: DateTime<Utc>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApproveSwapInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectSwapInput {
    pub reason: String,
}
