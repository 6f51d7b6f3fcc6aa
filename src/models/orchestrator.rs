use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ShiftType, macros::string_enum};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub team_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub shift_types: Vec<ShiftType>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreviewAssignment {
    pub shift_date: NaiveDate,
    pub shift_type: ShiftType,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub fairness_score: Option<f64>,
}

/// Candidate assignments computed by the server, not yet committed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationPreview {
    pub preview_id: Uuid,
    pub team_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub assignments: Vec<PreviewAssignment>,
    pub fairness_score: Option<f64>,
    #[serde(default)]
    pub unassigned_shifts: u32,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub preview_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplyResult {
    pub run_id: Uuid,
    pub shifts_created: u32,
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum RunStatus {
        Running => "running",
        Completed => "completed",
        Failed => "failed",
        Cancelled => "cancelled",
        Preview => "preview",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationRun {
    pub id: Uuid,
    pub status: RunStatus,
    pub team_name: Option<String>,
    pub total_shifts: u32,
    pub assigned_shifts: u32,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub initiated_by: String,
    pub error_message: Option<String>,
}

impl OrchestrationRun {
    pub fn duration(&self) -> Option<Duration> {
        self.completed_at.map(|done| done - self.started_at)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RollingPlanStatus {
    pub shift_type: ShiftType,
    pub enabled: bool,
    pub last_generated_at: Option<DateTime<Utc>>,
    pub next_generation_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AutoOverview {
    pub plans: Vec<RollingPlanStatus>,
}

impl AutoOverview {
    pub fn plan(&self, shift_type: ShiftType) -> Option<&RollingPlanStatus> {
        self.plans.iter().find(|p| p.shift_type == shift_type)
    }

    pub fn is_enabled(&self, shift_type: ShiftType) -> bool {
        self.plan(shift_type).is_some_and(|p| p.enabled)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingToggleRequest {
    pub shift_type: ShiftType,
    pub enabled: bool,
}
