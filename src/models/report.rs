use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ShiftType, macros::string_enum};

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum ReportKind {
        Schedule => "schedule",
        Fairness => "fairness",
        LeaveBalance => "leave_balance",
        SwapHistory => "swap_history",
        EmployeeHours => "employee_hours",
        WeekendHoliday => "weekend_holiday",
    }
}

impl ReportKind {
    /// Endpoint path under `/reports`
    pub fn endpoint(&self) -> &'static str {
        match self {
            ReportKind::Schedule => "/reports/schedule",
            ReportKind::Fairness => "/reports/fairness",
            ReportKind::LeaveBalance => "/reports/leave-balance",
            ReportKind::SwapHistory => "/reports/swap-history",
            ReportKind::EmployeeHours => "/reports/employee-hours",
            ReportKind::WeekendHoliday => "/reports/weekend-holiday",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Schedule => "Schedule",
            ReportKind::Fairness => "Fairness",
            ReportKind::LeaveBalance => "Leave Balance",
            ReportKind::SwapHistory => "Swap History",
            ReportKind::EmployeeHours => "Employee Hours",
            ReportKind::WeekendHoliday => "Weekend & Holiday",
        }
    }

    /// Leave-balance and weekend/holiday reports are per year, the rest per date range
    pub fn uses_year(&self) -> bool {
        matches!(self, ReportKind::LeaveBalance | ReportKind::WeekendHoliday)
    }
}

/// Filter parameters shared by every report tab, sent as the query string
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleReportRow {
    pub date: NaiveDate,
    pub shift_type: ShiftType,
    pub employee_name: String,
    pub team_name: Option<String>,
    pub hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleReport {
    pub rows: Vec<ScheduleReportRow>,
    pub total_shifts: u32,
    pub total_hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FairnessReportRow {
    pub employee_name: String,
    pub total_shifts: u32,
    pub night_shifts: u32,
    pub weekend_shifts: u32,
    pub fairness_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FairnessReport {
    pub rows: Vec<FairnessReportRow>,
    pub average_score: f64,
    pub std_deviation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalanceRow {
    pub employee_name: String,
    pub entitled_days: f64,
    pub used_days: f64,
    pub remaining_days: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalanceReport {
    pub year: i32,
    pub rows: Vec<LeaveBalanceRow>,
    pub total_remaining_days: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwapHistoryRow {
    pub requested_at: DateTime<Utc>,
    pub shift_date: NaiveDate,
    pub requesting_employee: String,
    pub target_employee: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwapHistoryReport {
    pub rows: Vec<SwapHistoryRow>,
    pub total_requests: u32,
    pub approved: u32,
    pub rejected: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeHoursRow {
    pub employee_name: String,
    pub scheduled_hours: f64,
    pub worked_hours: f64,
    pub overtime_hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeHoursReport {
    pub rows: Vec<EmployeeHoursRow>,
    pub total_hours: f64,
    pub total_overtime_hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeekendHolidayRow {
    pub employee_name: String,
    pub weekend_shifts: u32,
    pub holiday_shifts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeekendHolidayReport {
    pub year: i32,
    pub rows: Vec<WeekendHolidayRow>,
    pub total_weekend_shifts: u32,
    pub total_holiday_shifts: u32,
}

/// A generated report, tagged by the tab that produced it
#[derive(Debug, Clone, PartialEq)]
pub enum ReportData {
    Schedule(ScheduleReport),
    Fairness(FairnessReport),
    LeaveBalance(LeaveBalanceReport),
    SwapHistory(SwapHistoryReport),
    EmployeeHours(EmployeeHoursReport),
    WeekendHoliday(WeekendHolidayReport),
}

impl ReportData {
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportData::Schedule(_) => ReportKind::Schedule,
            ReportData::Fairness(_) => ReportKind::Fairness,
            ReportData::LeaveBalance(_) => ReportKind::LeaveBalance,
            ReportData::SwapHistory(_) => ReportKind::SwapHistory,
            ReportData::EmployeeHours(_) => ReportKind::EmployeeHours,
            ReportData::WeekendHoliday(_) => ReportKind::WeekendHoliday,
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            ReportData::Schedule(r) => r.rows.len(),
            ReportData::Fairness(r) => r.rows.len(),
            ReportData::LeaveBalance(r) => r.rows.len(),
            ReportData::SwapHistory(r) => r.rows.len(),
            ReportData::EmployeeHours(r) => r.rows.len(),
            ReportData::WeekendHoliday(r) => r.rows.len(),
        }
    }
}
