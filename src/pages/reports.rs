use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{ReportData, ReportFilters, ReportKind};
use crate::pages::PageAlerts;
use crate::services::ReportService;

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryChip {
    pub label: String,
    pub value: String,
}

impl SummaryChip {
    fn new(label: &str, value: impl ToString) -> Self {
        SummaryChip {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

fn hours(value: f64) -> String {
    format!("{:.1}", value)
}

/// Tabular rendering of a generated report
pub fn report_table(data: &ReportData) -> ReportTable {
    match data {
        ReportData::Schedule(report) => ReportTable {
            headers: vec!["Date", "Shift", "Employee", "Team", "Hours"],
            rows: report
                .rows
                .iter()
                .map(|r| {
                    vec![
                        r.date.to_string(),
                        r.shift_type.label().to_string(),
                        r.employee_name.clone(),
                        r.team_name.clone().unwrap_or_else(|| "-".to_string()),
                        hours(r.hours),
                    ]
                })
                .collect(),
        },
        ReportData::Fairness(report) => ReportTable {
            headers: vec!["Employee", "Shifts", "Night", "Weekend", "Score"],
            rows: report
                .rows
                .iter()
                .map(|r| {
                    vec![
                        r.employee_name.clone(),
                        r.total_shifts.to_string(),
                        r.night_shifts.to_string(),
                        r.weekend_shifts.to_string(),
                        format!("{:.2}", r.fairness_score),
                    ]
                })
                .collect(),
        },
        ReportData::LeaveBalance(report) => ReportTable {
            headers: vec!["Employee", "Entitled", "Used", "Remaining"],
            rows: report
                .rows
                .iter()
                .map(|r| {
                    vec![
                        r.employee_name.clone(),
                        hours(r.entitled_days),
                        hours(r.used_days),
                        hours(r.remaining_days),
                    ]
                })
                .collect(),
        },
        ReportData::SwapHistory(report) => ReportTable {
            headers: vec!["Requested", "Shift date", "From", "To", "Status"],
            rows: report
                .rows
                .iter()
                .map(|r| {
                    vec![
                        r.requested_at.format("%Y-%m-%d %H:%M").to_string(),
                        r.shift_date.to_string(),
                        r.requesting_employee.clone(),
                        r.target_employee.clone().unwrap_or_else(|| "Open".to_string()),
                        r.status.clone(),
                    ]
                })
                .collect(),
        },
        ReportData::EmployeeHours(report) => ReportTable {
            headers: vec!["Employee", "Scheduled", "Worked", "Overtime"],
            rows: report
                .rows
                .iter()
                .map(|r| {
                    vec![
                        r.employee_name.clone(),
                        hours(r.scheduled_hours),
                        hours(r.worked_hours),
                        hours(r.overtime_hours),
                    ]
                })
                .collect(),
        },
        ReportData::WeekendHoliday(report) => ReportTable {
            headers: vec!["Employee", "Weekend shifts", "Holiday shifts"],
            rows: report
                .rows
                .iter()
                .map(|r| {
                    vec![
                        r.employee_name.clone(),
                        r.weekend_shifts.to_string(),
                        r.holiday_shifts.to_string(),
                    ]
                })
                .collect(),
        },
    }
}

pub fn summary_chips(data: &ReportData) -> Vec<SummaryChip> {
    match data {
        ReportData::Schedule(r) => vec![
            SummaryChip::new("Total shifts", r.total_shifts),
            SummaryChip::new("Total hours", hours(r.total_hours)),
        ],
        ReportData::Fairness(r) => vec![
            SummaryChip::new("Average score", format!("{:.2}", r.average_score)),
            SummaryChip::new("Std deviation", format!("{:.2}", r.std_deviation)),
        ],
        ReportData::LeaveBalance(r) => vec![
            SummaryChip::new("Year", r.year),
            SummaryChip::new("Days remaining", hours(r.total_remaining_days)),
        ],
        ReportData::SwapHistory(r) => vec![
            SummaryChip::new("Requests", r.total_requests),
            SummaryChip::new("Approved", r.approved),
            SummaryChip::new("Rejected", r.rejected),
        ],
        ReportData::EmployeeHours(r) => vec![
            SummaryChip::new("Total hours", hours(r.total_hours)),
            SummaryChip::new("Overtime", hours(r.total_overtime_hours)),
        ],
        ReportData::WeekendHoliday(r) => vec![
            SummaryChip::new("Year", r.year),
            SummaryChip::new("Weekend shifts", r.total_weekend_shifts),
            SummaryChip::new("Holiday shifts", r.total_holiday_shifts),
        ],
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportTabState {
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<ReportData>,
}

/// Six independent report tabs sharing one set of filters
pub struct ReportsDashboardPage {
    service: ReportService,
    pub filters: ReportFilters,
    pub active_tab: ReportKind,
    tabs: HashMap<ReportKind, ReportTabState>,
    pub alerts: PageAlerts,
}

impl ReportsDashboardPage {
    pub fn new(client: ApiClient) -> Self {
        Self {
            service: ReportService::new(client),
            filters: ReportFilters::default(),
            active_tab: ReportKind::Schedule,
            tabs: ReportKind::ALL
                .iter()
                .map(|kind| (*kind, ReportTabState::default()))
                .collect(),
            alerts: PageAlerts::default(),
        }
    }

    /// Switching tabs keeps whatever the other tabs already loaded
    pub fn switch_tab(&mut self, kind: ReportKind) {
        self.active_tab = kind;
    }

    pub fn tab(&self, kind: ReportKind) -> &ReportTabState {
        &self.tabs[&kind]
    }

    fn tab_mut(&mut self, kind: ReportKind) -> &mut ReportTabState {
        self.tabs.entry(kind).or_default()
    }

    pub fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.filters.start_date = start;
        self.filters.end_date = end;
    }

    pub fn set_team(&mut self, team_id: Option<Uuid>) {
        self.filters.team_id = team_id;
    }

    pub fn set_department(&mut self, department_id: Option<Uuid>) {
        self.filters.department_id = department_id;
    }

    pub fn set_year(&mut self, year: Option<i32>) {
        self.filters.year = year;
    }

    pub fn validate(&self, kind: ReportKind) -> ClientResult<()> {
        if kind.uses_year() {
            return match self.filters.year {
                Some(year) if (2000..=2100).contains(&year) => Ok(()),
                Some(_) => Err(ClientError::validation("Please enter a valid year")),
                None => Err(ClientError::validation("Year is required")),
            };
        }

        match (self.filters.start_date, self.filters.end_date) {
            (Some(start), Some(end)) if start > end => Err(ClientError::validation(
                "Start date must be before end date",
            )),
            (Some(_), Some(_)) => Ok(()),
            _ => Err(ClientError::validation(
                "Start date and end date are required",
            )),
        }
    }

    /// Run the report behind one tab with the shared filters
    pub async fn generate(&mut self, kind: ReportKind) -> ClientResult<()> {
        if let Err(err) = self.validate(kind) {
            log::warn!("{} report blocked: {}", kind.title(), err);
            self.tab_mut(kind).error = Some(err.display_message());
            return Err(err);
        }

        {
            let tab = self.tab_mut(kind);
            tab.loading = true;
            tab.error = None;
        }
        let result = self.service.generate(kind, &self.filters).await;

        let tab = self.tab_mut(kind);
        tab.loading = false;
        match result {
            Ok(data) => {
                log::debug!("{} report returned {} rows", kind.title(), data.row_count());
                tab.result = Some(data);
                Ok(())
            }
            Err(err) => {
                log::error!("Failed to generate {} report: {}", kind.title(), err);
                tab.error = Some(err.display_message());
                Err(err)
            }
        }
    }

    pub fn table(&self, kind: ReportKind) -> Option<ReportTable> {
        self.tab(kind).result.as_ref().map(report_table)
    }

    pub fn chips(&self, kind: ReportKind) -> Vec<SummaryChip> {
        self.tab(kind)
            .result
            .as_ref()
            .map(summary_chips)
            .unwrap_or_default()
    }

    pub fn dismiss_error(&mut self, kind: ReportKind) {
        self.tab_mut(kind).error = None;
    }
}
