use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use shiftlinkr_admin::models::{ReportData, ReportKind};
use shiftlinkr_admin::pages::ReportsDashboardPage;
use uuid::Uuid;

mod common;

use common::MockBackend;

fn schedule_report() -> serde_json::Value {
    json!({
        "rows": [
            {"date": "2025-03-03", "shiftType": "day", "employeeName": "Ana", "teamName": "ICU", "hours": 8.0},
            {"date": "2025-03-04", "shiftType": "night", "employeeName": "Ben", "teamName": null, "hours": 10.0},
        ],
        "totalShifts": 2,
        "totalHours": 18.0,
    })
}

fn leave_report(year: i32) -> serde_json::Value {
    json!({
        "year": year,
        "rows": [
            {"employeeName": "Ana", "entitledDays": 25.0, "usedDays": 10.0, "remainingDays": 15.0},
        ],
        "totalRemainingDays": 15.0,
    })
}

#[actix_web::test]
async fn test_date_range_report_sends_filters() {
    let backend = MockBackend::start().await;
    backend.ok("GET", "/reports/schedule", schedule_report());
    let team_id = Uuid::new_v4();

    let mut page = ReportsDashboardPage::new(backend.client());
    page.set_date_range(
        NaiveDate::from_ymd_opt(2025, 3, 1),
        NaiveDate::from_ymd_opt(2025, 3, 31),
    );
    page.set_team(Some(team_id));
    page.generate(ReportKind::Schedule).await.unwrap();

    let request = &backend.requests_to("GET", "/reports/schedule")[0];
    assert_eq!(request.query_param("startDate").as_deref(), Some("2025-03-01"));
    assert_eq!(request.query_param("endDate").as_deref(), Some("2025-03-31"));
    assert_eq!(request.query_param("teamId"), Some(team_id.to_string()));
    assert_eq!(request.query_param("departmentId"), None);
    assert_eq!(request.query_param("year"), None);

    let table = page.table(ReportKind::Schedule).unwrap();
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1][1], "Night");
    assert_eq!(table.rows[1][3], "-");
    assert_eq!(
        page.chips(ReportKind::Schedule)
            .into_iter()
            .map(|c| c.value)
            .collect::<Vec<_>>(),
        vec!["2", "18.0"]
    );
}

#[actix_web::test]
async fn test_year_report_hits_its_own_endpoint() {
    let backend = MockBackend::start().await;
    backend.ok("GET", "/reports/leave-balance", leave_report(2024));

    let mut page = ReportsDashboardPage::new(backend.client());
    page.set_year(Some(2024));
    page.generate(ReportKind::LeaveBalance).await.unwrap();

    let request = &backend.requests_to("GET", "/reports/leave-balance")[0];
    assert_eq!(request.query_param("year").as_deref(), Some("2024"));
    assert!(matches!(
        page.tab(ReportKind::LeaveBalance).result,
        Some(ReportData::LeaveBalance(_))
    ));
}

#[actix_web::test]
async fn test_invalid_filters_block_request() {
    let backend = MockBackend::start().await;

    let mut page = ReportsDashboardPage::new(backend.client());
    page.set_year(Some(1850));
    assert!(page.generate(ReportKind::WeekendHoliday).await.is_err());
    assert!(page.generate(ReportKind::Fairness).await.is_err());

    assert_eq!(
        page.tab(ReportKind::WeekendHoliday).error.as_deref(),
        Some("Please enter a valid year")
    );
    assert_eq!(
        page.tab(ReportKind::Fairness).error.as_deref(),
        Some("Start date and end date are required")
    );
    assert!(backend.requests().is_empty());
}

#[actix_web::test]
async fn test_tabs_keep_their_data() {
    let backend = MockBackend::start().await;
    backend.ok("GET", "/reports/schedule", schedule_report());
    backend.ok("GET", "/reports/leave-balance", leave_report(2025));

    let mut page = ReportsDashboardPage::new(backend.client());
    page.set_date_range(
        NaiveDate::from_ymd_opt(2025, 3, 1),
        NaiveDate::from_ymd_opt(2025, 3, 31),
    );
    page.set_year(Some(2025));
    page.generate(ReportKind::Schedule).await.unwrap();

    page.switch_tab(ReportKind::LeaveBalance);
    page.generate(ReportKind::LeaveBalance).await.unwrap();
    page.switch_tab(ReportKind::Schedule);

    assert_eq!(page.active_tab, ReportKind::Schedule);
    assert_eq!(page.table(ReportKind::Schedule).unwrap().rows.len(), 2);
    assert_eq!(page.table(ReportKind::LeaveBalance).unwrap().rows.len(), 1);
    assert!(page.table(ReportKind::Fairness).is_none());
    assert_eq!(backend.count("GET", "/reports/schedule"), 1);
}

#[actix_web::test]
async fn test_failure_is_scoped_to_its_tab() {
    let backend = MockBackend::start().await;
    backend.ok("GET", "/reports/schedule", schedule_report());
    backend.respond(
        "GET",
        "/reports/swap-history",
        500,
        json!({"message": "Report engine busy"}),
    );

    let mut page = ReportsDashboardPage::new(backend.client());
    page.set_date_range(
        NaiveDate::from_ymd_opt(2025, 3, 1),
        NaiveDate::from_ymd_opt(2025, 3, 31),
    );
    page.generate(ReportKind::Schedule).await.unwrap();
    assert!(page.generate(ReportKind::SwapHistory).await.is_err());

    assert_eq!(
        page.tab(ReportKind::SwapHistory).error.as_deref(),
        Some("Report engine busy")
    );
    assert_eq!(page.tab(ReportKind::Schedule).error, None);
    assert!(page.tab(ReportKind::Schedule).result.is_some());

    page.dismiss_error(ReportKind::SwapHistory);
    assert_eq!(page.tab(ReportKind::SwapHistory).error, None);
}
