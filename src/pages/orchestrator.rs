use chrono::NaiveDate;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    ApplyRequest, AutoOverview, OrchestrationPreview, PreviewRequest, ShiftType, Team,
};
use crate::pages::PageAlerts;
use crate::services::{OrchestratorService, OrganizationService};

/// Three shift-type checkboxes of which at most one is ever checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftTypeSelection {
    selected: Option<ShiftType>,
}

impl ShiftTypeSelection {
    /// Checking a box clears the other two; unchecking clears it
    pub fn toggle(&mut self, shift_type: ShiftType, checked: bool) {
        if checked {
            self.selected = Some(shift_type);
        } else if self.selected == Some(shift_type) {
            self.selected = None;
        }
    }

    pub fn is_checked(&self, shift_type: ShiftType) -> bool {
        self.selected == Some(shift_type)
    }

    pub fn selected(&self) -> Option<ShiftType> {
        self.selected
    }

    pub fn as_vec(&self) -> Vec<ShiftType> {
        self.selected.into_iter().collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrchestratorForm {
    pub team_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub shift_types: ShiftTypeSelection,
}

impl OrchestratorForm {
    pub fn validate(&self) -> ClientResult<PreviewRequest> {
        let team_id = self
            .team_id
            .ok_or_else(|| ClientError::validation("Please select a team"))?;
        let (start_date, end_date) = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(ClientError::validation(
                    "Start date and end date are required",
                ));
            }
        };
        if start_date > end_date {
            return Err(ClientError::validation(
                "Start date must be before end date",
            ));
        }
        let shift_types = self.shift_types.as_vec();
        if shift_types.is_empty() {
            return Err(ClientError::validation(
                "Please select at least one shift type",
            ));
        }

        Ok(PreviewRequest {
            team_id,
            start_date,
            end_date,
            shift_types,
        })
    }
}

/// Schedule generation: preview a run, apply it, and manage rolling plans
pub struct OrchestratorPage {
    orchestrator: OrchestratorService,
    organization: OrganizationService,
    pub teams: Vec<Team>,
    pub form: OrchestratorForm,
    pub preview: Option<OrchestrationPreview>,
    pub overview: Option<AutoOverview>,
    pub loading: bool,
    pub applying: bool,
    pub alerts: PageAlerts,
}

impl OrchestratorPage {
    pub fn new(client: ApiClient) -> Self {
        Self {
            orchestrator: OrchestratorService::new(client.clone()),
            organization: OrganizationService::new(client),
            teams: Vec::new(),
            form: OrchestratorForm::default(),
            preview: None,
            overview: None,
            loading: false,
            applying: false,
            alerts: PageAlerts::default(),
        }
    }

    /// Load teams and the rolling-plan overview together
    pub async fn mount(&mut self) {
        self.alerts.dismiss_error();
        self.loading = true;
        let (teams, overview) = futures::join!(
            self.organization.teams(),
            self.orchestrator.auto_overview()
        );
        self.loading = false;

        match teams {
            Ok(teams) => self.teams = teams,
            Err(err) => self.alerts.fail("Failed to load teams", &err),
        }
        match overview {
            Ok(overview) => self.overview = Some(overview),
            Err(err) => self.alerts.fail("Failed to load rolling plan overview", &err),
        }
    }

    pub fn select_team(&mut self, team_id: Option<Uuid>) {
        self.form.team_id = team_id;
    }

    pub fn set_date_range(&mut self, start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) {
        self.form.start_date = start_date;
        self.form.end_date = end_date;
    }

    pub fn toggle_shift_type(&mut self, shift_type: ShiftType, checked: bool) {
        self.form.shift_types.toggle(shift_type, checked);
    }

    /// Ask the server for candidate assignments; nothing is committed
    pub async fn submit_preview(&mut self) -> ClientResult<()> {
        self.alerts.clear();

        let request = match self.form.validate() {
            Ok(request) => request,
            Err(err) => {
                self.alerts.fail("Orchestrator form invalid", &err);
                return Err(err);
            }
        };

        self.loading = true;
        let result = self.orchestrator.preview(&request).await;
        self.loading = false;

        match result {
            Ok(preview) => {
                log::info!(
                    "Preview {} generated with {} assignments",
                    preview.preview_id,
                    preview.assignments.len()
                );
                self.preview = Some(preview);
                Ok(())
            }
            Err(err) => {
                self.alerts.fail("Failed to generate preview", &err);
                Err(err)
            }
        }
    }

    /// Commit the current preview
    pub async fn apply(&mut self) -> ClientResult<()> {
        let Some(preview_id) = self.preview.as_ref().map(|p| p.preview_id) else {
            let err = ClientError::validation("Generate a preview before applying");
            self.alerts.fail("Apply without preview", &err);
            return Err(err);
        };

        self.applying = true;
        let result = self.orchestrator.apply(&ApplyRequest { preview_id }).await;
        self.applying = false;

        match result {
            Ok(applied) => {
                self.preview = None;
                self.alerts.succeed(format!(
                    "Schedule applied: {} shifts created",
                    applied.shifts_created
                ));
                self.refresh_overview().await;
                Ok(())
            }
            Err(err) => {
                self.alerts.fail("Failed to apply schedule", &err);
                Err(err)
            }
        }
    }

    /// Flip a rolling plan, then show whatever the server reports back
    pub async fn toggle_rolling(&mut self, shift_type: ShiftType, enabled: bool) -> ClientResult<()> {
        if let Err(err) = self.orchestrator.toggle_rolling(shift_type, enabled).await {
            self.alerts.fail("Failed to toggle rolling plan", &err);
            return Err(err);
        }

        self.refresh_overview().await;
        Ok(())
    }

    pub async fn refresh_overview(&mut self) {
        match self.orchestrator.auto_overview().await {
            Ok(overview) => self.overview = Some(overview),
            Err(err) => self.alerts.fail("Failed to load rolling plan overview", &err),
        }
    }

    pub fn is_rolling_enabled(&self, shift_type: ShiftType) -> bool {
        self.overview
            .as_ref()
            .is_some_and(|o| o.is_enabled(shift_type))
    }

    pub fn can_apply(&self) -> bool {
        self.preview.is_some() && !self.applying
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shift_types_are_mutually_exclusive_in_every_order() {
        let orders = [
            [ShiftType::Day, ShiftType::Night, ShiftType::Weekend],
            [ShiftType::Day, ShiftType::Weekend, ShiftType::Night],
            [ShiftType::Night, ShiftType::Day, ShiftType::Weekend],
            [ShiftType::Night, ShiftType::Weekend, ShiftType::Day],
            [ShiftType::Weekend, ShiftType::Day, ShiftType::Night],
            [ShiftType::Weekend, ShiftType::Night, ShiftType::Day],
        ];

        for order in orders {
            let mut selection = ShiftTypeSelection::default();
            for shift_type in order {
                selection.toggle(shift_type, true);
                for other in ShiftType::ALL {
                    assert_eq!(selection.is_checked(*other), *other == shift_type);
                }
            }
        }
    }

    #[test]
    fn test_unchecking_other_box_keeps_selection() {
        let mut selection = ShiftTypeSelection::default();
        selection.toggle(ShiftType::Night, true);
        selection.toggle(ShiftType::Day, false);
        assert_eq!(selection.selected(), Some(ShiftType::Night));

        selection.toggle(ShiftType::Night, false);
        assert_eq!(selection.selected(), None);
    }

    fn valid_form() -> OrchestratorForm {
        let mut form = OrchestratorForm {
            team_id: Some(Uuid::new_v4()),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 31),
            ..Default::default()
        };
        form.shift_types.toggle(ShiftType::Day, true);
        form
    }

    #[test]
    fn test_valid_form_builds_request() {
        let request = valid_form().validate().unwrap();
        assert_eq!(request.shift_types, vec![ShiftType::Day]);
    }

    #[test]
    fn test_form_rejects_reversed_dates() {
        let mut form = valid_form();
        form.start_date = NaiveDate::from_ymd_opt(2025, 4, 1);
        assert_eq!(
            form.validate().unwrap_err().display_message(),
            "Start date must be before end date"
        );
    }

    #[test]
    fn test_form_requires_each_field() {
        let mut no_team = valid_form();
        no_team.team_id = None;
        assert!(no_team.validate().unwrap_err().is_validation());

        let mut no_end = valid_form();
        no_end.end_date = None;
        assert!(no_end.validate().unwrap_err().is_validation());

        let mut no_type = valid_form();
        no_type.shift_types = ShiftTypeSelection::default();
        assert_eq!(
            no_type.validate().unwrap_err().display_message(),
            "Please select at least one shift type"
        );
    }
}
