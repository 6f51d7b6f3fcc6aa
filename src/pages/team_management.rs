use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    AddTeamMemberInput, Department, DepartmentInput, Team, TeamInput, TeamMember, TeamRole, User,
};
use crate::pages::{DialogMode, PageAlerts, TableView, non_blank, require};
use crate::services::OrganizationService;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamForm {
    pub name: String,
    pub description: String,
    pub department_id: Option<Uuid>,
}

impl TeamForm {
    fn from_team(team: &Team) -> Self {
        TeamForm {
            name: team.name.clone(),
            description: team.description.clone().unwrap_or_default(),
            department_id: team.department_id,
        }
    }

    pub fn validate(&self) -> ClientResult<TeamInput> {
        Ok(TeamInput {
            name: require(&self.name, "Team name")?,
            description: non_blank(&self.description),
            department_id: self.department_id,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepartmentForm {
    pub name: String,
    pub description: String,
}

impl DepartmentForm {
    pub fn validate(&self) -> ClientResult<DepartmentInput> {
        Ok(DepartmentInput {
            name: require(&self.name, "Department name")?,
            description: non_blank(&self.description),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamDialog {
    pub mode: DialogMode,
    pub form: TeamForm,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentDialog {
    pub mode: DialogMode,
    pub form: DepartmentForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Team(Uuid),
    Department(Uuid),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberDialog {
    pub user_id: Option<Uuid>,
    pub role: TeamRole,
}

/// Teams, departments and team membership
pub struct TeamManagementPage {
    service: OrganizationService,
    pub teams: Vec<Team>,
    pub departments: Vec<Department>,
    pub users: Vec<User>,
    pub search: String,
    pub loading: bool,
    pub submitting: bool,
    pub alerts: PageAlerts,
    pub team_dialog: Option<TeamDialog>,
    pub department_dialog: Option<DepartmentDialog>,
    pub delete_confirm: Option<DeleteTarget>,
    pub selected_team: Option<Uuid>,
    pub members: Vec<TeamMember>,
    pub members_loading: bool,
    pub member_dialog: Option<MemberDialog>,
}

impl TeamManagementPage {
    pub fn new(client: ApiClient) -> Self {
        Self {
            service: OrganizationService::new(client),
            teams: Vec::new(),
            departments: Vec::new(),
            users: Vec::new(),
            search: String::new(),
            loading: false,
            submitting: false,
            alerts: PageAlerts::default(),
            team_dialog: None,
            department_dialog: None,
            delete_confirm: None,
            selected_team: None,
            members: Vec::new(),
            members_loading: false,
            member_dialog: None,
        }
    }

    /// Teams, departments and users arrive together or not at all
    pub async fn load(&mut self) {
        self.loading = true;
        let result = futures::try_join!(
            self.service.teams(),
            self.service.departments(),
            self.service.users()
        );
        self.loading = false;

        match result {
            Ok((teams, departments, users)) => {
                self.teams = teams;
                self.departments = departments;
                self.users = users;
                self.alerts.dismiss_error();
            }
            Err(err) => self.alerts.fail("Failed to load teams", &err),
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Teams matching the search text, case-insensitive over name and description
    pub fn filtered_teams(&self) -> Vec<&Team> {
        let needle = self.search.trim().to_lowercase();
        self.teams
            .iter()
            .filter(|team| {
                needle.is_empty()
                    || team.name.to_lowercase().contains(&needle)
                    || team
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn team_rows(&self) -> TableView<Team> {
        let rows = self.filtered_teams().into_iter().cloned().collect();
        TableView::from_rows(self.loading, rows, "No teams found")
    }

    pub fn department_name(&self, department_id: Option<Uuid>) -> Option<&str> {
        let id = department_id?;
        self.departments
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.name.as_str())
    }

    // Team dialogs

    pub fn open_create_team(&mut self) {
        self.team_dialog = Some(TeamDialog {
            mode: DialogMode::Create,
            form: TeamForm::default(),
        });
    }

    pub fn open_edit_team(&mut self, team_id: Uuid) {
        self.team_dialog = self.teams.iter().find(|t| t.id == team_id).map(|team| TeamDialog {
            mode: DialogMode::Edit(team.id),
            form: TeamForm::from_team(team),
        });
    }

    pub fn team_form_mut(&mut self) -> Option<&mut TeamForm> {
        self.team_dialog.as_mut().map(|d| &mut d.form)
    }

    pub fn close_team_dialog(&mut self) {
        self.team_dialog = None;
    }

    pub async fn save_team(&mut self) -> ClientResult<()> {
        let Some(dialog) = self.team_dialog.clone() else {
            return Ok(());
        };
        let input = match dialog.form.validate() {
            Ok(input) => input,
            Err(err) => {
                self.alerts.fail("Team form invalid", &err);
                return Err(err);
            }
        };

        self.submitting = true;
        let result = match dialog.mode {
            DialogMode::Create => self.service.create_team(&input).await,
            DialogMode::Edit(id) => self.service.update_team(id, &input).await,
        };
        self.submitting = false;

        match result {
            Ok(team) => {
                self.team_dialog = None;
                self.alerts.succeed(match dialog.mode {
                    DialogMode::Create => format!("Team {} created", team.name),
                    DialogMode::Edit(_) => format!("Team {} updated", team.name),
                });
                self.load().await;
                Ok(())
            }
            Err(err) => {
                self.alerts.fail("Failed to save team", &err);
                Err(err)
            }
        }
    }

    // Department dialogs

    pub fn open_create_department(&mut self) {
        self.department_dialog = Some(DepartmentDialog {
            mode: DialogMode::Create,
            form: DepartmentForm::default(),
        });
    }

    pub fn open_edit_department(&mut self, department_id: Uuid) {
        self.department_dialog = self
            .departments
            .iter()
            .find(|d| d.id == department_id)
            .map(|department| DepartmentDialog {
                mode: DialogMode::Edit(department.id),
                form: DepartmentForm {
                    name: department.name.clone(),
                    description: department.description.clone().unwrap_or_default(),
                },
            });
    }

    pub fn department_form_mut(&mut self) -> Option<&mut DepartmentForm> {
        self.department_dialog.as_mut().map(|d| &mut d.form)
    }

    pub fn close_department_dialog(&mut self) {
        self.department_dialog = None;
    }

    pub async fn save_department(&mut self) -> ClientResult<()> {
        let Some(dialog) = self.department_dialog.clone() else {
            return Ok(());
        };
        let input = match dialog.form.validate() {
            Ok(input) => input,
            Err(err) => {
                self.alerts.fail("Department form invalid", &err);
                return Err(err);
            }
        };

        self.submitting = true;
        let result = match dialog.mode {
            DialogMode::Create => self.service.create_department(&input).await,
            DialogMode::Edit(id) => self.service.update_department(id, &input).await,
        };
        self.submitting = false;

        match result {
            Ok(department) => {
                self.department_dialog = None;
                self.alerts
                    .succeed(format!("Department {} saved", department.name));
                self.load().await;
                Ok(())
            }
            Err(err) => {
                self.alerts.fail("Failed to save department", &err);
                Err(err)
            }
        }
    }

    // Deletion

    pub fn request_delete(&mut self, target: DeleteTarget) {
        self.delete_confirm = Some(target);
    }

    pub fn cancel_delete(&mut self) {
        self.delete_confirm = None;
    }

    pub async fn confirm_delete(&mut self) -> ClientResult<()> {
        let Some(target) = self.delete_confirm else {
            return Ok(());
        };

        self.submitting = true;
        let result = match target {
            DeleteTarget::Team(id) => self.service.delete_team(id).await,
            DeleteTarget::Department(id) => self.service.delete_department(id).await,
        };
        self.submitting = false;

        match result {
            Ok(()) => {
                self.delete_confirm = None;
                if let DeleteTarget::Team(id) = target {
                    if self.selected_team == Some(id) {
                        self.selected_team = None;
                        self.members.clear();
                    }
                }
                self.alerts.succeed(match target {
                    DeleteTarget::Team(_) => "Team deleted",
                    DeleteTarget::Department(_) => "Department deleted",
                });
                self.load().await;
                Ok(())
            }
            Err(err) => {
                self.alerts.fail("Failed to delete", &err);
                Err(err)
            }
        }
    }

    // Membership

    pub async fn select_team(&mut self, team_id: Uuid) {
        self.selected_team = Some(team_id);
        self.refresh_members().await;
    }

    async fn refresh_members(&mut self) {
        let Some(team_id) = self.selected_team else {
            return;
        };

        self.members_loading = true;
        let result = self.service.team_members(team_id).await;
        self.members_loading = false;

        match result {
            Ok(members) => self.members = members,
            Err(err) => self.alerts.fail("Failed to load team members", &err),
        }
    }

    /// Users not already on the selected team
    pub fn available_users(&self) -> Vec<&User> {
        self.users
            .iter()
            .filter(|u| !self.members.iter().any(|m| m.user_id == u.id))
            .collect()
    }

    pub fn open_member_dialog(&mut self) {
        self.member_dialog = Some(MemberDialog::default());
    }

    pub fn set_member_user(&mut self, user_id: Option<Uuid>) {
        if let Some(dialog) = self.member_dialog.as_mut() {
            dialog.user_id = user_id;
        }
    }

    pub fn set_member_role(&mut self, role: TeamRole) {
        if let Some(dialog) = self.member_dialog.as_mut() {
            dialog.role = role;
        }
    }

    pub fn close_member_dialog(&mut self) {
        self.member_dialog = None;
    }

    pub async fn add_member(&mut self) -> ClientResult<()> {
        let (Some(team_id), Some(dialog)) = (self.selected_team, self.member_dialog.clone()) else {
            return Ok(());
        };
        let Some(user_id) = dialog.user_id else {
            let err = ClientError::validation("Please select a user");
            self.alerts.fail("Member form invalid", &err);
            return Err(err);
        };

        self.submitting = true;
        let result = self
            .service
            .add_team_member(
                team_id,
                &AddTeamMemberInput {
                    user_id,
                    role: dialog.role,
                },
            )
            .await;
        self.submitting = false;

        match result {
            Ok(member) => {
                self.member_dialog = None;
                self.alerts
                    .succeed(format!("{} added to team", member.user_name));
                self.refresh_members().await;
                Ok(())
            }
            Err(err) => {
                self.alerts.fail("Failed to add team member", &err);
                Err(err)
            }
        }
    }

    pub async fn remove_member(&mut self, user_id: Uuid) -> ClientResult<()> {
        let Some(team_id) = self.selected_team else {
            return Ok(());
        };

        match self.service.remove_team_member(team_id, user_id).await {
            Ok(()) => {
                self.alerts.succeed("Member removed from team");
                self.refresh_members().await;
                Ok(())
            }
            Err(err) => {
                self.alerts.fail("Failed to remove team member", &err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_form_requires_name() {
        let form = TeamForm {
            name: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            form.validate().unwrap_err().display_message(),
            "Team name is required"
        );
    }

    #[test]
    fn test_team_form_drops_blank_description() {
        let form = TeamForm {
            name: "Ward 3".to_string(),
            description: "   ".to_string(),
            department_id: None,
        };
        let input = form.validate().unwrap();
        assert_eq!(input.name, "Ward 3");
        assert_eq!(input.description, None);
    }

    #[test]
    fn test_department_form_requires_name() {
        assert!(DepartmentForm::default().validate().is_err());
    }
}
