use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{
    AddTeamMemberInput, Department, DepartmentInput, Team, TeamInput, TeamMember, User,
};

/// Teams, departments and users
#[derive(Clone, Debug)]
pub struct OrganizationService {
    client: ApiClient,
}

impl OrganizationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // Teams
    pub async fn teams(&self) -> ClientResult<Vec<Team>> {
        self.client.get("/admin/teams").await
    }

    pub async fn create_team(&self, input: &TeamInput) -> ClientResult<Team> {
        self.client.post("/admin/teams", input).await
    }

    pub async fn update_team(&self, id: Uuid, input: &TeamInput) -> ClientResult<Team> {
        self.client.put(&format!("/admin/teams/{}", id), input).await
    }

    pub async fn delete_team(&self, id: Uuid) -> ClientResult<()> {
        self.client.delete(&format!("/admin/teams/{}", id)).await
    }

    pub async fn team_members(&self, team_id: Uuid) -> ClientResult<Vec<TeamMember>> {
        self.client
            .get(&format!("/admin/teams/{}/members", team_id))
            .await
    }

    pub async fn add_team_member(
        &self,
        team_id: Uuid,
        input: &AddTeamMemberInput,
    ) -> ClientResult<TeamMember> {
        self.client
            .post(&format!("/admin/teams/{}/members", team_id), input)
            .await
    }

    pub async fn remove_team_member(&self, team_id: Uuid, user_id: Uuid) -> ClientResult<()> {
        self.client
            .delete(&format!("/admin/teams/{}/members/{}", team_id, user_id))
            .await
    }

    // Departments
    pub async fn departments(&self) -> ClientResult<Vec<Department>> {
        self.client.get("/admin/departments").await
    }

    pub async fn create_department(&self, input: &DepartmentInput) -> ClientResult<Department> {
        self.client.post("/admin/departments", input).await
    }

    pub async fn update_department(
        &self,
        id: Uuid,
        input: &DepartmentInput,
    ) -> ClientResult<Department> {
        self.client
            .put(&format!("/admin/departments/{}", id), input)
            .await
    }

    pub async fn delete_department(&self, id: Uuid) -> ClientResult<()> {
        self.client
            .delete(&format!("/admin/departments/{}", id))
            .await
    }

    // Users
    pub async fn users(&self) -> ClientResult<Vec<User>> {
        self.client.get("/admin/users").await
    }
}
