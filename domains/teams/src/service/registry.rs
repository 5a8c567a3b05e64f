//! Team registry: owns Team entities, their codes, and ownership facts

use tracing::info;
use uuid::Uuid;

use teamline_common::{Error, Result};

use crate::domain::auth;
use crate::domain::entities::{MemberRole, Team, TeamMember};
use crate::repository::{
    create_member_tx, create_team_tx, delete_team_cascade_tx, TeamWithMemberCount,
    TeamsRepositories,
};

/// Mutable team fields for [`TeamRegistry::update`]
#[derive(Debug, Default, Clone)]
pub struct TeamChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct TeamRegistry {
    repos: TeamsRepositories,
}

impl TeamRegistry {
    pub fn new(repos: TeamsRepositories) -> Self {
        Self { repos }
    }

    /// Create a team and its owner's ledger row as one atomic unit.
    ///
    /// The shareable code is drawn at random and re-drawn until it is not
    /// present in storage. The code space dwarfs any realistic team count,
    /// so the loop terminates after one or two probes; the unique index on
    /// `team_code` backstops the lookup-then-insert window.
    pub async fn create_team(
        &self,
        name: &str,
        description: Option<String>,
        owner_id: Uuid,
    ) -> Result<Team> {
        let mut team_code = Team::generate_code();
        while self.repos.teams.get_by_code(&team_code).await?.is_some() {
            team_code = Team::generate_code();
        }

        let team = Team::new(name.to_string(), description, owner_id, team_code)?;
        let owner_row = TeamMember::new(team.id, owner_id, MemberRole::Owner);

        let mut tx = self.repos.begin().await?;
        let created = create_team_tx(&mut tx, &team).await?;
        create_member_tx(&mut tx, &owner_row).await?;
        tx.commit().await?;

        info!(team_id = %created.id, team_code = %created.team_code, "team created");
        Ok(created)
    }

    /// Look up a team by id. Absence is not an error.
    pub async fn get(&self, team_id: Uuid) -> Result<Option<Team>> {
        self.repos.teams.get_by_id(team_id).await
    }

    /// Look up a team by its shareable code. Absence is not an error.
    pub async fn get_by_code(&self, team_code: &str) -> Result<Option<Team>> {
        self.repos.teams.get_by_code(team_code).await
    }

    /// Teams the user actively belongs to, with member counts
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<TeamWithMemberCount>> {
        self.repos.teams.list_for_user(user_id).await
    }

    /// Update name and/or description. Owner only.
    pub async fn update(
        &self,
        team_id: Uuid,
        caller_id: Uuid,
        changes: TeamChanges,
    ) -> Result<Team> {
        let mut team = self
            .repos
            .teams
            .get_by_id(team_id)
            .await?
            .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

        auth::ensure_owner(&team, caller_id, "update the team")?;

        if let Some(name) = changes.name {
            Team::validate_name(&name)?;
            team.name = name;
        }
        if let Some(description) = changes.description {
            team.description = Some(description);
        }

        self.repos.teams.update(&team).await
    }

    /// Delete a team and all dependent rows. Owner only.
    pub async fn delete(&self, team_id: Uuid, caller_id: Uuid) -> Result<()> {
        let team = self
            .repos
            .teams
            .get_by_id(team_id)
            .await?
            .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

        auth::ensure_owner(&team, caller_id, "delete the team")?;

        let mut tx = self.repos.begin().await?;
        delete_team_cascade_tx(&mut tx, team_id).await?;
        tx.commit().await?;

        info!(team_id = %team_id, "team deleted");
        Ok(())
    }
}
