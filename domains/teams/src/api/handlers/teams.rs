//! Team management API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use teamline_auth::AuthUser;
use teamline_common::{Error, Result};

use crate::api::middleware::TeamsState;
use crate::domain::entities::Team;
use crate::repository::TeamWithMemberCount;
use crate::service::TeamChanges;

/// Request for creating a team
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub description: Option<String>,
}

/// Request for updating a team
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    pub description: Option<String>,
}

/// Response for team operations
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub team_code: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_count: Option<i64>,
}

impl TeamResponse {
    fn from_team(team: Team, member_count: Option<i64>) -> Self {
        Self {
            id: team.id,
            name: team.name,
            team_code: team.team_code,
            description: team.description,
            owner_id: team.owner_id,
            created_at: team.created_at,
            member_count,
        }
    }
}

impl From<TeamWithMemberCount> for TeamResponse {
    fn from(t: TeamWithMemberCount) -> Self {
        Self {
            id: t.id,
            name: t.name,
            team_code: t.team_code,
            description: t.description,
            owner_id: t.owner_id,
            created_at: t.created_at,
            member_count: Some(t.member_count),
        }
    }
}

/// Create a team
///
/// **POST /v1/teams**
///
/// The caller becomes the owner; the owner's member row is created as part
/// of the same unit.
pub async fn create_team(
    AuthUser(caller_id): AuthUser,
    State(state): State<TeamsState>,
    Json(request): Json<CreateTeamRequest>,
) -> Result<Json<TeamResponse>> {
    request
        .validate()
        .map_err(|e| Error::Validation(format!("Validation failed: {}", e)))?;

    let team = state
        .registry()
        .create_team(&request.name, request.description, caller_id)
        .await?;

    // The owner is the first member
    Ok(Json(TeamResponse::from_team(team, Some(1))))
}

/// Get a team
///
/// **GET /v1/teams/{id}**
///
/// Visible to the owner and active members only.
pub async fn get_team(
    AuthUser(caller_id): AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<TeamResponse>> {
    let team = state
        .registry()
        .get(team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    if !state.ledger().is_team_authorized(&team, caller_id).await? {
        return Err(Error::Authorization(
            "You must be a team member to view this team".to_string(),
        ));
    }

    Ok(Json(TeamResponse::from_team(team, None)))
}

/// List the caller's teams
///
/// **GET /v1/teams/my**
pub async fn my_teams(
    AuthUser(caller_id): AuthUser,
    State(state): State<TeamsState>,
) -> Result<Json<Vec<TeamResponse>>> {
    let teams = state.registry().list_for_user(caller_id).await?;
    Ok(Json(teams.into_iter().map(TeamResponse::from).collect()))
}

/// Update a team
///
/// **PATCH /v1/teams/{id}**
///
/// Owner only.
pub async fn update_team(
    AuthUser(caller_id): AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
    Json(request): Json<UpdateTeamRequest>,
) -> Result<Json<TeamResponse>> {
    request
        .validate()
        .map_err(|e| Error::Validation(format!("Validation failed: {}", e)))?;

    let changes = TeamChanges {
        name: request.name,
        description: request.description,
    };

    let team = state.registry().update(team_id, caller_id, changes).await?;
    Ok(Json(TeamResponse::from_team(team, None)))
}

/// Delete a team
///
/// **DELETE /v1/teams/{id}**
///
/// Owner only. Removes all dependent member rows and invitations.
pub async fn delete_team(
    AuthUser(caller_id): AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
) -> Result<StatusCode> {
    state.registry().delete(team_id, caller_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
