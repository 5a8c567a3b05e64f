//! Membership API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use teamline_auth::AuthUser;
use teamline_common::Result;

use crate::api::middleware::TeamsState;
use crate::domain::entities::{MemberRole, MemberStatus};
use crate::repository::MemberWithProfile;

/// One roster entry, member metadata joined with profile fields
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role: MemberRole,
    pub status: MemberStatus,
    pub joined_at: chrono::DateTime<chrono::Utc>,
    pub left_at: Option<chrono::DateTime<chrono::Utc>>,
    pub user_name: String,
    pub user_email: String,
    pub user_avatar_url: Option<String>,
}

impl From<MemberWithProfile> for MemberResponse {
    fn from(m: MemberWithProfile) -> Self {
        Self {
            id: m.id,
            team_id: m.team_id,
            user_id: m.user_id,
            role: m.role,
            status: m.status,
            joined_at: m.joined_at,
            left_at: m.left_at,
            user_name: m.user_name,
            user_email: m.user_email,
            user_avatar_url: m.user_avatar_url,
        }
    }
}

/// Roster grouped by status
#[derive(Debug, Serialize)]
pub struct MemberListResponse {
    pub active: Vec<MemberResponse>,
    pub past: Vec<MemberResponse>,
}

/// List team members
///
/// **GET /v1/teams/{team_id}/members**
///
/// Active and past members, visible to the owner and active members only.
pub async fn list_members(
    AuthUser(caller_id): AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<MemberListResponse>> {
    let roster = state.ledger().list_members(team_id, caller_id).await?;

    Ok(Json(MemberListResponse {
        active: roster.active.into_iter().map(MemberResponse::from).collect(),
        past: roster.past.into_iter().map(MemberResponse::from).collect(),
    }))
}

/// Leave a team
///
/// **POST /v1/teams/{team_id}/leave**
///
/// Soft-removes the caller's membership. The owner cannot leave; deleting
/// the team is the only way out for an owner.
pub async fn leave_team(
    AuthUser(caller_id): AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
) -> Result<StatusCode> {
    state.ledger().remove_member(team_id, caller_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
