//! Invitation API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use teamline_auth::AuthUser;
use teamline_common::Result;

use crate::api::middleware::TeamsState;
use crate::domain::entities::{Invitation, InvitationStatus, MemberRole};
use crate::repository::InvitationWithParties;

/// Request for sending an invitation
#[derive(Debug, Deserialize)]
pub struct CreateInvitationRequest {
    pub receiver_id: Uuid,
    pub team_id: Uuid,
}

/// Query parameters for listing received invitations
#[derive(Debug, Deserialize, Default)]
pub struct ReceivedInvitationsQuery {
    /// Filter by invitation status (pending, accepted, rejected)
    pub status: Option<InvitationStatus>,
}

/// Response for invitation creation
#[derive(Debug, Serialize)]
pub struct InvitationResponse {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub team_id: Uuid,
    pub status: InvitationStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Invitation> for InvitationResponse {
    fn from(invitation: Invitation) -> Self {
        Self {
            id: invitation.id,
            sender_id: invitation.sender_id,
            receiver_id: invitation.receiver_id,
            team_id: invitation.team_id,
            status: invitation.status,
            created_at: invitation.created_at,
        }
    }
}

/// Counterpart user summary on invitation listings
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Team summary on invitation listings
#[derive(Debug, Serialize)]
pub struct TeamSummary {
    pub id: Uuid,
    pub name: String,
}

/// One received invitation, enriched with sender and team summaries
#[derive(Debug, Serialize)]
pub struct ReceivedInvitationResponse {
    pub id: Uuid,
    pub status: InvitationStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub sender: UserSummary,
    pub team: TeamSummary,
}

impl From<InvitationWithParties> for ReceivedInvitationResponse {
    fn from(i: InvitationWithParties) -> Self {
        Self {
            id: i.id,
            status: i.status,
            created_at: i.created_at,
            sender: UserSummary {
                id: i.counterpart_id,
                name: i.counterpart_name,
                email: i.counterpart_email,
            },
            team: TeamSummary {
                id: i.team_id,
                name: i.team_name,
            },
        }
    }
}

/// One sent invitation, enriched with receiver and team summaries
#[derive(Debug, Serialize)]
pub struct SentInvitationResponse {
    pub id: Uuid,
    pub status: InvitationStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub receiver: UserSummary,
    pub team: TeamSummary,
}

impl From<InvitationWithParties> for SentInvitationResponse {
    fn from(i: InvitationWithParties) -> Self {
        Self {
            id: i.id,
            status: i.status,
            created_at: i.created_at,
            receiver: UserSummary {
                id: i.counterpart_id,
                name: i.counterpart_name,
                email: i.counterpart_email,
            },
            team: TeamSummary {
                id: i.team_id,
                name: i.team_name,
            },
        }
    }
}

/// Response for accepting an invitation
#[derive(Debug, Serialize)]
pub struct AcceptInvitationResponse {
    pub team_id: Uuid,
    pub member_id: Uuid,
    pub role: MemberRole,
}

/// Send an invitation to join a team
///
/// **POST /v1/invitations**
///
/// The caller must be the team owner or an active member; the receiver
/// must exist, must not already belong to the team, and must not have a
/// pending invitation for it.
pub async fn create_invitation(
    AuthUser(caller_id): AuthUser,
    State(state): State<TeamsState>,
    Json(request): Json<CreateInvitationRequest>,
) -> Result<Json<InvitationResponse>> {
    let invitation = state
        .invitations()
        .create_invitation(caller_id, request.receiver_id, request.team_id)
        .await?;

    Ok(Json(InvitationResponse::from(invitation)))
}

/// Accept an invitation
///
/// **POST /v1/invitations/{invitation_id}/accept**
///
/// Receiver only. Atomically resolves the invitation and activates the
/// membership.
pub async fn accept_invitation(
    AuthUser(caller_id): AuthUser,
    State(state): State<TeamsState>,
    Path(invitation_id): Path<Uuid>,
) -> Result<Json<AcceptInvitationResponse>> {
    let accepted = state
        .invitations()
        .accept_invitation(invitation_id, caller_id)
        .await?;

    Ok(Json(AcceptInvitationResponse {
        team_id: accepted.team_id,
        member_id: accepted.member.id,
        role: accepted.member.role,
    }))
}

/// Reject an invitation
///
/// **POST /v1/invitations/{invitation_id}/reject**
///
/// Receiver only.
pub async fn reject_invitation(
    AuthUser(caller_id): AuthUser,
    State(state): State<TeamsState>,
    Path(invitation_id): Path<Uuid>,
) -> Result<StatusCode> {
    state
        .invitations()
        .reject_invitation(invitation_id, caller_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List invitations received by the caller
///
/// **GET /v1/invitations/received**
pub async fn list_received(
    AuthUser(caller_id): AuthUser,
    State(state): State<TeamsState>,
    Query(query): Query<ReceivedInvitationsQuery>,
) -> Result<Json<Vec<ReceivedInvitationResponse>>> {
    let invitations = state
        .invitations()
        .list_received(caller_id, query.status)
        .await?;

    Ok(Json(
        invitations
            .into_iter()
            .map(ReceivedInvitationResponse::from)
            .collect(),
    ))
}

/// List invitations sent by the caller
///
/// **GET /v1/invitations/sent**
pub async fn list_sent(
    AuthUser(caller_id): AuthUser,
    State(state): State<TeamsState>,
) -> Result<Json<Vec<SentInvitationResponse>>> {
    let invitations = state.invitations().list_sent(caller_id).await?;

    Ok(Json(
        invitations
            .into_iter()
            .map(SentInvitationResponse::from)
            .collect(),
    ))
}
