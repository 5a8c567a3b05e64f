//! Route definitions for the teams domain API

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use super::handlers::{invitations, members, teams, users};
use super::middleware::TeamsState;

/// Create team management routes
fn team_routes() -> Router<TeamsState> {
    Router::new()
        .route("/v1/teams", post(teams::create_team))
        .route("/v1/teams/my", get(teams::my_teams))
        .route("/v1/teams/{id}", get(teams::get_team))
        .route("/v1/teams/{id}", patch(teams::update_team))
        .route("/v1/teams/{id}", delete(teams::delete_team))
}

/// Create team membership routes
fn membership_routes() -> Router<TeamsState> {
    Router::new()
        .route("/v1/teams/{team_id}/members", get(members::list_members))
        .route("/v1/teams/{team_id}/leave", post(members::leave_team))
}

/// Create invitation routes
fn invitation_routes() -> Router<TeamsState> {
    Router::new()
        .route("/v1/invitations", post(invitations::create_invitation))
        .route("/v1/invitations/received", get(invitations::list_received))
        .route("/v1/invitations/sent", get(invitations::list_sent))
        .route(
            "/v1/invitations/{invitation_id}/accept",
            post(invitations::accept_invitation),
        )
        .route(
            "/v1/invitations/{invitation_id}/reject",
            post(invitations::reject_invitation),
        )
}

/// Create user directory routes
fn user_routes() -> Router<TeamsState> {
    Router::new().route("/v1/users/search", get(users::search_users))
}

/// Create all teams domain API routes
pub fn routes() -> Router<TeamsState> {
    Router::new()
        .merge(team_routes())
        .merge(membership_routes())
        .merge(invitation_routes())
        .merge(user_routes())
}
