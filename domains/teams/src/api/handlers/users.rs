//! User directory API handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use teamline_auth::AuthUser;
use teamline_common::Result;

use crate::api::middleware::TeamsState;
use crate::domain::entities::User;

/// Query parameters for candidate search
#[derive(Debug, Deserialize)]
pub struct SearchUsersQuery {
    pub q: String,
}

/// Candidate user entry
#[derive(Debug, Serialize)]
pub struct CandidateUserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub user_code: String,
    pub avatar_url: Option<String>,
}

impl From<User> for CandidateUserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            user_code: u.user_code,
            avatar_url: u.avatar_url,
        }
    }
}

/// Search for invitation candidates by name or join code
///
/// **GET /v1/users/search?q=...**
///
/// Requires a query of at least 2 characters; the caller is excluded from
/// the results.
pub async fn search_users(
    AuthUser(caller_id): AuthUser,
    State(state): State<TeamsState>,
    Query(query): Query<SearchUsersQuery>,
) -> Result<Json<Vec<CandidateUserResponse>>> {
    let users = state
        .invitations()
        .search_candidate_users(&query.q, caller_id)
        .await?;

    Ok(Json(
        users.into_iter().map(CandidateUserResponse::from).collect(),
    ))
}
