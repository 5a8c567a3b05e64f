//! Team member repository, the ledger's storage

use crate::domain::entities::{MemberRole, MemberStatus, TeamMember};
use chrono::{DateTime, Utc};
use teamline_common::{RepositoryError, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// Member row joined with identity-directory profile fields
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemberWithProfile {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role: MemberRole,
    pub status: MemberStatus,
    pub joined_at: DateTime<Utc>,
    pub left_at: Option<DateTime<Utc>>,
    pub user_name: String,
    pub user_email: String,
    pub user_avatar_url: Option<String>,
}

#[derive(Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the single ledger row for a (team, user) pair, any status
    pub async fn get_by_team_and_user(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TeamMember>> {
        let row = sqlx::query_as::<_, TeamMember>(
            r#"
            SELECT id, team_id, user_id, role, status, joined_at, left_at
            FROM team_members
            WHERE team_id = $1 AND user_id = $2
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// List all ledger rows for a team with profile details.
    /// Owner first within the active group, then by join time.
    pub async fn list_by_team(&self, team_id: Uuid) -> Result<Vec<MemberWithProfile>> {
        let rows = sqlx::query_as::<_, MemberWithProfile>(
            r#"
            SELECT m.id, m.team_id, m.user_id, m.role, m.status, m.joined_at, m.left_at,
                   u.name AS user_name, u.email AS user_email, u.avatar_url AS user_avatar_url
            FROM team_members m
            INNER JOIN users u ON m.user_id = u.id
            WHERE m.team_id = $1
            ORDER BY
                m.status ASC,
                CASE m.role WHEN 'owner' THEN 0 ELSE 1 END ASC,
                m.joined_at ASC
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Soft-transition an active row to `left`, recording the departure
    /// time. Returns `RepositoryError::NotFound` if the pair has no active
    /// row.
    pub async fn mark_left(&self, team_id: Uuid, user_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE team_members
            SET status = 'left', left_at = NOW()
            WHERE team_id = $1 AND user_id = $2 AND status = 'active'
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound.into());
        }
        Ok(())
    }
}
