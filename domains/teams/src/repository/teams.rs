//! Team repository

use crate::domain::entities::Team;
use chrono::{DateTime, Utc};
use teamline_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Team joined with its active-member count, for list views
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TeamWithMemberCount {
    pub id: Uuid,
    pub name: String,
    pub team_code: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub member_count: i64,
}

#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find team by ID
    pub async fn get_by_id(&self, team_id: Uuid) -> Result<Option<Team>> {
        let row = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name, team_code, description, owner_id, created_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Find team by its shareable code
    pub async fn get_by_code(&self, team_code: &str) -> Result<Option<Team>> {
        let row = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name, team_code, description, owner_id, created_at
            FROM teams
            WHERE team_code = $1
            "#,
        )
        .bind(team_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// List teams where the user holds an active membership,
    /// with active-member counts
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<TeamWithMemberCount>> {
        let rows = sqlx::query_as::<_, TeamWithMemberCount>(
            r#"
            SELECT t.id, t.name, t.team_code, t.description, t.owner_id, t.created_at,
                   (SELECT COUNT(*) FROM team_members c
                    WHERE c.team_id = t.id AND c.status = 'active') AS member_count
            FROM teams t
            INNER JOIN team_members m ON t.id = m.team_id
            WHERE m.user_id = $1 AND m.status = 'active'
            ORDER BY t.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Update an existing team's mutable fields
    pub async fn update(&self, team: &Team) -> Result<Team> {
        let updated = sqlx::query_as::<_, Team>(
            r#"
            UPDATE teams
            SET name = $2, description = $3
            WHERE id = $1
            RETURNING id, name, team_code, description, owner_id, created_at
            "#,
        )
        .bind(team.id)
        .bind(&team.name)
        .bind(&team.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }
}
