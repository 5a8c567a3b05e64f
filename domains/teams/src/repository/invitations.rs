//! Invitation repository

use crate::domain::entities::{Invitation, InvitationStatus};
use chrono::{DateTime, Utc};
use teamline_common::{RepositoryError, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// Invitation joined with its team summary and the counterpart user
/// (the sender for received listings, the receiver for sent listings)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InvitationWithParties {
    pub id: Uuid,
    pub team_id: Uuid,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
    pub team_name: String,
    pub counterpart_id: Uuid,
    pub counterpart_name: String,
    pub counterpart_email: String,
}

#[derive(Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find invitation by ID
    pub async fn get_by_id(&self, invitation_id: Uuid) -> Result<Option<Invitation>> {
        let row = sqlx::query_as::<_, Invitation>(
            r#"
            SELECT id, sender_id, receiver_id, team_id, status, created_at
            FROM invitations
            WHERE id = $1
            "#,
        )
        .bind(invitation_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Find the pending invitation for a (receiver, team) pair, if any.
    /// The partial unique index guarantees at most one exists.
    pub async fn find_pending(
        &self,
        receiver_id: Uuid,
        team_id: Uuid,
    ) -> Result<Option<Invitation>> {
        let row = sqlx::query_as::<_, Invitation>(
            r#"
            SELECT id, sender_id, receiver_id, team_id, status, created_at
            FROM invitations
            WHERE receiver_id = $1 AND team_id = $2 AND status = 'pending'
            "#,
        )
        .bind(receiver_id)
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Create a new invitation. A unique-constraint violation (a concurrent
    /// request won the pending slot) surfaces as `AlreadyExists`.
    pub async fn create(&self, invitation: &Invitation) -> Result<Invitation> {
        let created = sqlx::query_as::<_, Invitation>(
            r#"
            INSERT INTO invitations (id, sender_id, receiver_id, team_id, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, sender_id, receiver_id, team_id, status, created_at
            "#,
        )
        .bind(invitation.id)
        .bind(invitation.sender_id)
        .bind(invitation.receiver_id)
        .bind(invitation.team_id)
        .bind(invitation.status)
        .bind(invitation.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        Ok(created)
    }

    /// Flip a pending invitation to rejected. Returns
    /// `RepositoryError::NotFound` if the invitation is no longer pending
    /// (resolved concurrently) or does not exist.
    pub async fn mark_rejected(&self, invitation_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE invitations
            SET status = 'rejected'
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(invitation_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound.into());
        }
        Ok(())
    }

    /// Invitations received by a user, newest first, enriched with the
    /// sender and team summaries. Optionally filtered by status.
    pub async fn list_received(
        &self,
        receiver_id: Uuid,
        status: Option<InvitationStatus>,
    ) -> Result<Vec<InvitationWithParties>> {
        let base = r#"
            SELECT i.id, i.team_id, i.status, i.created_at,
                   t.name AS team_name,
                   u.id AS counterpart_id, u.name AS counterpart_name,
                   u.email AS counterpart_email
            FROM invitations i
            INNER JOIN teams t ON i.team_id = t.id
            INNER JOIN users u ON i.sender_id = u.id
            WHERE i.receiver_id = $1
        "#;

        let rows = if let Some(status) = status {
            let query = format!("{} AND i.status = $2 ORDER BY i.created_at DESC", base);
            sqlx::query_as::<_, InvitationWithParties>(&query)
                .bind(receiver_id)
                .bind(status)
                .fetch_all(&self.pool)
                .await?
        } else {
            let query = format!("{} ORDER BY i.created_at DESC", base);
            sqlx::query_as::<_, InvitationWithParties>(&query)
                .bind(receiver_id)
                .fetch_all(&self.pool)
                .await?
        };

        Ok(rows)
    }

    /// Invitations sent by a user, newest first, enriched with the
    /// receiver and team summaries
    pub async fn list_sent(&self, sender_id: Uuid) -> Result<Vec<InvitationWithParties>> {
        let rows = sqlx::query_as::<_, InvitationWithParties>(
            r#"
            SELECT i.id, i.team_id, i.status, i.created_at,
                   t.name AS team_name,
                   u.id AS counterpart_id, u.name AS counterpart_name,
                   u.email AS counterpart_email
            FROM invitations i
            INNER JOIN teams t ON i.team_id = t.id
            INNER JOIN users u ON i.receiver_id = u.id
            WHERE i.sender_id = $1
            ORDER BY i.created_at DESC
            "#,
        )
        .bind(sender_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
