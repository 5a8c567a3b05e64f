//! Transactional free functions for the teams domain
//!
//! Multi-write units take an open transaction so the caller controls the
//! commit point. Dropping the transaction without committing rolls back.

use crate::domain::entities::{MemberRole, Team, TeamMember};
use teamline_common::RepositoryError;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

/// Insert a team row within an existing transaction.
pub async fn create_team_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team: &Team,
) -> std::result::Result<Team, sqlx::Error> {
    let created = sqlx::query_as::<_, Team>(
        r#"
        INSERT INTO teams (id, name, team_code, description, owner_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, team_code, description, owner_id, created_at
        "#,
    )
    .bind(team.id)
    .bind(&team.name)
    .bind(&team.team_code)
    .bind(&team.description)
    .bind(team.owner_id)
    .bind(team.created_at)
    .fetch_one(&mut **transaction)
    .await?;
    Ok(created)
}

/// Insert a member row within an existing transaction.
pub async fn create_member_tx(
    transaction: &mut Transaction<'_, Postgres>,
    member: &TeamMember,
) -> std::result::Result<TeamMember, sqlx::Error> {
    let created = sqlx::query_as::<_, TeamMember>(
        r#"
        INSERT INTO team_members (id, team_id, user_id, role, status, joined_at, left_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, team_id, user_id, role, status, joined_at, left_at
        "#,
    )
    .bind(member.id)
    .bind(member.team_id)
    .bind(member.user_id)
    .bind(member.role)
    .bind(member.status)
    .bind(member.joined_at)
    .bind(member.left_at)
    .fetch_one(&mut **transaction)
    .await?;
    Ok(created)
}

/// Load the ledger row for a (team, user) pair with a row lock, so
/// concurrent writes to the same pair serialize behind this transaction.
pub async fn get_member_for_update_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
    user_id: Uuid,
) -> std::result::Result<Option<TeamMember>, sqlx::Error> {
    let row = sqlx::query_as::<_, TeamMember>(
        r#"
        SELECT id, team_id, user_id, role, status, joined_at, left_at
        FROM team_members
        WHERE team_id = $1 AND user_id = $2
        FOR UPDATE
        "#,
    )
    .bind(team_id)
    .bind(user_id)
    .fetch_optional(&mut **transaction)
    .await?;
    Ok(row)
}

/// Reactivate a departed ledger row within an existing transaction,
/// assigning the given role and clearing the departure time.
pub async fn reactivate_member_tx(
    transaction: &mut Transaction<'_, Postgres>,
    member_id: Uuid,
    role: MemberRole,
) -> std::result::Result<TeamMember, sqlx::Error> {
    let updated = sqlx::query_as::<_, TeamMember>(
        r#"
        UPDATE team_members
        SET status = 'active', role = $2, left_at = NULL
        WHERE id = $1
        RETURNING id, team_id, user_id, role, status, joined_at, left_at
        "#,
    )
    .bind(member_id)
    .bind(role)
    .fetch_one(&mut **transaction)
    .await?;
    Ok(updated)
}

/// Mark an invitation as accepted within an existing transaction.
///
/// Guarded on `status = 'pending'`: zero rows affected means the invitation
/// does not exist or was resolved by a concurrent request.
pub async fn mark_invitation_accepted_tx(
    transaction: &mut Transaction<'_, Postgres>,
    invitation_id: Uuid,
) -> std::result::Result<(), RepositoryError> {
    let result = sqlx::query(
        r#"
        UPDATE invitations
        SET status = 'accepted'
        WHERE id = $1 AND status = 'pending'
        "#,
    )
    .bind(invitation_id)
    .execute(&mut **transaction)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

/// Delete a team and everything that hangs off it, within an existing
/// transaction. Invitations and member rows go first so foreign keys hold.
pub async fn delete_team_cascade_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
) -> std::result::Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM invitations WHERE team_id = $1")
        .bind(team_id)
        .execute(&mut **transaction)
        .await?;

    sqlx::query("DELETE FROM team_members WHERE team_id = $1")
        .bind(team_id)
        .execute(&mut **transaction)
        .await?;

    sqlx::query("DELETE FROM teams WHERE id = $1")
        .bind(team_id)
        .execute(&mut **transaction)
        .await?;

    Ok(())
}
