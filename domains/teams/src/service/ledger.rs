//! Membership ledger: the authorization oracle
//!
//! Every other subsystem that needs "may this user see/act on this team's
//! data" asks the ledger. Writes to a (team, user) pair serialize behind a
//! row lock so the one-row-per-pair invariant holds under concurrency.

use tracing::info;
use uuid::Uuid;

use teamline_common::{Error, Result};

use crate::domain::auth;
use crate::domain::entities::{MemberRole, MemberStatus, Team, TeamMember};
use crate::repository::{
    create_member_tx, get_member_for_update_tx, reactivate_member_tx, MemberWithProfile,
    TeamsRepositories,
};

/// Member roster split into current and past members
#[derive(Debug, Clone)]
pub struct MemberRoster {
    pub active: Vec<MemberWithProfile>,
    pub past: Vec<MemberWithProfile>,
}

#[derive(Clone)]
pub struct MembershipLedger {
    repos: TeamsRepositories,
}

impl MembershipLedger {
    pub fn new(repos: TeamsRepositories) -> Self {
        Self { repos }
    }

    /// True iff a ledger row exists for the pair with status `active`
    pub async fn is_active_member(&self, team_id: Uuid, user_id: Uuid) -> Result<bool> {
        let row = self.repos.members.get_by_team_and_user(team_id, user_id).await?;
        Ok(row.is_some_and(|m| m.is_active()))
    }

    /// True iff the caller may act within the team's scope: an active
    /// member, or the owner checked directly against the ownership fact
    pub async fn is_team_authorized(&self, team: &Team, user_id: Uuid) -> Result<bool> {
        let membership = self.repos.members.get_by_team_and_user(team.id, user_id).await?;
        Ok(auth::is_team_authorized(team, membership.as_ref(), user_id))
    }

    /// Materialize an active membership for the pair.
    ///
    /// Exactly one row per (team, user) ever exists: a departed row is
    /// reactivated in place, a live row is a conflict, and only a pair with
    /// no history gets a fresh insert. The row is locked for the duration
    /// of the transaction so concurrent adds serialize.
    pub async fn add_member(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<TeamMember> {
        let mut tx = self.repos.begin().await?;
        let member = Self::add_member_in_tx(&mut tx, team_id, user_id, role).await?;
        tx.commit().await?;

        info!(team_id = %team_id, user_id = %user_id, "member added");
        Ok(member)
    }

    /// The add-member write against an already-open transaction, used by
    /// the invitation workflow's accept unit.
    pub(crate) async fn add_member_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        team_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<TeamMember> {
        match get_member_for_update_tx(tx, team_id, user_id).await? {
            Some(existing) if existing.status == MemberStatus::Active => Err(Error::Conflict(
                "User is already a team member".to_string(),
            )),
            Some(departed) => Ok(reactivate_member_tx(tx, departed.id, role).await?),
            None => {
                let member = TeamMember::new(team_id, user_id, role);
                Ok(create_member_tx(tx, &member).await?)
            }
        }
    }

    /// Soft-remove a member: the row stays, status flips to `left`.
    ///
    /// The owner can never be removed; deleting the team is the only way
    /// out for an owner.
    pub async fn remove_member(&self, team_id: Uuid, user_id: Uuid) -> Result<()> {
        let team = self
            .repos
            .teams
            .get_by_id(team_id)
            .await?
            .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

        if team.owner_id == user_id {
            return Err(Error::Authorization(
                "Team owner cannot leave. Delete the team instead.".to_string(),
            ));
        }

        self.repos
            .members
            .mark_left(team_id, user_id)
            .await
            .map_err(|e| match e {
                Error::NotFound(_) => {
                    Error::NotFound("You are not a member of this team".to_string())
                }
                other => other,
            })?;

        info!(team_id = %team_id, user_id = %user_id, "member left");
        Ok(())
    }

    /// Member roster with profile details, grouped by status. Only the
    /// owner and active members may look.
    pub async fn list_members(&self, team_id: Uuid, caller_id: Uuid) -> Result<MemberRoster> {
        let team = self
            .repos
            .teams
            .get_by_id(team_id)
            .await?
            .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

        let caller_membership = self
            .repos
            .members
            .get_by_team_and_user(team_id, caller_id)
            .await?;
        auth::ensure_member_view(&team, caller_membership.as_ref(), caller_id)?;

        let rows = self.repos.members.list_by_team(team_id).await?;

        let (active, mut past): (Vec<_>, Vec<_>) = rows
            .into_iter()
            .partition(|m| m.status == MemberStatus::Active);

        // Most recent departure first
        past.sort_by(|a, b| b.left_at.cmp(&a.left_at));

        Ok(MemberRoster { active, past })
    }
}
