//! Invitation workflow: creation, resolution, and candidate search
//!
//! Accepting an invitation is the one cross-component transaction in the
//! engine: the status flip and the ledger write commit together or not at
//! all. The notification sink hangs off the end of the accept path as a
//! fire-and-forget extension point.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use teamline_common::{Error, Result};
use teamline_notify::{NotificationEvent, NotificationSink};

use crate::domain::auth;
use crate::domain::entities::{Invitation, InvitationStatus, MemberRole, TeamMember, User};
use crate::repository::{mark_invitation_accepted_tx, InvitationWithParties, TeamsRepositories};
use crate::service::ledger::MembershipLedger;

/// Minimum usable length for a candidate-search query
pub const MIN_SEARCH_QUERY_LEN: usize = 2;

/// Result of a successful accept: the resolved invitation plus the
/// membership it materialized
#[derive(Debug, Clone)]
pub struct AcceptedInvitation {
    pub team_id: Uuid,
    pub member: TeamMember,
}

#[derive(Clone)]
pub struct InvitationWorkflow {
    repos: TeamsRepositories,
    notify: Arc<dyn NotificationSink>,
}

impl InvitationWorkflow {
    pub fn new(repos: TeamsRepositories, notify: Arc<dyn NotificationSink>) -> Self {
        Self { repos, notify }
    }

    /// Create a pending invitation.
    ///
    /// Guard order matters and is part of the contract: team existence,
    /// sender authorization, receiver existence, receiver membership,
    /// duplicate pending invitation.
    pub async fn create_invitation(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        team_id: Uuid,
    ) -> Result<Invitation> {
        let team = self
            .repos
            .teams
            .get_by_id(team_id)
            .await?
            .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

        let sender_membership = self
            .repos
            .members
            .get_by_team_and_user(team_id, sender_id)
            .await?;
        auth::ensure_can_invite(&team, sender_membership.as_ref(), sender_id)?;

        self.repos
            .users
            .get_by_id(receiver_id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        let receiver_membership = self
            .repos
            .members
            .get_by_team_and_user(team_id, receiver_id)
            .await?;
        auth::ensure_receiver_invitable(&team, receiver_membership.as_ref(), receiver_id)?;

        if self
            .repos
            .invitations
            .find_pending(receiver_id, team_id)
            .await?
            .is_some()
        {
            return Err(Error::Conflict("Invitation already sent".to_string()));
        }

        let invitation = Invitation::new(sender_id, receiver_id, team_id);

        // A concurrent request may win the pending slot between the check
        // above and this insert; the partial unique index turns that into
        // the same Conflict the check produces.
        let created = self
            .repos
            .invitations
            .create(&invitation)
            .await
            .map_err(|e| match e {
                Error::Conflict(_) => Error::Conflict("Invitation already sent".to_string()),
                other => other,
            })?;

        info!(
            invitation_id = %created.id,
            team_id = %team_id,
            receiver_id = %receiver_id,
            "invitation created"
        );
        Ok(created)
    }

    /// Accept an invitation: flip its status and materialize the active
    /// membership in one transaction. Only the receiver may accept.
    pub async fn accept_invitation(
        &self,
        invitation_id: Uuid,
        caller_id: Uuid,
    ) -> Result<AcceptedInvitation> {
        let invitation = self
            .repos
            .invitations
            .get_by_id(invitation_id)
            .await?
            .ok_or_else(|| Error::NotFound("Invitation not found".to_string()))?;

        auth::ensure_invitation_receiver(&invitation, caller_id)?;
        auth::ensure_invitation_pending(&invitation)?;

        let mut tx = self.repos.begin().await?;

        // Guarded flip: zero rows affected means a concurrent request
        // resolved the invitation after our check above.
        mark_invitation_accepted_tx(&mut tx, invitation_id)
            .await
            .map_err(|e| match e {
                teamline_common::RepositoryError::NotFound => {
                    Error::Conflict("Invitation already processed".to_string())
                }
                other => other.into(),
            })?;

        // Rejoining members always come back as plain members
        let member = MembershipLedger::add_member_in_tx(
            &mut tx,
            invitation.team_id,
            invitation.receiver_id,
            MemberRole::Member,
        )
        .await?;

        tx.commit().await?;

        info!(
            invitation_id = %invitation_id,
            team_id = %invitation.team_id,
            user_id = %invitation.receiver_id,
            "invitation accepted"
        );

        // Fire-and-forget: tell the sender, but never fail the accept over it
        self.notify_sender_of_acceptance(&invitation).await;

        Ok(AcceptedInvitation {
            team_id: invitation.team_id,
            member,
        })
    }

    /// Reject an invitation. Only the receiver may reject; terminal states
    /// conflict.
    pub async fn reject_invitation(&self, invitation_id: Uuid, caller_id: Uuid) -> Result<()> {
        let invitation = self
            .repos
            .invitations
            .get_by_id(invitation_id)
            .await?
            .ok_or_else(|| Error::NotFound("Invitation not found".to_string()))?;

        auth::ensure_invitation_receiver(&invitation, caller_id)?;
        auth::ensure_invitation_pending(&invitation)?;

        self.repos
            .invitations
            .mark_rejected(invitation_id)
            .await
            .map_err(|e| match e {
                Error::NotFound(_) => Error::Conflict("Invitation already processed".to_string()),
                other => other,
            })?;

        info!(invitation_id = %invitation_id, "invitation rejected");
        Ok(())
    }

    /// Invitations received by a user, newest first, optionally filtered
    /// by status
    pub async fn list_received(
        &self,
        user_id: Uuid,
        status: Option<InvitationStatus>,
    ) -> Result<Vec<InvitationWithParties>> {
        self.repos.invitations.list_received(user_id, status).await
    }

    /// Invitations sent by a user, newest first
    pub async fn list_sent(&self, user_id: Uuid) -> Result<Vec<InvitationWithParties>> {
        self.repos.invitations.list_sent(user_id).await
    }

    /// Search the identity directory for invitation candidates by name or
    /// join code, excluding the caller
    pub async fn search_candidate_users(
        &self,
        query: &str,
        excluding_user_id: Uuid,
    ) -> Result<Vec<User>> {
        let trimmed = query.trim();
        if trimmed.len() < MIN_SEARCH_QUERY_LEN {
            return Err(Error::Validation(format!(
                "Search query must be at least {} characters",
                MIN_SEARCH_QUERY_LEN
            )));
        }

        self.repos.users.search(trimmed, excluding_user_id).await
    }

    /// Deliver the acceptance event to the sender. Failures are logged and
    /// swallowed; delivery never influences engine decisions.
    async fn notify_sender_of_acceptance(&self, invitation: &Invitation) {
        let accepter = match self.repos.users.get_by_id(invitation.receiver_id).await {
            Ok(Some(user)) => user.name,
            _ => "A user".to_string(),
        };
        let team_name = match self.repos.teams.get_by_id(invitation.team_id).await {
            Ok(Some(team)) => team.name,
            _ => return,
        };

        let event = NotificationEvent::invitation_accepted(
            invitation.sender_id,
            &accepter,
            &team_name,
            invitation.team_id,
        );

        deliver_best_effort(self.notify.as_ref(), event).await;
    }
}

/// Deliver an event, logging failures instead of propagating them
pub(crate) async fn deliver_best_effort(sink: &dyn NotificationSink, event: NotificationEvent) {
    if let Err(e) = sink.deliver(event).await {
        warn!(error = %e, "notification delivery failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamline_notify::{MockNotificationSink, NotificationKind};

    #[tokio::test]
    async fn test_deliver_best_effort_records_on_success() {
        let sink = MockNotificationSink::new();
        let sender = Uuid::new_v4();
        let event =
            NotificationEvent::invitation_accepted(sender, "Ada", "Compilers", Uuid::new_v4());

        deliver_best_effort(&sink, event).await;

        let delivered = sink.delivered_to(sender);
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].kind, NotificationKind::InvitationAccepted);
    }

    #[tokio::test]
    async fn test_deliver_best_effort_swallows_failures() {
        let sink = MockNotificationSink::new();
        sink.set_failing(true);
        let event = NotificationEvent::invitation_accepted(
            Uuid::new_v4(),
            "Ada",
            "Compilers",
            Uuid::new_v4(),
        );

        // Must not panic or propagate the delivery error
        deliver_best_effort(&sink, event).await;
        assert!(sink.delivered().is_empty());
    }

    #[test]
    fn test_min_search_query_len_contract() {
        // The boundary layer depends on this constant; a query of exactly
        // this length must be usable.
        assert_eq!(MIN_SEARCH_QUERY_LEN, 2);
    }
}
