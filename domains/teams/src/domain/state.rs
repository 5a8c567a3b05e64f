//! State machines for membership and invitation lifecycles
//!
//! Each machine defines the valid states, the events that trigger
//! transitions, guard conditions, and terminal states. Status enums are
//! closed sets mapped to Postgres enum types, so an illegal status can
//! never be constructed or loaded.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Invalid transition: cannot apply {event} from {from}")]
    InvalidTransition { from: String, event: String },

    #[error("Guard condition failed: {0}")]
    GuardFailed(String),

    #[error("Terminal state: {0} is a terminal state and cannot transition")]
    TerminalState(String),
}

// ============================================================================
// Membership State Machine
// ============================================================================

/// Membership status. `Left` rows are retained for the past-members view;
/// they are never hard-deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "member_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Left,
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Left => write!(f, "left"),
        }
    }
}

/// Events that trigger membership state transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MembershipEvent {
    /// Member leaves (or is removed from) the team
    Leave,
    /// Departed member rejoins through an accepted invitation
    Reactivate,
}

impl std::fmt::Display for MembershipEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leave => write!(f, "leave"),
            Self::Reactivate => write!(f, "reactivate"),
        }
    }
}

/// Guard context for membership transitions
#[derive(Debug, Clone)]
pub struct MembershipGuardContext {
    /// Whether the row belongs to the team owner
    pub is_owner: bool,
}

/// Membership state machine
pub struct MembershipStateMachine;

impl MembershipStateMachine {
    /// Attempt a state transition with guard conditions
    pub fn transition(
        current: MemberStatus,
        event: MembershipEvent,
        context: Option<&MembershipGuardContext>,
    ) -> Result<MemberStatus, StateError> {
        let next = match (&current, &event) {
            (MemberStatus::Active, MembershipEvent::Leave) => {
                // Guard: the owner never leaves; the team is deleted instead
                if let Some(ctx) = context {
                    if ctx.is_owner {
                        return Err(StateError::GuardFailed(
                            "Team owner cannot leave the team".to_string(),
                        ));
                    }
                }
                MemberStatus::Left
            }
            (MemberStatus::Left, MembershipEvent::Reactivate) => MemberStatus::Active,

            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(
        current: MemberStatus,
        event: &MembershipEvent,
        context: Option<&MembershipGuardContext>,
    ) -> bool {
        Self::transition(current, *event, context).is_ok()
    }
}

// ============================================================================
// Invitation State Machine
// ============================================================================

/// Invitation status. Stored directly on the row; monotonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invitation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl InvitationStatus {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [InvitationStatus] {
        match self {
            Self::Pending => &[Self::Accepted, Self::Rejected],
            Self::Accepted => &[],
            Self::Rejected => &[],
        }
    }
}

impl std::fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// Events that trigger invitation state transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvitationEvent {
    /// Receiver accepts the invitation
    Accept,
    /// Receiver rejects the invitation
    Reject,
}

impl std::fmt::Display for InvitationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accept => write!(f, "accept"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Invitation state machine
pub struct InvitationStateMachine;

impl InvitationStateMachine {
    /// Attempt a state transition
    pub fn transition(
        current: InvitationStatus,
        event: InvitationEvent,
    ) -> Result<InvitationStatus, StateError> {
        // Check for terminal state
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (&current, &event) {
            (InvitationStatus::Pending, InvitationEvent::Accept) => InvitationStatus::Accepted,
            (InvitationStatus::Pending, InvitationEvent::Reject) => InvitationStatus::Rejected,

            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(current: InvitationStatus, event: &InvitationEvent) -> bool {
        Self::transition(current, *event).is_ok()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod invitation_state_machine {
        use super::*;

        #[test]
        fn test_valid_pending_to_accepted() {
            let result =
                InvitationStateMachine::transition(InvitationStatus::Pending, InvitationEvent::Accept);
            assert_eq!(result, Ok(InvitationStatus::Accepted));
        }

        #[test]
        fn test_valid_pending_to_rejected() {
            let result =
                InvitationStateMachine::transition(InvitationStatus::Pending, InvitationEvent::Reject);
            assert_eq!(result, Ok(InvitationStatus::Rejected));
        }

        #[test]
        fn test_terminal_accepted_cannot_transition() {
            let result = InvitationStateMachine::transition(
                InvitationStatus::Accepted,
                InvitationEvent::Reject,
            );
            assert!(matches!(result, Err(StateError::TerminalState(_))));
        }

        #[test]
        fn test_terminal_rejected_cannot_transition() {
            let result = InvitationStateMachine::transition(
                InvitationStatus::Rejected,
                InvitationEvent::Accept,
            );
            assert!(matches!(result, Err(StateError::TerminalState(_))));
        }

        #[test]
        fn test_double_accept_rejected() {
            let accepted =
                InvitationStateMachine::transition(InvitationStatus::Pending, InvitationEvent::Accept)
                    .unwrap();
            let result = InvitationStateMachine::transition(accepted, InvitationEvent::Accept);
            assert!(matches!(result, Err(StateError::TerminalState(_))));
        }

        #[test]
        fn test_is_terminal() {
            assert!(!InvitationStatus::Pending.is_terminal());
            assert!(InvitationStatus::Accepted.is_terminal());
            assert!(InvitationStatus::Rejected.is_terminal());
        }

        #[test]
        fn test_valid_transitions_not_empty_for_pending() {
            let pending = InvitationStatus::Pending.valid_transitions();
            assert_eq!(pending.len(), 2);
            assert!(pending.contains(&InvitationStatus::Accepted));
            assert!(pending.contains(&InvitationStatus::Rejected));

            // Terminal states should have no transitions
            assert!(InvitationStatus::Accepted.valid_transitions().is_empty());
            assert!(InvitationStatus::Rejected.valid_transitions().is_empty());
        }

        #[test]
        fn test_can_transition() {
            assert!(InvitationStateMachine::can_transition(
                InvitationStatus::Pending,
                &InvitationEvent::Accept
            ));
            assert!(InvitationStateMachine::can_transition(
                InvitationStatus::Pending,
                &InvitationEvent::Reject
            ));
            assert!(!InvitationStateMachine::can_transition(
                InvitationStatus::Accepted,
                &InvitationEvent::Reject
            ));
            assert!(!InvitationStateMachine::can_transition(
                InvitationStatus::Rejected,
                &InvitationEvent::Accept
            ));
        }
    }

    mod membership_state_machine {
        use super::*;

        #[test]
        fn test_valid_active_to_left() {
            let ctx = MembershipGuardContext { is_owner: false };
            let result = MembershipStateMachine::transition(
                MemberStatus::Active,
                MembershipEvent::Leave,
                Some(&ctx),
            );
            assert_eq!(result, Ok(MemberStatus::Left));
        }

        #[test]
        fn test_guard_fails_owner_leave() {
            let ctx = MembershipGuardContext { is_owner: true };
            let result = MembershipStateMachine::transition(
                MemberStatus::Active,
                MembershipEvent::Leave,
                Some(&ctx),
            );
            assert!(matches!(result, Err(StateError::GuardFailed(_))));
        }

        #[test]
        fn test_valid_left_to_active() {
            let result = MembershipStateMachine::transition(
                MemberStatus::Left,
                MembershipEvent::Reactivate,
                None,
            );
            assert_eq!(result, Ok(MemberStatus::Active));
        }

        #[test]
        fn test_invalid_left_leave() {
            let result =
                MembershipStateMachine::transition(MemberStatus::Left, MembershipEvent::Leave, None);
            assert!(matches!(result, Err(StateError::InvalidTransition { .. })));
        }

        #[test]
        fn test_invalid_active_reactivate() {
            let result = MembershipStateMachine::transition(
                MemberStatus::Active,
                MembershipEvent::Reactivate,
                None,
            );
            assert!(matches!(result, Err(StateError::InvalidTransition { .. })));
        }

        #[test]
        fn test_can_transition() {
            let member = MembershipGuardContext { is_owner: false };
            let owner = MembershipGuardContext { is_owner: true };

            assert!(MembershipStateMachine::can_transition(
                MemberStatus::Active,
                &MembershipEvent::Leave,
                Some(&member)
            ));
            assert!(!MembershipStateMachine::can_transition(
                MemberStatus::Active,
                &MembershipEvent::Leave,
                Some(&owner)
            ));
            assert!(MembershipStateMachine::can_transition(
                MemberStatus::Left,
                &MembershipEvent::Reactivate,
                None
            ));
        }
    }
}
