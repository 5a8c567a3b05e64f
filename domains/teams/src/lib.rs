//! Teams domain: users, teams, memberships, invitations
//!
//! The Team Membership & Invitation Lifecycle Engine. The membership
//! ledger is the authorization oracle every other subsystem consults; the
//! invitation workflow is the only writer allowed to resolve invitations.

pub mod api;
pub mod domain;
pub mod repository;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::state::{
    InvitationEvent, InvitationStateMachine, InvitationStatus, MemberStatus, MembershipEvent,
    MembershipGuardContext, MembershipStateMachine, StateError,
};
// Re-export repository types
pub use repository::{
    create_member_tx, create_team_tx, delete_team_cascade_tx, get_member_for_update_tx,
    mark_invitation_accepted_tx, reactivate_member_tx, InvitationRepository,
    InvitationWithParties, MemberRepository, MemberWithProfile, TeamRepository,
    TeamWithMemberCount, TeamsRepositories, UserRepository,
};
// Re-export engine services
pub use service::{
    AcceptedInvitation, InvitationWorkflow, MemberRoster, MembershipLedger, TeamChanges,
    TeamRegistry, MIN_SEARCH_QUERY_LEN,
};

// Re-export API types
pub use api::routes;
pub use api::TeamsState;
