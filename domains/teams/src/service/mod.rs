//! Engine services: team registry, membership ledger, invitation workflow

pub mod invitations;
pub mod ledger;
pub mod registry;

pub use invitations::{AcceptedInvitation, InvitationWorkflow, MIN_SEARCH_QUERY_LEN};
pub use ledger::{MemberRoster, MembershipLedger};
pub use registry::{TeamChanges, TeamRegistry};
