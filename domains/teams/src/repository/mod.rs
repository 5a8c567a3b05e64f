//! Repository implementations for the teams domain

pub mod invitations;
pub mod members;
pub mod teams;
pub mod transactions;
pub mod users;

use sqlx::{PgPool, Postgres, Transaction};

pub use invitations::{InvitationRepository, InvitationWithParties};
pub use members::{MemberRepository, MemberWithProfile};
pub use teams::{TeamRepository, TeamWithMemberCount};
pub use transactions::{
    create_member_tx, create_team_tx, delete_team_cascade_tx,
    get_member_for_update_tx, mark_invitation_accepted_tx, reactivate_member_tx,
};
pub use users::UserRepository;

/// Combined repository access for the teams domain
#[derive(Clone)]
pub struct TeamsRepositories {
    pool: PgPool,
    pub users: UserRepository,
    pub teams: TeamRepository,
    pub members: MemberRepository,
    pub invitations: InvitationRepository,
}

impl TeamsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            teams: TeamRepository::new(pool.clone()),
            members: MemberRepository::new(pool.clone()),
            invitations: InvitationRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
