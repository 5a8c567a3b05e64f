//! Teams domain state and auth integration

use std::sync::Arc;

use axum::extract::FromRef;
use teamline_auth::AuthConfig;
use teamline_notify::NotificationSink;

use crate::repository::TeamsRepositories;
use crate::service::{InvitationWorkflow, MembershipLedger, TeamRegistry};

/// Application state for the teams domain
#[derive(Clone)]
pub struct TeamsState {
    pub repos: TeamsRepositories,
    pub auth: AuthConfig,
    pub notify: Arc<dyn NotificationSink>,
}

impl TeamsState {
    pub fn registry(&self) -> TeamRegistry {
        TeamRegistry::new(self.repos.clone())
    }

    pub fn ledger(&self) -> MembershipLedger {
        MembershipLedger::new(self.repos.clone())
    }

    pub fn invitations(&self) -> InvitationWorkflow {
        InvitationWorkflow::new(self.repos.clone(), self.notify.clone())
    }
}

impl FromRef<TeamsState> for AuthConfig {
    fn from_ref(state: &TeamsState) -> Self {
        state.auth.clone()
    }
}
