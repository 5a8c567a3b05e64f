//! Domain entities for the Teamline teams domain
//!
//! Each entity carries its own validation and the business rules that do
//! not need storage access. State transitions delegate to the machines in
//! [`crate::domain::state`].

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use teamline_common::{Error, Result};
use validator::ValidateEmail;

pub use crate::domain::state::{InvitationStatus, MemberStatus};
use crate::domain::state::{
    InvitationEvent, InvitationStateMachine, MembershipEvent, MembershipGuardContext,
    MembershipStateMachine, StateError,
};

/// Length of a team's shareable join code
pub const TEAM_CODE_LEN: usize = 4;

/// Alphabet the team code is drawn from (uppercase letters + digits)
pub const TEAM_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// User entity, an identity-directory profile record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Unique human-shareable join code used for people search
    pub user_code: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with validation
    pub fn new(id: Uuid, name: String, email: String, user_code: String) -> Result<Self> {
        if name.is_empty() || name.len() > 100 {
            return Err(Error::Validation(
                "Name must be 1-100 characters".to_string(),
            ));
        }

        if !email.validate_email() {
            return Err(Error::Validation("Invalid email format".to_string()));
        }

        if user_code.is_empty() || user_code.len() > 32 {
            return Err(Error::Validation(
                "User code must be 1-32 characters".to_string(),
            ));
        }

        Ok(User {
            id,
            name,
            email,
            user_code,
            avatar_url: None,
            created_at: Utc::now(),
        })
    }
}

/// Team entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    /// Immutable shareable join code, unique across all teams
    pub team_code: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team with validation. The caller supplies a code that
    /// has already been checked for uniqueness against storage.
    pub fn new(
        name: String,
        description: Option<String>,
        owner_id: Uuid,
        team_code: String,
    ) -> Result<Self> {
        Self::validate_name(&name)?;
        Self::validate_code(&team_code)?;

        Ok(Team {
            id: Uuid::new_v4(),
            name,
            team_code,
            description,
            owner_id,
            created_at: Utc::now(),
        })
    }

    /// Validate team name length
    pub fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() || name.len() > 100 {
            return Err(Error::Validation(
                "Team name must be 1-100 characters".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate team code format: fixed length, uppercase letters + digits
    pub fn validate_code(code: &str) -> Result<()> {
        if code.len() != TEAM_CODE_LEN {
            return Err(Error::Validation(format!(
                "Team code must be exactly {} characters",
                TEAM_CODE_LEN
            )));
        }

        if !code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(Error::Validation(
                "Team code must contain only uppercase letters and digits".to_string(),
            ));
        }

        Ok(())
    }

    /// Draw a random candidate team code. Uniqueness is the registry's
    /// responsibility: it retries against storage until the code is free.
    pub fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        (0..TEAM_CODE_LEN)
            .map(|_| TEAM_CODE_ALPHABET[rng.gen_range(0..TEAM_CODE_ALPHABET.len())] as char)
            .collect()
    }
}

/// Membership roles within a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "member_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    #[default]
    Member,
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberRole::Owner => write!(f, "owner"),
            MemberRole::Member => write!(f, "member"),
        }
    }
}

impl MemberRole {
    /// Check if this role is owner
    pub fn is_owner(&self) -> bool {
        matches!(self, MemberRole::Owner)
    }
}

/// TeamMember entity: the ledger row for one (team, user) pair.
///
/// There is exactly one row per pair for a team's lifetime; departures are
/// recorded by flipping `status` to `left`, never by deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TeamMember {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role: MemberRole,
    pub status: MemberStatus,
    pub joined_at: DateTime<Utc>,
    pub left_at: Option<DateTime<Utc>>,
}

impl TeamMember {
    /// Create a new active membership
    pub fn new(team_id: Uuid, user_id: Uuid, role: MemberRole) -> Self {
        TeamMember {
            id: Uuid::new_v4(),
            team_id,
            user_id,
            role,
            status: MemberStatus::Active,
            joined_at: Utc::now(),
            left_at: None,
        }
    }

    /// Check if this row grants team access
    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }

    /// Transition the row to `left`, recording the departure time
    pub fn mark_left(&mut self) -> Result<()> {
        let context = MembershipGuardContext {
            is_owner: self.role.is_owner(),
        };
        self.status = Self::apply_transition(self.status, MembershipEvent::Leave, Some(&context))?;
        self.left_at = Some(Utc::now());
        Ok(())
    }

    /// Reactivate a departed row. The rejoining member always comes back
    /// with role `member`, regardless of the role they left with.
    pub fn reactivate(&mut self) -> Result<()> {
        self.status = Self::apply_transition(self.status, MembershipEvent::Reactivate, None)?;
        self.role = MemberRole::Member;
        self.left_at = None;
        Ok(())
    }

    fn apply_transition(
        current: MemberStatus,
        event: MembershipEvent,
        context: Option<&MembershipGuardContext>,
    ) -> Result<MemberStatus> {
        MembershipStateMachine::transition(current, event, context).map_err(|e| match e {
            StateError::GuardFailed(msg) => Error::Authorization(msg),
            StateError::InvalidTransition { from, event } => Error::Conflict(format!(
                "Invalid membership transition: cannot apply '{}' from '{}'",
                event, from
            )),
            StateError::TerminalState(state) => Error::Conflict(format!(
                "Membership is in terminal state '{}' and cannot transition",
                state
            )),
        })
    }

    /// Validate invariants
    pub fn validate(&self) -> Result<()> {
        // left_at is non-null iff status is left
        match self.status {
            MemberStatus::Active if self.left_at.is_some() => {
                return Err(Error::Validation(
                    "Active membership cannot have a departure time".to_string(),
                ));
            }
            MemberStatus::Left if self.left_at.is_none() => {
                return Err(Error::Validation(
                    "Departed membership must have a departure time".to_string(),
                ));
            }
            _ => {}
        }

        // The owner's row is always active
        if self.role.is_owner() && self.status != MemberStatus::Active {
            return Err(Error::Validation(
                "Owner membership must be active".to_string(),
            ));
        }

        Ok(())
    }
}

/// Invitation entity, a pending offer to join a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Invitation {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub team_id: Uuid,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    /// Create a new pending invitation
    pub fn new(sender_id: Uuid, receiver_id: Uuid, team_id: Uuid) -> Self {
        Invitation {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id,
            team_id,
            status: InvitationStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Check if the invitation can still be resolved
    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }

    /// Accept the invitation
    pub fn accept(&mut self) -> Result<()> {
        self.status = self.apply_transition(InvitationEvent::Accept)?;
        Ok(())
    }

    /// Reject the invitation
    pub fn reject(&mut self) -> Result<()> {
        self.status = self.apply_transition(InvitationEvent::Reject)?;
        Ok(())
    }

    fn apply_transition(&self, event: InvitationEvent) -> Result<InvitationStatus> {
        InvitationStateMachine::transition(self.status, event).map_err(|e| match e {
            StateError::TerminalState(_) | StateError::InvalidTransition { .. } => {
                Error::Conflict("Invitation already processed".to_string())
            }
            StateError::GuardFailed(msg) => Error::Conflict(msg),
        })
    }
}
