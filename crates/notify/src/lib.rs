//! Teamline notification sink
//!
//! The engine and its callers emit fire-and-forget events through the
//! [`NotificationSink`] trait. Delivery never influences engine decisions:
//! a failed delivery is logged by the caller and the triggering operation
//! still succeeds.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod mock;

pub use mock::MockNotificationSink;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification delivery error: {0}")]
    Delivery(String),

    #[error("Notification configuration error: {0}")]
    Configuration(String),
}

/// Kind of event being delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    InvitationAccepted,
    TaskAssigned,
    TaskUpdated,
    ProjectCreated,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::InvitationAccepted => write!(f, "invitation_accepted"),
            NotificationKind::TaskAssigned => write!(f, "task_assigned"),
            NotificationKind::TaskUpdated => write!(f, "task_updated"),
            NotificationKind::ProjectCreated => write!(f, "project_created"),
        }
    }
}

/// A single event addressed to one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub related_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl NotificationEvent {
    pub fn new(
        user_id: Uuid,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        related_id: Option<Uuid>,
    ) -> Self {
        Self {
            user_id,
            kind,
            title: title.into(),
            message: message.into(),
            related_id,
            created_at: Utc::now(),
        }
    }

    /// Event sent to an invitation's sender when the receiver accepts
    pub fn invitation_accepted(
        sender_id: Uuid,
        accepter_name: &str,
        team_name: &str,
        team_id: Uuid,
    ) -> Self {
        Self::new(
            sender_id,
            NotificationKind::InvitationAccepted,
            "Invitation Accepted",
            format!("{} joined team: {}", accepter_name, team_name),
            Some(team_id),
        )
    }

    /// Event sent to a task's assignee (emitted by the task service)
    pub fn task_assigned(
        assignee_id: Uuid,
        task_id: Uuid,
        task_title: &str,
        assigner_name: &str,
    ) -> Self {
        Self::new(
            assignee_id,
            NotificationKind::TaskAssigned,
            "New Task Assigned",
            format!("{} assigned you to task: {}", assigner_name, task_title),
            Some(task_id),
        )
    }

    /// Event sent when a task changes (emitted by the task service)
    pub fn task_updated(user_id: Uuid, task_id: Uuid, task_title: &str, updater_name: &str) -> Self {
        Self::new(
            user_id,
            NotificationKind::TaskUpdated,
            "Task Updated",
            format!("{} updated task: {}", updater_name, task_title),
            Some(task_id),
        )
    }

    /// Event sent when a project is created (emitted by the project service)
    pub fn project_created(
        user_id: Uuid,
        project_id: Uuid,
        project_name: &str,
        creator_name: &str,
    ) -> Self {
        Self::new(
            user_id,
            NotificationKind::ProjectCreated,
            "New Project Created",
            format!("{} created project: {}", creator_name, project_name),
            Some(project_id),
        )
    }
}

/// Delivery boundary for notification events
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver a single event. Callers treat failures as non-fatal.
    async fn deliver(&self, event: NotificationEvent) -> Result<(), NotifyError>;
}

/// Sink that records events to the tracing log.
///
/// The default for deployments that have not wired a real delivery
/// channel; downstream services tail the log or replace the sink.
#[derive(Debug, Clone, Default)]
pub struct LogNotificationSink;

impl LogNotificationSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationSink for LogNotificationSink {
    async fn deliver(&self, event: NotificationEvent) -> Result<(), NotifyError> {
        tracing::info!(
            user_id = %event.user_id,
            kind = %event.kind,
            title = %event.title,
            related_id = ?event.related_id,
            "notification event"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invitation_accepted_event_shape() {
        let sender = Uuid::new_v4();
        let team = Uuid::new_v4();
        let event = NotificationEvent::invitation_accepted(sender, "Ada", "Compilers", team);

        assert_eq!(event.user_id, sender);
        assert_eq!(event.kind, NotificationKind::InvitationAccepted);
        assert_eq!(event.related_id, Some(team));
        assert!(event.message.contains("Ada"));
        assert!(event.message.contains("Compilers"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(
            NotificationKind::InvitationAccepted.to_string(),
            "invitation_accepted"
        );
        assert_eq!(NotificationKind::TaskAssigned.to_string(), "task_assigned");
        assert_eq!(NotificationKind::TaskUpdated.to_string(), "task_updated");
        assert_eq!(
            NotificationKind::ProjectCreated.to_string(),
            "project_created"
        );
    }
}
