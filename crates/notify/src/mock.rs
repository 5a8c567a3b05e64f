//! Mock notification sink
//!
//! Captures events in memory so tests can assert on what the engine
//! emitted without any external dependency.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{NotificationEvent, NotificationKind, NotificationSink, NotifyError};

/// In-memory sink recording every delivered event
#[derive(Debug, Clone, Default)]
pub struct MockNotificationSink {
    delivered: Arc<Mutex<Vec<NotificationEvent>>>,
    fail_deliveries: Arc<Mutex<bool>>,
}

impl MockNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events delivered so far
    pub fn delivered(&self) -> Vec<NotificationEvent> {
        self.delivered.lock().unwrap().clone()
    }

    /// Events delivered to a specific user
    pub fn delivered_to(&self, user_id: Uuid) -> Vec<NotificationEvent> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Events of a specific kind
    pub fn delivered_of_kind(&self, kind: NotificationKind) -> Vec<NotificationEvent> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }

    /// Make subsequent deliveries fail, for exercising the
    /// fire-and-forget contract.
    pub fn set_failing(&self, failing: bool) {
        *self.fail_deliveries.lock().unwrap() = failing;
    }

    pub fn clear(&self) {
        self.delivered.lock().unwrap().clear();
    }
}

#[async_trait]
impl NotificationSink for MockNotificationSink {
    async fn deliver(&self, event: NotificationEvent) -> Result<(), NotifyError> {
        if *self.fail_deliveries.lock().unwrap() {
            return Err(NotifyError::Delivery(
                "mock sink configured to fail".to_string(),
            ));
        }
        self.delivered.lock().unwrap().push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_sink_captures_events() {
        let sink = MockNotificationSink::new();
        let user = Uuid::new_v4();

        sink.deliver(NotificationEvent::invitation_accepted(
            user,
            "Grace",
            "Systems",
            Uuid::new_v4(),
        ))
        .await
        .unwrap();

        let events = sink.delivered_to(user);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, NotificationKind::InvitationAccepted);
        assert!(sink
            .delivered_of_kind(NotificationKind::TaskAssigned)
            .is_empty());
    }

    #[tokio::test]
    async fn test_mock_sink_failure_mode() {
        let sink = MockNotificationSink::new();
        sink.set_failing(true);

        let result = sink
            .deliver(NotificationEvent::invitation_accepted(
                Uuid::new_v4(),
                "Grace",
                "Systems",
                Uuid::new_v4(),
            ))
            .await;

        assert!(result.is_err());
        assert!(sink.delivered().is_empty());
    }
}
