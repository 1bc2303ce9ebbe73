use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::shared::events::DomainEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutboxStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl std::fmt::Display for OutboxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OutboxStatus::Pending => "pending",
            OutboxStatus::Processing => "processing",
            OutboxStatus::Completed => "completed",
            OutboxStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

impl From<String> for OutboxStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "processing" => OutboxStatus::Processing,
            "completed" => OutboxStatus::Completed,
            "failed" => OutboxStatus::Failed,
            _ => OutboxStatus::Pending,
        }
    }
}

/// Durable pending side effect, written in the same transaction as the
/// primary change and claimed later by the outbox processor.
#[derive(Debug, Clone)]
pub struct OutboxRecord {
    pub id: String,
    pub event_type: String,
    pub payload: Value,
    pub status: OutboxStatus,
    pub run_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub attempts: i32,
    pub max_attempts: i32,
    pub last_error: Option<String>,
}

impl OutboxRecord {
    pub fn from_event(event: &DomainEvent, max_attempts: i32) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            event_type: event.event_type().to_string(),
            payload: event.payload(),
            status: OutboxStatus::Pending,
            run_at: now,
            created_at: now,
            updated_at: now,
            attempts: 0,
            max_attempts,
            last_error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_event_starts_pending() {
        let event = DomainEvent::UserDeleted {
            user_id: "user-1".to_string(),
        };
        let record = OutboxRecord::from_event(&event, 3);

        assert_eq!(record.event_type, "user.deleted");
        assert_eq!(record.status, OutboxStatus::Pending);
        assert_eq!(record.attempts, 0);
        assert_eq!(record.max_attempts, 3);
        assert_eq!(record.payload["user_id"], "user-1");
        assert!(record.last_error.is_none());
    }

    #[test]
    fn test_status_from_string() {
        assert_eq!(
            OutboxStatus::from("completed".to_string()),
            OutboxStatus::Completed
        );
        assert_eq!(
            OutboxStatus::from("garbage".to_string()),
            OutboxStatus::Pending
        );
    }
}
