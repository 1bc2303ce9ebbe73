use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Notification kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ProviderCreated,
    System,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::ProviderCreated => "provider_created",
            NotificationKind::System => "system",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for NotificationKind {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "provider_created" => NotificationKind::ProviderCreated,
            _ => NotificationKind::System,
        }
    }
}

/// Notification owned by exactly one user; listed most-recent-first and
/// filterable by read state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: String,
    pub is_read: bool,
}

impl Notification {
    pub fn new(user_id: String, kind: NotificationKind, message: String) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            kind,
            message,
            created_at: now,
            is_read: false,
        }
    }

    /// Notification for the user that created a provider.
    pub fn provider_created(actor_id: String, provider_name: &str) -> Self {
        Self::new(
            actor_id,
            NotificationKind::ProviderCreated,
            format!("Provider \"{}\" was created", provider_name),
        )
    }
}

// DTOs for API requests
#[derive(Debug, Deserialize)]
pub struct CreateNotificationRequest {
    pub user_id: String,
    pub kind: NotificationKind,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serialization() {
        assert_eq!(NotificationKind::ProviderCreated.as_str(), "provider_created");
        assert_eq!(NotificationKind::System.as_str(), "system");
    }

    #[test]
    fn test_kind_from_string_falls_back_to_system() {
        assert_eq!(
            NotificationKind::from("provider_created".to_string()),
            NotificationKind::ProviderCreated
        );
        assert_eq!(
            NotificationKind::from("something_else".to_string()),
            NotificationKind::System
        );
    }

    #[test]
    fn test_new_notification_starts_unread() {
        let n = Notification::new(
            "user-1".to_string(),
            NotificationKind::System,
            "hello".to_string(),
        );
        assert!(!n.is_read);
        assert_eq!(n.user_id, "user-1");
    }

    #[test]
    fn test_provider_created_message_names_provider() {
        let n = Notification::provider_created("user-1".to_string(), "Shiny Floors Oy");
        assert_eq!(n.kind, NotificationKind::ProviderCreated);
        assert!(n.message.contains("Shiny Floors Oy"));
    }
}
