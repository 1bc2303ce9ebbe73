use serde_json::{json, Value};
use std::str::FromStr;

use crate::models::UserRole;

/// Domain events recorded in the outbox. Each variant has a stable wire name
/// and a JSON payload; both must survive a round trip through the outbox
/// table.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    UserDeleted {
        user_id: String,
    },
    ProviderCreated {
        provider_id: String,
        actor_id: String,
    },
    UserRoleUpdated {
        user_id: String,
        role: UserRole,
        /// Whether the stored role actually changed (the point at which a
        /// credential would need reissuing).
        token_refreshed: bool,
    },
}

impl DomainEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::UserDeleted { .. } => "user.deleted",
            DomainEvent::ProviderCreated { .. } => "provider.created",
            DomainEvent::UserRoleUpdated { .. } => "user.role_updated",
        }
    }

    pub fn payload(&self) -> Value {
        match self {
            DomainEvent::UserDeleted { user_id } => json!({ "user_id": user_id }),
            DomainEvent::ProviderCreated {
                provider_id,
                actor_id,
            } => json!({ "provider_id": provider_id, "actor_id": actor_id }),
            DomainEvent::UserRoleUpdated {
                user_id,
                role,
                token_refreshed,
            } => json!({
                "user_id": user_id,
                "role": role.as_str(),
                "token_refreshed": token_refreshed,
            }),
        }
    }

    /// Rebuild an event from its stored (`event_type`, payload) pair.
    pub fn decode(event_type: &str, payload: &Value) -> Result<Self, String> {
        fn field(payload: &Value, name: &str) -> Result<String, String> {
            payload[name]
                .as_str()
                .map(|s| s.to_string())
                .ok_or_else(|| format!("Missing '{}' in event payload", name))
        }

        match event_type {
            "user.deleted" => Ok(DomainEvent::UserDeleted {
                user_id: field(payload, "user_id")?,
            }),
            "provider.created" => Ok(DomainEvent::ProviderCreated {
                provider_id: field(payload, "provider_id")?,
                actor_id: field(payload, "actor_id")?,
            }),
            "user.role_updated" => Ok(DomainEvent::UserRoleUpdated {
                user_id: field(payload, "user_id")?,
                role: UserRole::from_str(&field(payload, "role")?)?,
                token_refreshed: payload["token_refreshed"]
                    .as_bool()
                    .ok_or("Missing 'token_refreshed' in event payload")?,
            }),
            other => Err(format!("Unknown event type: {}", other)),
        }
    }
}
