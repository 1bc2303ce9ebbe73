use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Service provider. Creation is notification-worthy: the acting user gets a
/// `provider_created` notification through the outbox cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Provider {
    pub fn new(name: String, email: String, phone: Option<String>, created_by: String) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email: email.to_lowercase(),
            phone,
            created_by,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

// DTOs for API requests
#[derive(Debug, Deserialize)]
pub struct CreateProviderRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Id of the user performing the creation; referenced by the
    /// `provider.created` event.
    pub created_by: String,
}
