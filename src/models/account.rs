use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account owned one-to-one by a user. Removal on user deletion is enforced
/// by the outbox cascade rather than a database-level cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Account {
    pub fn new(user_id: String, password_hash: String) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            password_hash,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
