use crate::api::middleware::error::{ApiError, ApiResult};
use crate::database::Database;
use crate::models::{CreateProviderRequest, OutboxRecord, Provider};
use crate::shared::events::DomainEvent;
use crate::shared::utils::validate_and_normalize_email;

#[derive(Clone)]
pub struct ProviderService {
    db: Database,
    outbox_max_attempts: i32,
}

impl ProviderService {
    pub fn new(db: Database, outbox_max_attempts: i32) -> Self {
        Self {
            db,
            outbox_max_attempts,
        }
    }

    /// Create a provider. The `provider.created` outbox row commits with the
    /// insert; the acting user's notification is written later by the
    /// processor.
    pub async fn create_provider(&self, request: CreateProviderRequest) -> ApiResult<Provider> {
        if request.name.trim().is_empty() {
            return Err(ApiError::BadRequest("Provider name is required".to_string()));
        }

        let email = validate_and_normalize_email(&request.email)?;

        if self
            .db
            .get_user_by_id(&request.created_by)
            .await?
            .is_none()
        {
            return Err(ApiError::BadRequest(
                "Acting user does not exist".to_string(),
            ));
        }

        let provider = Provider::new(
            request.name.trim().to_string(),
            email,
            request.phone,
            request.created_by,
        );

        let event = DomainEvent::ProviderCreated {
            provider_id: provider.id.clone(),
            actor_id: provider.created_by.clone(),
        };
        let record = OutboxRecord::from_event(&event, self.outbox_max_attempts);

        self.db.create_provider(&provider, &record).await?;

        tracing::info!(
            "Provider {} created by user {}, notification queued",
            provider.id,
            provider.created_by
        );

        Ok(provider)
    }

    pub async fn get_provider(&self, provider_id: &str) -> ApiResult<Provider> {
        self.db
            .get_provider_by_id(provider_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Provider not found".to_string()))
    }

    pub async fn list_providers(
        &self,
        limit: i64,
        offset: i64,
    ) -> ApiResult<(Vec<Provider>, i64)> {
        let providers = self.db.list_providers(limit, offset).await?;
        let total = self.db.count_providers().await?;
        Ok((providers, total))
    }

    pub async fn delete_provider(&self, provider_id: &str) -> ApiResult<()> {
        let deleted = self.db.delete_provider(provider_id).await?;
        if !deleted {
            return Err(ApiError::NotFound("Provider not found".to_string()));
        }
        Ok(())
    }
}
