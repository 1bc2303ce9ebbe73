use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::database::Database;
use crate::models::{Notification, OutboxRecord};
use crate::shared::events::DomainEvent;
use crate::workers::OutboxQueue;

/// Polls the outbox and runs each claimed side effect in its own
/// transaction, after and independent of the publisher's committed one. A
/// failing side effect never rolls back the primary write; it is retried by
/// the queue and surfaced only in logs.
pub struct OutboxProcessor {
    queue: Arc<dyn OutboxQueue>,
    db: Database,
    poll_interval: Duration,
}

impl OutboxProcessor {
    pub fn new(queue: Arc<dyn OutboxQueue>, db: Database, poll_interval: Duration) -> Self {
        Self {
            queue,
            db,
            poll_interval,
        }
    }

    pub async fn run(&self) {
        info!("Starting OutboxProcessor...");
        loop {
            match self.process_next().await {
                Ok(Some(_)) => {
                    // Record processed, check for the next one immediately
                    continue;
                }
                Ok(None) => {
                    tokio::time::sleep(self.poll_interval).await;
                }
                Err(e) => {
                    error!("Error processing outbox record: {}", e);
                    tokio::time::sleep(self.poll_interval * 5).await;
                }
            }
        }
    }

    /// Claim and process one record. Returns Ok(None) when nothing was due.
    pub async fn process_next(&self) -> Result<Option<()>, String> {
        let record = self.queue.fetch_next().await.map_err(|e| e.to_string())?;

        let Some(record) = record else {
            return Ok(None);
        };

        info!(
            "Processing outbox record {} (event: {})",
            record.id, record.event_type
        );

        match self.execute(&record).await {
            Ok(_) => {
                if let Err(e) = self.queue.complete(&record.id).await {
                    error!("Failed to mark outbox record {} completed: {}", record.id, e);
                }
            }
            Err(e) => {
                error!("Outbox record {} failed: {}", record.id, e);
                if let Err(retry_err) = self.queue.fail(&record.id, &e).await {
                    error!(
                        "Failed to mark outbox record {} as failed: {}",
                        record.id, retry_err
                    );
                }
            }
        }

        Ok(Some(()))
    }

    async fn execute(&self, record: &OutboxRecord) -> Result<(), String> {
        let event = DomainEvent::decode(&record.event_type, &record.payload)?;

        match event {
            DomainEvent::UserDeleted { user_id } => self.handle_user_deleted(&user_id).await,
            DomainEvent::ProviderCreated {
                provider_id,
                actor_id,
            } => self.handle_provider_created(&provider_id, &actor_id).await,
            DomainEvent::UserRoleUpdated {
                user_id,
                role,
                token_refreshed,
            } => {
                // Data shape only; nothing reacts to role updates yet
                info!(
                    "Role of user {} updated to {} (token refreshed: {})",
                    user_id, role, token_refreshed
                );
                Ok(())
            }
        }
    }

    // --- Event handlers ---

    async fn handle_user_deleted(&self, user_id: &str) -> Result<(), String> {
        let removed = self
            .db
            .delete_account_by_user_id(user_id)
            .await
            .map_err(|e| e.to_string())?;

        if removed {
            info!("Deleted account of removed user {}", user_id);
        } else {
            // User had no account; nothing to do
            debug!("No account to delete for removed user {}", user_id);
        }

        Ok(())
    }

    async fn handle_provider_created(
        &self,
        provider_id: &str,
        actor_id: &str,
    ) -> Result<(), String> {
        let provider = self
            .db
            .get_provider_by_id(provider_id)
            .await
            .map_err(|e| e.to_string())?;

        let Some(provider) = provider else {
            info!(
                "Provider {} vanished before notification could be written; skipping",
                provider_id
            );
            return Ok(());
        };

        let actor = self
            .db
            .get_user_by_id(actor_id)
            .await
            .map_err(|e| e.to_string())?;

        if actor.is_none() {
            info!(
                "Acting user {} no longer exists; skipping provider notification",
                actor_id
            );
            return Ok(());
        }

        let notification = Notification::provider_created(actor_id.to_string(), &provider.name);
        self.db
            .create_notification(&notification)
            .await
            .map_err(|e| e.to_string())?;

        info!(
            "Notified user {} about creation of provider {}",
            actor_id, provider_id
        );

        Ok(())
    }
}
