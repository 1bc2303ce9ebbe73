use std::sync::Arc;
use std::time::Duration;

use crate::api::middleware::AppState;
use crate::config::Config;
use crate::database::Database;
use crate::services::{CustomerService, NotificationService, ProviderService, UserService};
use crate::workers::{OutboxProcessor, SqlOutboxQueue};

pub fn build_app_state(db: Database, config: &Config) -> AppState {
    let users = UserService::new(db.clone(), config.outbox_max_attempts);
    let customers = CustomerService::new(db.clone());
    let providers = ProviderService::new(db.clone(), config.outbox_max_attempts);
    let notifications = NotificationService::new(db.clone());
    tracing::info!("Application services initialized");

    AppState {
        db,
        users,
        customers,
        providers,
        notifications,
    }
}

pub fn spawn_outbox_processor(db: Database, config: &Config) -> tokio::task::JoinHandle<()> {
    let queue = Arc::new(SqlOutboxQueue::new(db.clone()));
    let processor = OutboxProcessor::new(
        queue,
        db,
        Duration::from_secs(config.outbox_poll_interval_secs),
    );
    tracing::info!(
        "Outbox processor starting (poll interval {}s, max attempts {})",
        config.outbox_poll_interval_secs,
        config.outbox_max_attempts
    );

    tokio::spawn(async move { processor.run().await })
}
