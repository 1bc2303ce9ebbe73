mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::*;
use spotless::database::Database;
use spotless::models::{CreateProviderRequest, NotificationKind, OutboxStatus, User, UserRole};
use spotless::services::{NotificationService, ProviderService};
use spotless::workers::{OutboxProcessor, SqlOutboxQueue};
use spotless::ApiError;

fn provider_service(db: &Database) -> ProviderService {
    ProviderService::new(db.clone(), 3)
}

fn processor(db: &Database) -> OutboxProcessor {
    OutboxProcessor::new(
        Arc::new(SqlOutboxQueue::new(db.clone())),
        db.clone(),
        Duration::from_millis(10),
    )
}

async fn seed_actor(db: &Database) -> User {
    let actor = User::new(
        "dispatcher@example.com".to_string(),
        "Dispatcher".to_string(),
        UserRole::Staff,
    );
    db.create_user(&actor, None).await.unwrap();
    actor
}

fn create_request(name: &str, created_by: &str) -> CreateProviderRequest {
    CreateProviderRequest {
        name: name.to_string(),
        email: format!("{}@providers.example.com", name.to_lowercase().replace(' ', "-")),
        phone: Some("+358401234567".to_string()),
        created_by: created_by.to_string(),
    }
}

#[tokio::test]
async fn test_provider_creation_notifies_acting_user() {
    let db = setup_test_db().await;
    let actor = seed_actor(&db).await;
    let service = provider_service(&db);
    let notifications = NotificationService::new(db.clone());

    let provider = service
        .create_provider(create_request("Shiny Floors", &actor.id))
        .await
        .unwrap();

    // Provider row and outbox row committed together; no notification yet
    assert!(db.get_provider_by_id(&provider.id).await.unwrap().is_some());
    assert_eq!(
        db.count_outbox_records(OutboxStatus::Pending).await.unwrap(),
        1
    );
    assert_eq!(notifications.unread_count(&actor.id).await.unwrap(), 0);

    assert!(processor(&db).process_next().await.unwrap().is_some());

    let (listed, total) = notifications
        .list_notifications(&actor.id, true, 20, 0)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(listed[0].kind, NotificationKind::ProviderCreated);
    assert!(listed[0].message.contains("Shiny Floors"));
    assert_eq!(
        db.count_outbox_records(OutboxStatus::Completed)
            .await
            .unwrap(),
        1
    );

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_provider_vanished_before_worker_is_skipped() {
    let db = setup_test_db().await;
    let actor = seed_actor(&db).await;
    let service = provider_service(&db);

    let provider = service
        .create_provider(create_request("Fleeting Cleaners", &actor.id))
        .await
        .unwrap();
    service.delete_provider(&provider.id).await.unwrap();

    assert!(processor(&db).process_next().await.unwrap().is_some());

    // Skipped, not failed, and no notification was written
    assert_eq!(
        db.count_outbox_records(OutboxStatus::Completed)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        NotificationService::new(db.clone())
            .unread_count(&actor.id)
            .await
            .unwrap(),
        0
    );

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_unknown_acting_user_rejected() {
    let db = setup_test_db().await;
    let service = provider_service(&db);

    let err = service
        .create_provider(create_request("Orphan Cleaners", "no-such-user"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    // Nothing committed
    assert_eq!(db.count_providers().await.unwrap(), 0);
    assert_eq!(
        db.count_outbox_records(OutboxStatus::Pending).await.unwrap(),
        0
    );

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_provider_listing_pages() {
    let db = setup_test_db().await;
    let actor = seed_actor(&db).await;
    let service = provider_service(&db);

    for name in ["Alpha Clean", "Beta Clean", "Gamma Clean"] {
        service
            .create_provider(create_request(name, &actor.id))
            .await
            .unwrap();
    }

    // First page (offset 0) and second page (offset 2) of a 3-row set
    let (first_page, total) = service.list_providers(2, 0).await.unwrap();
    assert_eq!(total, 3);
    assert_eq!(first_page.len(), 2);

    let (second_page, _) = service.list_providers(2, 2).await.unwrap();
    assert_eq!(second_page.len(), 1);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_delete_missing_provider_is_not_found() {
    let db = setup_test_db().await;
    let service = provider_service(&db);

    let err = service.delete_provider("no-such-provider").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    teardown_test_db(db).await;
}
