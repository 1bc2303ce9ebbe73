mod helpers;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use helpers::*;
use sqlx::Row;
use spotless::database::Database;
use spotless::models::{CreateUserRequest, OutboxStatus};
use spotless::services::UserService;
use spotless::workers::{OutboxProcessor, OutboxQueue, SqlOutboxQueue};

async fn seed_pending_record(db: &Database, max_attempts: i32) -> String {
    let service = UserService::new(db.clone(), max_attempts);
    let (user, _) = service
        .create_user(CreateUserRequest {
            email: format!("seed-{}@example.com", uuid::Uuid::new_v4()),
            display_name: "Seed".to_string(),
            password: None,
            role: None,
        })
        .await
        .unwrap();
    service.delete_user(&user.id).await.unwrap();

    let row = sqlx::query("SELECT id FROM outbox ORDER BY created_at DESC LIMIT 1")
        .fetch_one(db.pool())
        .await
        .unwrap();
    row.try_get("id").unwrap()
}

#[tokio::test]
async fn test_record_can_be_claimed_only_once() {
    let db = setup_test_db().await;
    let id = seed_pending_record(&db, 3).await;

    let queue = SqlOutboxQueue::new(db.clone());

    let claimed = queue.fetch_next().await.unwrap().unwrap();
    assert_eq!(claimed.id, id);

    // Claimed record is now processing; a second fetch finds nothing
    assert!(queue.fetch_next().await.unwrap().is_none());

    queue.complete(&id).await.unwrap();
    let record = db.get_outbox_record(&id).await.unwrap().unwrap();
    assert_eq!(record.status, OutboxStatus::Completed);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_failure_reschedules_with_backoff() {
    let db = setup_test_db().await;
    let id = seed_pending_record(&db, 3).await;

    let queue = SqlOutboxQueue::new(db.clone());
    queue.fetch_next().await.unwrap().unwrap();
    queue.fail(&id, "account table on fire").await.unwrap();

    let record = db.get_outbox_record(&id).await.unwrap().unwrap();
    assert_eq!(record.status, OutboxStatus::Pending);
    assert_eq!(record.attempts, 1);
    assert_eq!(record.last_error.as_deref(), Some("account table on fire"));
    assert!(record.run_at > Utc::now());

    // Not due yet, so it cannot be claimed again
    assert!(queue.fetch_next().await.unwrap().is_none());

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_failure_exhausts_to_failed_state() {
    let db = setup_test_db().await;
    let id = seed_pending_record(&db, 1).await;

    let queue = SqlOutboxQueue::new(db.clone());
    queue.fetch_next().await.unwrap().unwrap();
    queue.fail(&id, "still on fire").await.unwrap();

    let record = db.get_outbox_record(&id).await.unwrap().unwrap();
    assert_eq!(record.status, OutboxStatus::Failed);
    assert_eq!(record.attempts, 1);

    // Terminal: nothing left to claim
    assert!(queue.fetch_next().await.unwrap().is_none());

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_unknown_event_type_ends_up_failed() {
    let db = setup_test_db().await;

    let now = Utc::now().to_rfc3339();
    sqlx::query(
        "INSERT INTO outbox (id, event_type, payload, status, run_at, created_at, updated_at,
                             attempts, max_attempts)
         VALUES (?, 'cleaning.finished', '{}', 'pending', ?, ?, ?, 0, 1)",
    )
    .bind("bogus-1")
    .bind(&now)
    .bind(&now)
    .bind(&now)
    .execute(db.pool())
    .await
    .unwrap();

    let worker = OutboxProcessor::new(
        Arc::new(SqlOutboxQueue::new(db.clone())),
        db.clone(),
        Duration::from_millis(10),
    );
    assert!(worker.process_next().await.unwrap().is_some());

    let record = db.get_outbox_record("bogus-1").await.unwrap().unwrap();
    assert_eq!(record.status, OutboxStatus::Failed);
    assert!(record.last_error.unwrap().contains("Unknown event type"));

    teardown_test_db(db).await;
}
