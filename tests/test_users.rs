mod helpers;

use helpers::*;
use spotless::database::Database;
use spotless::models::{CreateUserRequest, UserRole};
use spotless::services::{verify_password, UserService};
use spotless::ApiError;

fn service(db: &Database) -> UserService {
    UserService::new(db.clone(), 3)
}

fn create_request(email: &str, password: Option<&str>, role: Option<UserRole>) -> CreateUserRequest {
    CreateUserRequest {
        email: email.to_string(),
        display_name: "Cleaning Admin".to_string(),
        password: password.map(|p| p.to_string()),
        role,
    }
}

#[tokio::test]
async fn test_create_user_with_account_hashes_password() {
    let db = setup_test_db().await;

    let (user, has_account) = service(&db)
        .create_user(create_request(
            "Admin@Example.com",
            Some("broom-closet-9"),
            Some(UserRole::Admin),
        ))
        .await
        .unwrap();

    assert!(has_account);
    assert_eq!(user.email, "admin@example.com");
    assert_eq!(user.role, UserRole::Admin);

    let account = db.get_account_by_user_id(&user.id).await.unwrap().unwrap();
    assert_ne!(account.password_hash, "broom-closet-9");
    assert!(verify_password("broom-closet-9", &account.password_hash).unwrap());

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_role_defaults_to_staff() {
    let db = setup_test_db().await;

    let (user, _) = service(&db)
        .create_user(create_request("plain@example.com", None, None))
        .await
        .unwrap();
    assert_eq!(user.role, UserRole::Staff);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let db = setup_test_db().await;
    let service = service(&db);

    service
        .create_user(create_request("dup@example.com", None, None))
        .await
        .unwrap();

    let err = service
        .create_user(create_request("dup@example.com", None, None))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_short_password_rejected() {
    let db = setup_test_db().await;

    let err = service(&db)
        .create_user(create_request("short@example.com", Some("mop"), None))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_invalid_email_rejected() {
    let db = setup_test_db().await;

    let err = service(&db)
        .create_user(create_request("not-an-email", None, None))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_update_role_persists() {
    let db = setup_test_db().await;
    let service = service(&db);

    let (user, _) = service
        .create_user(create_request("promote@example.com", None, None))
        .await
        .unwrap();

    service.update_role(&user.id, UserRole::Admin).await.unwrap();

    let (stored, _) = service.get_user(&user.id).await.unwrap();
    assert_eq!(stored.role, UserRole::Admin);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_update_role_of_missing_user_is_not_found() {
    let db = setup_test_db().await;

    let err = service(&db)
        .update_role("no-such-user", UserRole::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    teardown_test_db(db).await;
}
