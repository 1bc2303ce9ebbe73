use spotless::database::Database;

pub async fn setup_test_db() -> Database {
    // Install drivers for AnyPool (required for tests)
    sqlx::any::install_default_drivers();

    // File-based SQLite with a unique name per test for parallel execution
    use uuid::Uuid;
    let temp_file = format!("test_{}.db", Uuid::new_v4());
    let db_url = format!("sqlite://{}?mode=rwc", temp_file);

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");

    setup_schema(&db).await;

    db
}

async fn setup_schema(db: &Database) {
    let pool = db.pool();

    sqlx::query(
        "CREATE TABLE users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            display_name TEXT NOT NULL,
            role TEXT NOT NULL CHECK(role IN ('admin', 'staff', 'customer')) DEFAULT 'staff',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create users table");

    sqlx::query("CREATE INDEX idx_users_email ON users(email)")
        .execute(pool)
        .await
        .ok();

    sqlx::query(
        "CREATE TABLE accounts (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create accounts table");

    sqlx::query(
        "CREATE TABLE customers (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            tax_id TEXT NOT NULL,
            registration_number TEXT NOT NULL,
            organization_type TEXT NOT NULL CHECK(organization_type IN ('company', 'sole_trader', 'nonprofit')),
            loyalty_tier TEXT NOT NULL CHECK(loyalty_tier IN ('standard', 'silver', 'gold')) DEFAULT 'standard',
            billing_street TEXT NOT NULL,
            billing_city TEXT NOT NULL,
            billing_postal_code TEXT NOT NULL,
            payment_method TEXT NOT NULL CHECK(payment_method IN ('invoice', 'card', 'direct_debit')),
            preferred_days TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create customers table");

    sqlx::query(
        "CREATE TABLE providers (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT,
            created_by TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create providers table");

    sqlx::query(
        "CREATE TABLE notifications (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            kind TEXT NOT NULL CHECK(kind IN ('provider_created', 'system')),
            message TEXT NOT NULL,
            created_at TEXT NOT NULL,
            is_read INTEGER NOT NULL DEFAULT 0
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create notifications table");

    sqlx::query("CREATE INDEX idx_notifications_user_unread ON notifications(user_id, is_read)")
        .execute(pool)
        .await
        .ok();

    sqlx::query(
        "CREATE TABLE outbox (
            id TEXT PRIMARY KEY,
            event_type TEXT NOT NULL,
            payload TEXT NOT NULL,
            status TEXT NOT NULL CHECK(status IN ('pending', 'processing', 'completed', 'failed')) DEFAULT 'pending',
            run_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            attempts INTEGER NOT NULL DEFAULT 0,
            max_attempts INTEGER NOT NULL DEFAULT 3,
            last_error TEXT,
            locked_until TEXT
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create outbox table");

    sqlx::query("CREATE INDEX idx_outbox_status_run_at ON outbox(status, run_at)")
        .execute(pool)
        .await
        .ok();
}

pub async fn teardown_test_db(db: Database) {
    drop(db);
    // Test database files are cleaned up manually or by .gitignore
}
