#![allow(dead_code)]

use std::path::PathBuf;
use std::str::FromStr;

use diagnoser::db::Db;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Tables as the earliest release created them: no point columns, no
/// display settings and a mandatory trait link on every result.
pub const LEGACY_SCHEMA: &[&str] = &[
    "CREATE TABLE user (id INTEGER PRIMARY KEY, username VARCHAR(50) NOT NULL UNIQUE, password_hash VARCHAR(255) NOT NULL)",
    "CREATE TABLE quiz (id INTEGER PRIMARY KEY, title VARCHAR(200) NOT NULL, description TEXT)",
    r#"CREATE TABLE trait (id INTEGER PRIMARY KEY, quiz_id INTEGER NOT NULL, "key" VARCHAR(50) NOT NULL, name VARCHAR(100) NOT NULL)"#,
    r#"CREATE TABLE question (id INTEGER PRIMARY KEY, quiz_id INTEGER NOT NULL, text VARCHAR(300) NOT NULL, "order" INTEGER DEFAULT 0)"#,
    "CREATE TABLE choice (id INTEGER PRIMARY KEY, question_id INTEGER NOT NULL, text VARCHAR(200) NOT NULL)",
    "CREATE TABLE result (id INTEGER PRIMARY KEY, quiz_id INTEGER NOT NULL, title VARCHAR(200) NOT NULL, description TEXT, winning_trait_id INTEGER NOT NULL)",
];

pub fn temp_db_url() -> String {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path: PathBuf =
        std::env::temp_dir().join(format!("diagnoser_test_{}_{}.db", std::process::id(), id));
    // Clean up leftover file from previous runs
    let _ = std::fs::remove_file(&path);
    format!("sqlite://{}", path.display())
}

pub async fn create_test_db() -> Db {
    Db::new(&temp_db_url())
        .await
        .expect("failed to create test database")
}

/// A bare pool on `url`, with no schema applied.
pub async fn raw_pool(url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(url)
        .expect("valid sqlite url")
        .create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("failed to open raw pool")
}

/// Creates a store at a fresh URL by running `statements`, then closes it.
pub async fn legacy_store(statements: &[&str]) -> String {
    let url = temp_db_url();
    let pool = raw_pool(&url).await;
    for statement in statements {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .unwrap_or_else(|e| panic!("legacy statement failed: {statement}: {e}"));
    }
    pool.close().await;
    url
}

/// `(name, notnull)` of every column of `table`, in declaration order.
pub async fn columns(pool: &SqlitePool, table: &str) -> Vec<(String, bool)> {
    sqlx::query_as::<_, (String, bool)>(
        r#"SELECT name, "notnull" FROM pragma_table_info(?1) ORDER BY cid"#,
    )
    .bind(table)
    .fetch_all(pool)
    .await
    .expect("pragma_table_info")
}

pub async fn column_names(pool: &SqlitePool, table: &str) -> Vec<String> {
    columns(pool, table)
        .await
        .into_iter()
        .map(|(name, _)| name)
        .collect()
}

/// `sql` of every table and index, sorted, as a comparable schema snapshot.
pub async fn schema_snapshot(pool: &SqlitePool) -> Vec<(String, Option<String>)> {
    sqlx::query_as::<_, (String, Option<String>)>(
        "SELECT name, sql FROM sqlite_master WHERE name NOT LIKE 'sqlite_%' ORDER BY type, name",
    )
    .fetch_all(pool)
    .await
    .expect("sqlite_master")
}
