// Database schema initialization

use color_eyre::Result;
use sqlx::SqlitePool;

use super::migrations;

/// Create every table in its current shape. Existing tables are left alone;
/// bringing those up to date is the job of `Db::evolve`.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user (
            id INTEGER PRIMARY KEY,
            username VARCHAR(50) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS admin_sessions (
            id TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS quiz (
            id INTEGER PRIMARY KEY,
            title VARCHAR(200) NOT NULL,
            description TEXT DEFAULT '',
            display_mode VARCHAR(20) NOT NULL DEFAULT 'ordered',
            choice_mode VARCHAR(20) NOT NULL DEFAULT 'ordered',
            image_url VARCHAR(500) NULL,
            choice_style VARCHAR(20) NOT NULL DEFAULT 'normal'
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS trait (
            id INTEGER PRIMARY KEY,
            quiz_id INTEGER NOT NULL,
            "key" VARCHAR(50) NOT NULL,
            name VARCHAR(100) NOT NULL,
            FOREIGN KEY(quiz_id) REFERENCES quiz(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS question (
            id INTEGER PRIMARY KEY,
            quiz_id INTEGER NOT NULL,
            text VARCHAR(300) NOT NULL,
            "order" INTEGER DEFAULT 0,
            multiple INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY(quiz_id) REFERENCES quiz(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS choice (
            id INTEGER PRIMARY KEY,
            question_id INTEGER NOT NULL,
            text VARCHAR(200) NOT NULL,
            sum_points INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY(question_id) REFERENCES question(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Per-trait scoring is no longer read by the resolver; the table stays
    // so older stores keep their rows.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS choice_score (
            id INTEGER PRIMARY KEY,
            choice_id INTEGER NOT NULL,
            trait_id INTEGER NOT NULL,
            points INTEGER DEFAULT 0,
            FOREIGN KEY(choice_id) REFERENCES choice(id) ON DELETE CASCADE,
            FOREIGN KEY(trait_id) REFERENCES trait(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(&migrations::result_table_ddl("result"))
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_question_quiz ON question(quiz_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_choice_question ON choice(question_id)")
        .execute(pool)
        .await?;

    Ok(())
}
