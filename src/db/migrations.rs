//! Startup schema evolution.
//!
//! There is no version table: every run inspects the live tables and applies
//! only the changes that are still missing, so running it again after a
//! successful run is a no-op. All reads and writes of one run share a single
//! transaction, on a connection with foreign key enforcement switched off so
//! the `result` rebuild copies rows whose quiz is gone.

use color_eyre::{eyre::bail, Result};
use sqlx::{Connection, SqliteConnection};

use super::Db;

/// A column that older releases did not create.
struct ColumnAddition {
    table: &'static str,
    column: &'static str,
    /// Type, nullability and default, exactly as they follow the column name
    /// in `ALTER TABLE ... ADD COLUMN`.
    definition: &'static str,
}

const COLUMN_ADDITIONS: &[ColumnAddition] = &[
    ColumnAddition {
        table: "choice",
        column: "sum_points",
        definition: "INTEGER NOT NULL DEFAULT 0",
    },
    ColumnAddition {
        table: "result",
        column: "min_total",
        definition: "INTEGER NULL",
    },
    ColumnAddition {
        table: "result",
        column: "max_total",
        definition: "INTEGER NULL",
    },
    ColumnAddition {
        table: "quiz",
        column: "display_mode",
        definition: "VARCHAR(20) NOT NULL DEFAULT 'ordered'",
    },
    ColumnAddition {
        table: "quiz",
        column: "choice_mode",
        definition: "VARCHAR(20) NOT NULL DEFAULT 'ordered'",
    },
    ColumnAddition {
        table: "quiz",
        column: "image_url",
        definition: "VARCHAR(500) NULL",
    },
    ColumnAddition {
        table: "quiz",
        column: "choice_style",
        definition: "VARCHAR(20) NOT NULL DEFAULT 'normal'",
    },
    ColumnAddition {
        table: "question",
        column: "multiple",
        definition: "INTEGER NOT NULL DEFAULT 0",
    },
];

/// Columns the result rebuild copies verbatim. They predate every release
/// this engine knows about, so their absence means the store is not ours.
const RESULT_BASE_COLUMNS: &[&str] = &["id", "quiz_id", "title", "description"];

const RESULT_SHADOW_TABLE: &str = "result_new";

/// DDL for the `result` table in its current shape, parameterised on the
/// table name so the rebuild can create its shadow copy from the same text.
pub(super) fn result_table_ddl(table: &str) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY,
            quiz_id INTEGER NOT NULL,
            title VARCHAR(200) NOT NULL,
            description TEXT DEFAULT '',
            min_total INTEGER NULL,
            max_total INTEGER NULL,
            winning_trait_id INTEGER NULL,
            FOREIGN KEY(quiz_id) REFERENCES quiz(id) ON DELETE CASCADE,
            FOREIGN KEY(winning_trait_id) REFERENCES trait(id) ON DELETE SET NULL
        )
        "#
    )
}

#[derive(sqlx::FromRow)]
struct ColumnInfo {
    name: String,
    not_null: i64,
}

async fn table_exists(conn: &mut SqliteConnection, table: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
    )
    .bind(table)
    .fetch_one(&mut *conn)
    .await?;

    Ok(exists)
}

async fn table_columns(conn: &mut SqliteConnection, table: &str) -> Result<Vec<ColumnInfo>> {
    let columns = sqlx::query_as::<_, ColumnInfo>(
        r#"SELECT name, "notnull" AS not_null FROM pragma_table_info(?1) ORDER BY cid"#,
    )
    .bind(table)
    .fetch_all(&mut *conn)
    .await?;

    Ok(columns)
}

async fn has_column(conn: &mut SqliteConnection, table: &str, column: &str) -> Result<bool> {
    let columns = table_columns(conn, table).await?;
    Ok(columns.iter().any(|c| c.name == column))
}

/// `true` only when `result.winning_trait_id` exists and is declared NOT NULL.
async fn winning_trait_is_not_null(conn: &mut SqliteConnection) -> Result<bool> {
    let columns = table_columns(conn, "result").await?;
    Ok(columns
        .iter()
        .any(|c| c.name == "winning_trait_id" && c.not_null != 0))
}

async fn add_column(conn: &mut SqliteConnection, addition: &ColumnAddition) -> Result<bool> {
    if !table_exists(conn, addition.table).await? {
        tracing::debug!(
            table = addition.table,
            "table not present, skipping column {}",
            addition.column
        );
        return Ok(false);
    }

    if has_column(conn, addition.table, addition.column).await? {
        return Ok(false);
    }

    let sql = format!(
        "ALTER TABLE {} ADD COLUMN {} {}",
        addition.table, addition.column, addition.definition
    );
    sqlx::query(&sql).execute(&mut *conn).await?;

    tracing::info!(
        table = addition.table,
        column = addition.column,
        "added missing column"
    );
    Ok(true)
}

/// Recreate `result` with a nullable `winning_trait_id`.
///
/// Trait links are not carried over: every copied row gets `NULL`. Band
/// bounds are copied when the source has them and left unset otherwise.
async fn rebuild_result_table(conn: &mut SqliteConnection) -> Result<()> {
    let columns = table_columns(conn, "result").await?;
    let has = |name: &str| columns.iter().any(|c| c.name == name);

    let missing: Vec<&str> = RESULT_BASE_COLUMNS
        .iter()
        .copied()
        .filter(|name| !has(*name))
        .collect();
    if !missing.is_empty() {
        bail!(
            "cannot rebuild result table: missing column(s) {}",
            missing.join(", ")
        );
    }

    let select_min = if has("min_total") { "min_total" } else { "NULL" };
    let select_max = if has("max_total") { "max_total" } else { "NULL" };

    sqlx::query(&format!("DROP TABLE IF EXISTS {RESULT_SHADOW_TABLE}"))
        .execute(&mut *conn)
        .await?;

    sqlx::query(&result_table_ddl(RESULT_SHADOW_TABLE))
        .execute(&mut *conn)
        .await?;

    let copied = sqlx::query(&format!(
        r#"
        INSERT INTO {RESULT_SHADOW_TABLE}
            (id, quiz_id, title, description, min_total, max_total, winning_trait_id)
        SELECT id, quiz_id, title, description, {select_min}, {select_max}, NULL
        FROM result
        "#
    ))
    .execute(&mut *conn)
    .await?
    .rows_affected();

    sqlx::query("DROP TABLE result").execute(&mut *conn).await?;

    sqlx::query(&format!(
        "ALTER TABLE {RESULT_SHADOW_TABLE} RENAME TO result"
    ))
    .execute(&mut *conn)
    .await?;

    tracing::info!(rows = copied, "rebuilt result table with nullable winning_trait_id");
    Ok(())
}

/// Apply every pending change inside one transaction on `conn`.
/// Returns the number of changes made.
async fn evolve_on(conn: &mut SqliteConnection) -> Result<usize> {
    let mut tx = conn.begin().await?;
    let mut changes = 0usize;

    for addition in COLUMN_ADDITIONS {
        if add_column(&mut tx, addition).await? {
            changes += 1;
        }
    }

    if table_exists(&mut tx, "result").await? && winning_trait_is_not_null(&mut tx).await? {
        rebuild_result_table(&mut tx).await?;
        changes += 1;
    }

    tx.commit().await?;
    Ok(changes)
}

impl Db {
    /// Bring tables created by earlier releases up to the current shape.
    ///
    /// Safe to call on every startup. An error means nothing was changed.
    pub async fn evolve(&self) -> Result<()> {
        let mut conn = self.pool.acquire().await?;

        // Has no effect inside a transaction, so it is toggled around it.
        sqlx::query("PRAGMA foreign_keys = OFF")
            .execute(&mut *conn)
            .await?;
        let outcome = evolve_on(&mut conn).await;
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&mut *conn)
            .await?;
        let changes = outcome?;

        if changes == 0 {
            tracing::info!("schema is up to date");
        } else {
            tracing::info!("schema evolved with {changes} change(s)");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_ddl_targets_requested_table() {
        let ddl = result_table_ddl("result_new");
        assert!(ddl.contains("CREATE TABLE IF NOT EXISTS result_new ("));
        assert!(ddl.contains("winning_trait_id INTEGER NULL"));
    }

    #[test]
    fn column_additions_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for addition in COLUMN_ADDITIONS {
            assert!(
                seen.insert((addition.table, addition.column)),
                "duplicate addition {}.{}",
                addition.table,
                addition.column
            );
        }
        assert_eq!(COLUMN_ADDITIONS.len(), 8);
    }

    async fn memory_conn() -> SqliteConnection {
        SqliteConnection::connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite")
    }

    #[tokio::test]
    async fn rebuild_without_bound_columns_leaves_bounds_unset() {
        let mut conn = memory_conn().await;
        for statement in [
            "CREATE TABLE quiz (id INTEGER PRIMARY KEY, title VARCHAR(200) NOT NULL)",
            "CREATE TABLE result (id INTEGER PRIMARY KEY, quiz_id INTEGER NOT NULL, \
                title VARCHAR(200) NOT NULL, description TEXT, winning_trait_id INTEGER NOT NULL)",
            "INSERT INTO quiz (id, title) VALUES (1, 'Frogs')",
            "INSERT INTO result VALUES (2, 1, 'Pond frog', 'Wet', 4), (7, 1, 'Tree frog', NULL, 5)",
        ] {
            sqlx::query(statement).execute(&mut conn).await.unwrap();
        }

        rebuild_result_table(&mut conn).await.expect("rebuild");

        type Row = (i64, String, Option<String>, Option<i64>, Option<i64>, Option<i64>);
        let rows = sqlx::query_as::<_, Row>(
            "SELECT id, title, description, min_total, max_total, winning_trait_id FROM result ORDER BY id",
        )
        .fetch_all(&mut conn)
        .await
        .unwrap();
        assert_eq!(
            rows,
            vec![
                (2, "Pond frog".to_string(), Some("Wet".to_string()), None, None, None),
                (7, "Tree frog".to_string(), None, None, None, None),
            ]
        );
        assert!(!winning_trait_is_not_null(&mut conn).await.unwrap());
        assert!(!table_exists(&mut conn, RESULT_SHADOW_TABLE).await.unwrap());
    }

    #[tokio::test]
    async fn rebuild_refuses_without_base_columns() {
        let mut conn = memory_conn().await;
        sqlx::query(
            "CREATE TABLE result (id INTEGER PRIMARY KEY, quiz_id INTEGER NOT NULL, \
                winning_trait_id INTEGER NOT NULL)",
        )
        .execute(&mut conn)
        .await
        .unwrap();

        let err = rebuild_result_table(&mut conn).await.expect_err("must refuse");
        assert!(err.to_string().contains("title, description"), "{err}");
    }
}
