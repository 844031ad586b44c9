use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use color_eyre::Result;
use ulid::Ulid;

use super::models::AdminUser;
use super::Db;

impl Db {
    pub async fn create_admin_user(&self, username: &str, password: &str) -> Result<i64> {
        let password_hash = hash_password(password).await?;

        let user_id: i64 = sqlx::query_scalar(
            "INSERT INTO user (username, password_hash) VALUES (?, ?) RETURNING id",
        )
        .bind(username)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("new admin user created: id={user_id}, username={username}");
        Ok(user_id)
    }

    pub async fn find_admin_by_username(&self, username: &str) -> Result<Option<AdminUser>> {
        let user = sqlx::query_as::<_, AdminUser>("SELECT id, username FROM user WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// The user when `password` matches the stored hash.
    pub async fn verify_admin_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AdminUser>> {
        let row: Option<(i64, String)> =
            sqlx::query_as("SELECT id, password_hash FROM user WHERE username = ?")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;

        let Some((id, stored_hash)) = row else {
            return Ok(None);
        };

        if verify_password(password, &stored_hash).await {
            Ok(Some(AdminUser {
                id,
                username: username.to_string(),
            }))
        } else {
            Ok(None)
        }
    }

    /// Replaces the password hash of an existing user. Returns `false` when
    /// no such user exists.
    pub async fn set_admin_password(&self, username: &str, password: &str) -> Result<bool> {
        let password_hash = hash_password(password).await?;

        let updated = sqlx::query("UPDATE user SET password_hash = ? WHERE username = ?")
            .bind(&password_hash)
            .bind(username)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if updated > 0 {
            tracing::info!("password reset for admin user {username}");
        }
        Ok(updated > 0)
    }

    pub async fn create_admin_session(&self, user_id: i64) -> Result<String> {
        let session = Ulid::new().to_string();

        sqlx::query("INSERT INTO admin_sessions (id, user_id) VALUES (?, ?)")
            .bind(&session)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        tracing::info!("new admin session created for user_id={user_id}");
        Ok(session)
    }

    pub async fn admin_session_user(&self, session: &str) -> Result<Option<AdminUser>> {
        let user = sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT user.id AS id, user.username AS username
            FROM admin_sessions
            JOIN user ON user.id = admin_sessions.user_id
            WHERE admin_sessions.id = ?
            "#,
        )
        .bind(session)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn delete_admin_session(&self, session: &str) -> Result<()> {
        sqlx::query("DELETE FROM admin_sessions WHERE id = ?")
            .bind(session)
            .execute(&self.pool)
            .await?;

        tracing::info!("admin session deleted");
        Ok(())
    }
}

async fn hash_password(password: &str) -> Result<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| color_eyre::eyre::eyre!("failed to hash password: {e}"))
    })
    .await?
}

async fn verify_password(password: &str, hash: &str) -> bool {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || {
        let Ok(parsed_hash) = PasswordHash::new(&hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    })
    .await
    .unwrap_or(false)
}
