use color_eyre::Result;

use crate::db::{AdminUser, Db};

// ---------------------------------------------------------------------------
// AdminRepository trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait AdminRepository: Send + Sync {
    fn verify_admin_password(
        &self,
        username: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<Option<AdminUser>>> + Send;

    fn create_admin_session(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<String>> + Send;

    fn delete_admin_session(
        &self,
        session: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

impl AdminRepository for Db {
    async fn verify_admin_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AdminUser>> {
        Db::verify_admin_password(self, username, password).await
    }

    async fn create_admin_session(&self, user_id: i64) -> Result<String> {
        Db::create_admin_session(self, user_id).await
    }

    async fn delete_admin_session(&self, session: &str) -> Result<()> {
        Db::delete_admin_session(self, session).await
    }
}

// ---------------------------------------------------------------------------
// Outcome enums
// ---------------------------------------------------------------------------

pub enum LoginOutcome {
    /// Login succeeded. Contains the session token.
    Success(String),
    /// Unknown username or wrong password.
    InvalidCredentials,
    /// Username or password was blank.
    EmptyFields,
}

// ---------------------------------------------------------------------------
// AuthService
// ---------------------------------------------------------------------------

pub struct AuthService<R: AdminRepository = Db> {
    repo: R,
}

impl<R: AdminRepository + Clone> Clone for AuthService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R: AdminRepository> AuthService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Ok(LoginOutcome::EmptyFields);
        }

        let Some(user) = self.repo.verify_admin_password(username, password).await? else {
            tracing::warn!("failed admin login for username={username}");
            return Ok(LoginOutcome::InvalidCredentials);
        };

        let session_token = self.repo.create_admin_session(user.id).await?;
        Ok(LoginOutcome::Success(session_token))
    }

    pub async fn logout(&self, session: &str) -> Result<()> {
        self.repo.delete_admin_session(session).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn admin() -> AdminUser {
        AdminUser {
            id: 1,
            username: "admin".to_string(),
        }
    }

    #[tokio::test]
    async fn login_success_returns_session_token() {
        let mut mock = MockAdminRepository::new();
        mock.expect_verify_admin_password()
            .withf(|u, p| u == "admin" && p == "admin123")
            .returning(|_, _| Box::pin(async { Ok(Some(admin())) }));
        mock.expect_create_admin_session()
            .withf(|id| *id == 1)
            .returning(|_| Box::pin(async { Ok("session-token-123".to_string()) }));

        let svc = AuthService::new(mock);
        let outcome = svc.login(" admin ", "admin123").await.unwrap();

        assert!(matches!(outcome, LoginOutcome::Success(ref t) if t == "session-token-123"));
    }

    #[tokio::test]
    async fn login_wrong_password_returns_invalid_credentials() {
        let mut mock = MockAdminRepository::new();
        mock.expect_verify_admin_password()
            .returning(|_, _| Box::pin(async { Ok(None) }));
        mock.expect_create_admin_session().never();

        let svc = AuthService::new(mock);
        let outcome = svc.login("admin", "wrong").await.unwrap();

        assert!(matches!(outcome, LoginOutcome::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_blank_fields_skip_the_store() {
        let mut mock = MockAdminRepository::new();
        mock.expect_verify_admin_password().never();

        let svc = AuthService::new(mock);

        let outcome = svc.login("   ", "pass").await.unwrap();
        assert!(matches!(outcome, LoginOutcome::EmptyFields));

        let outcome = svc.login("admin", "").await.unwrap();
        assert!(matches!(outcome, LoginOutcome::EmptyFields));
    }

    #[tokio::test]
    async fn logout_deletes_session() {
        let mut mock = MockAdminRepository::new();
        mock.expect_delete_admin_session()
            .withf(|s| s == "abc")
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));

        let svc = AuthService::new(mock);
        svc.logout("abc").await.unwrap();
    }
}
