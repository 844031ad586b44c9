use axum::{
    extract::{Form, State},
    http::{
        header::{LOCATION, SET_COOKIE},
        StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;
use maud::Markup;
use rust_i18n::t;
use serde::Deserialize;

use crate::{
    extractors::Locale,
    names,
    rejections::{AppError, ResultExt},
    services::auth::LoginOutcome,
    utils, views,
    views::admin::{self as admin_views, LoginState},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::LOGIN_URL, get(login_page).post(login_post))
        .route(names::LOGOUT_URL, post(logout_post))
}

fn login_view(state: LoginState, locale: &str) -> Markup {
    views::page(
        &t!("admin.login_title", locale = locale),
        admin_views::login(state, locale),
        locale,
    )
}

async fn login_page(Locale(locale): Locale) -> Markup {
    login_view(LoginState::NoError, &locale)
}

#[derive(Deserialize)]
struct LoginPost {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

async fn login_post(
    State(state): State<AppState>,
    Locale(locale): Locale,
    Form(body): Form<LoginPost>,
) -> Result<Response, AppError> {
    let outcome = state
        .auth
        .login(&body.username, &body.password)
        .await
        .reject("login failed")?;

    match outcome {
        LoginOutcome::Success(session) => {
            let cookie = utils::cookie(
                names::ADMIN_SESSION_COOKIE_NAME,
                &session,
                state.secure_cookies,
            );
            Ok((
                StatusCode::SEE_OTHER,
                [(SET_COOKIE, cookie), (LOCATION, names::ADMIN_URL.to_string())],
            )
                .into_response())
        }
        LoginOutcome::InvalidCredentials => {
            Ok(login_view(LoginState::InvalidCredentials, &locale).into_response())
        }
        LoginOutcome::EmptyFields => {
            Ok(login_view(LoginState::EmptyFields, &locale).into_response())
        }
    }
}

async fn logout_post(jar: CookieJar, State(state): State<AppState>) -> impl IntoResponse {
    if let Some(session) = jar
        .get(names::ADMIN_SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
    {
        if let Err(e) = state.auth.logout(&session).await {
            tracing::warn!("could not delete admin session: {e}");
        }
    }

    (
        StatusCode::SEE_OTHER,
        [
            (SET_COOKIE, utils::expired_cookie(names::ADMIN_SESSION_COOKIE_NAME)),
            (LOCATION, names::LOGIN_URL.to_string()),
        ],
    )
}
