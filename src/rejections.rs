use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use maud::{html, Markup};

use crate::{names, views};

#[derive(Debug)]
pub enum AppError {
    Internal(&'static str),
    Input(&'static str),
    Unauthorized,
    NotFound,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Input(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            AppError::Internal(_) => "INTERNAL_SERVER_ERROR",
            AppError::Input(_) => "INPUT_ERROR",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal(context) => tracing::error!("internal error: {context}"),
            AppError::Input(context) => tracing::warn!("rejected input: {context}"),
            // Admin pages send anonymous visitors to the login form.
            AppError::Unauthorized => return Redirect::to(names::LOGIN_URL).into_response(),
            AppError::NotFound => {}
        }

        (self.status(), error_page(self.message())).into_response()
    }
}

/// Turns store/service errors into `AppError::Internal`, logging the cause.
pub trait ResultExt<T> {
    fn reject(self, context: &'static str) -> Result<T, AppError>;
}

impl<T> ResultExt<T> for color_eyre::Result<T> {
    fn reject(self, context: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{context}: {e:?}");
            AppError::Internal(context)
        })
    }
}

/// `None` from a lookup by id becomes a 404.
pub trait OptionExt<T> {
    fn or_not_found(self) -> Result<T, AppError>;
}

impl<T> OptionExt<T> for Option<T> {
    fn or_not_found(self) -> Result<T, AppError> {
        self.ok_or(AppError::NotFound)
    }
}

fn error_page(message: &str) -> Markup {
    views::page(
        "Error",
        html! {
            h1 { (message) }
            p { a href="/" { "Home" } }
        },
        names::DEFAULT_LOCALE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_variants() {
        assert_eq!(AppError::Internal("x").status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::Input("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn missing_row_is_not_found() {
        let missing: Option<i64> = None;
        assert!(matches!(missing.or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(3).or_not_found().ok(), Some(3));
    }
}
