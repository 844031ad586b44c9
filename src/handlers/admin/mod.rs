use axum::Router;

use crate::AppState;

mod auth;
mod question;
mod quiz;
mod result;

pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(quiz::routes())
        .merge(question::routes())
        .merge(result::routes())
}

