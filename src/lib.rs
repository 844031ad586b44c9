rust_i18n::i18n!("locales", fallback = "en");

pub mod db;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod names;
pub mod rejections;
pub mod seed;
pub mod services;
pub mod statics;
pub mod uploads;
pub mod utils;
pub mod views;

use std::path::PathBuf;

use axum::{middleware, Router};

use services::{auth::AuthService, scoring::ScoringService};

#[derive(Clone)]
pub struct AppState {
    pub db: db::Db,
    pub scoring: ScoringService,
    pub auth: AuthService,
    pub upload_dir: PathBuf,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(db: db::Db, upload_dir: PathBuf, secure_cookies: bool) -> Self {
        Self {
            scoring: ScoringService::new(db.clone()),
            auth: AuthService::new(db.clone()),
            db,
            upload_dir,
            secure_cookies,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::public::routes())
        .merge(handlers::admin::routes())
        .nest("/static", statics::routes())
        .nest(names::UPLOADS_URL, uploads::routes())
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = std::time::Instant::now();

    let response = next.run(req).await;

    tracing::debug!(
        "{method} {path} -> {} in {:?}",
        response.status(),
        started.elapsed()
    );
    response
}
