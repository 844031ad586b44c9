use axum::{
    extract::{Form, Path, State},
    response::Redirect,
    routing::{get, post},
    Router,
};
use maud::Markup;
use rust_i18n::t;
use serde::Deserialize;

use crate::{
    extractors::{AdminGuard, Locale},
    models::ResultForm,
    names,
    rejections::{AppError, OptionExt, ResultExt},
    views,
    views::admin as admin_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/quiz/{id}/results",
            get(results_page).post(create_result),
        )
        .route("/admin/result/{id}/update", post(update_result))
        .route("/admin/result/{id}/delete", post(delete_result))
}

async fn results_page(
    AdminGuard(admin): AdminGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(quiz_id): Path<i64>,
) -> Result<Markup, AppError> {
    let quiz = state
        .db
        .get_quiz(quiz_id)
        .await
        .reject("could not get quiz")?
        .or_not_found()?;
    let results = state
        .db
        .results(quiz_id)
        .await
        .reject("could not get results")?;

    Ok(views::admin_page(
        &t!("admin.results", locale = &locale),
        admin_views::results(&quiz, &results, &locale),
        &admin.username,
        &locale,
    ))
}

#[derive(Deserialize)]
struct ResultPost {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    min_total: String,
    #[serde(default)]
    max_total: String,
}

impl ResultPost {
    fn into_form(self) -> Result<ResultForm, AppError> {
        let form = ResultForm::new(&self.title, &self.description, &self.min_total, &self.max_total);
        if form.title.is_empty() {
            return Err(AppError::Input("result title is required"));
        }
        Ok(form)
    }
}

async fn create_result(
    AdminGuard(_admin): AdminGuard,
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
    Form(body): Form<ResultPost>,
) -> Result<Redirect, AppError> {
    state
        .db
        .get_quiz(quiz_id)
        .await
        .reject("could not get quiz")?
        .or_not_found()?;

    state
        .db
        .create_result(quiz_id, &body.into_form()?)
        .await
        .reject("could not create result")?;

    Ok(Redirect::to(&names::results_url(quiz_id)))
}

async fn update_result(
    AdminGuard(_admin): AdminGuard,
    State(state): State<AppState>,
    Path(result_id): Path<i64>,
    Form(body): Form<ResultPost>,
) -> Result<Redirect, AppError> {
    let result = state
        .db
        .get_result(result_id)
        .await
        .reject("could not get result")?
        .or_not_found()?;

    state
        .db
        .update_result(result_id, &body.into_form()?)
        .await
        .reject("could not update result")?;

    Ok(Redirect::to(&names::results_url(result.quiz_id)))
}

async fn delete_result(
    AdminGuard(_admin): AdminGuard,
    State(state): State<AppState>,
    Path(result_id): Path<i64>,
) -> Result<Redirect, AppError> {
    let result = state
        .db
        .get_result(result_id)
        .await
        .reject("could not get result")?
        .or_not_found()?;

    state
        .db
        .delete_result(result_id)
        .await
        .reject("could not delete result")?;

    Ok(Redirect::to(&names::results_url(result.quiz_id)))
}
