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
    models::{parse_points, MoveDirection},
    names,
    rejections::{AppError, OptionExt, ResultExt},
    views,
    views::admin as admin_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/quiz/{id}/questions",
            get(questions_page).post(create_question),
        )
        .route(
            "/admin/question/{id}/edit",
            get(edit_question_page).post(edit_question_post),
        )
        .route("/admin/question/{id}/delete", post(delete_question))
        .route("/admin/question/{id}/move/{direction}", post(move_question))
        .route("/admin/question/{id}/choice/new", post(create_choice))
        .route("/admin/choice/{id}/update", post(update_choice))
        .route("/admin/choice/{id}/delete", post(delete_choice))
}

async fn questions_page(
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
    let questions = state
        .db
        .questions_with_choices(quiz_id)
        .await
        .reject("could not get questions")?;

    Ok(views::admin_page(
        &t!("admin.questions", locale = &locale),
        admin_views::questions(&quiz, &questions, &locale),
        &admin.username,
        &locale,
    ))
}

#[derive(Deserialize)]
struct QuestionPost {
    #[serde(default)]
    text: String,
    multiple: Option<String>,
}

async fn create_question(
    AdminGuard(_admin): AdminGuard,
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
    Form(body): Form<QuestionPost>,
) -> Result<Redirect, AppError> {
    state
        .db
        .get_quiz(quiz_id)
        .await
        .reject("could not get quiz")?
        .or_not_found()?;

    let text = body.text.trim();
    if text.is_empty() {
        return Err(AppError::Input("question text is required"));
    }

    state
        .db
        .create_question(quiz_id, text)
        .await
        .reject("could not create question")?;

    Ok(Redirect::to(&names::questions_url(quiz_id)))
}

async fn edit_question_page(
    AdminGuard(admin): AdminGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(question_id): Path<i64>,
) -> Result<Markup, AppError> {
    let question = state
        .db
        .get_question(question_id)
        .await
        .reject("could not get question")?
        .or_not_found()?;
    let choices = state
        .db
        .choices(question_id)
        .await
        .reject("could not get choices")?;

    Ok(views::admin_page(
        &t!("admin.edit_question", locale = &locale),
        admin_views::edit_question(&question, &choices, &locale),
        &admin.username,
        &locale,
    ))
}

async fn edit_question_post(
    AdminGuard(_admin): AdminGuard,
    State(state): State<AppState>,
    Path(question_id): Path<i64>,
    Form(body): Form<QuestionPost>,
) -> Result<Redirect, AppError> {
    let question = state
        .db
        .get_question(question_id)
        .await
        .reject("could not get question")?
        .or_not_found()?;

    let text = match body.text.trim() {
        "" => question.text.as_str(),
        text => text,
    };
    let multiple = body.multiple.as_deref() == Some("1");

    state
        .db
        .update_question(question_id, text, multiple)
        .await
        .reject("could not update question")?;

    Ok(Redirect::to(&names::edit_question_url(question_id)))
}

async fn delete_question(
    AdminGuard(_admin): AdminGuard,
    State(state): State<AppState>,
    Path(question_id): Path<i64>,
) -> Result<Redirect, AppError> {
    let question = state
        .db
        .get_question(question_id)
        .await
        .reject("could not get question")?
        .or_not_found()?;

    state
        .db
        .delete_question(question_id)
        .await
        .reject("could not delete question")?;

    Ok(Redirect::to(&names::questions_url(question.quiz_id)))
}

async fn move_question(
    AdminGuard(_admin): AdminGuard,
    State(state): State<AppState>,
    Path((question_id, direction)): Path<(i64, String)>,
) -> Result<Redirect, AppError> {
    let direction = MoveDirection::parse(&direction).ok_or(AppError::NotFound)?;
    let question = state
        .db
        .get_question(question_id)
        .await
        .reject("could not get question")?
        .or_not_found()?;

    state
        .db
        .move_question(question.quiz_id, question_id, direction)
        .await
        .reject("could not move question")?;

    Ok(Redirect::to(&names::questions_url(question.quiz_id)))
}

#[derive(Deserialize)]
struct ChoicePost {
    #[serde(default)]
    text: String,
    sum_points: Option<String>,
}

async fn create_choice(
    AdminGuard(_admin): AdminGuard,
    State(state): State<AppState>,
    Path(question_id): Path<i64>,
    Form(body): Form<ChoicePost>,
) -> Result<Redirect, AppError> {
    state
        .db
        .get_question(question_id)
        .await
        .reject("could not get question")?
        .or_not_found()?;

    let text = body.text.trim();
    if text.is_empty() {
        return Err(AppError::Input("choice text is required"));
    }

    state
        .db
        .create_choice(question_id, text, parse_points(body.sum_points.as_deref()))
        .await
        .reject("could not create choice")?;

    Ok(Redirect::to(&names::edit_question_url(question_id)))
}

async fn update_choice(
    AdminGuard(_admin): AdminGuard,
    State(state): State<AppState>,
    Path(choice_id): Path<i64>,
    Form(body): Form<ChoicePost>,
) -> Result<Redirect, AppError> {
    let choice = state
        .db
        .get_choice(choice_id)
        .await
        .reject("could not get choice")?
        .or_not_found()?;

    let text = Some(body.text.trim()).filter(|t| !t.is_empty());
    state
        .db
        .update_choice(choice_id, text, parse_points(body.sum_points.as_deref()))
        .await
        .reject("could not update choice")?;

    Ok(Redirect::to(&names::edit_question_url(choice.question_id)))
}

async fn delete_choice(
    AdminGuard(_admin): AdminGuard,
    State(state): State<AppState>,
    Path(choice_id): Path<i64>,
) -> Result<Redirect, AppError> {
    let choice = state
        .db
        .get_choice(choice_id)
        .await
        .reject("could not get choice")?
        .or_not_found()?;

    state
        .db
        .delete_choice(choice_id)
        .await
        .reject("could not delete choice")?;

    Ok(Redirect::to(&names::edit_question_url(choice.question_id)))
}
