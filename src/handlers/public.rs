use axum::{
    extract::{Path, State},
    http::{
        header::{LOCATION, SET_COOKIE},
        StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use maud::Markup;
use rand::seq::SliceRandom;
use rust_i18n::t;

use crate::{
    db::{QuestionWithChoices, Quiz},
    extractors::Locale,
    models::{form_pairs, ChoiceMode, DisplayMode, SelectedChoices},
    names,
    rejections::{AppError, OptionExt, ResultExt},
    views,
    views::public as public_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/quiz/{id}", get(quiz_start))
        .route("/quiz/{id}/result", post(quiz_result))
        .route("/lang/{locale}", get(set_locale))
}

async fn index(State(state): State<AppState>, Locale(locale): Locale) -> Result<Markup, AppError> {
    let quizzes = state.db.quizzes().await.reject("could not get quizzes")?;

    Ok(views::page(
        &t!("public.title", locale = &locale),
        public_views::index(&quizzes, &locale),
        &locale,
    ))
}

/// Applies the quiz's display and choice modes to questions already in
/// stored order.
fn arrange(quiz: &Quiz, mut questions: Vec<QuestionWithChoices>) -> Vec<QuestionWithChoices> {
    let mut rng = rand::thread_rng();

    if DisplayMode::parse(Some(quiz.display_mode.as_str())) == DisplayMode::Random {
        questions.shuffle(&mut rng);
    }
    if ChoiceMode::parse(Some(quiz.choice_mode.as_str())) == ChoiceMode::Random {
        for item in &mut questions {
            item.choices.shuffle(&mut rng);
        }
    }

    questions
}

async fn quiz_form(
    state: &AppState,
    quiz: &Quiz,
    warning: Option<&str>,
    locale: &str,
) -> Result<Markup, AppError> {
    let questions = state
        .db
        .questions_with_choices(quiz.id)
        .await
        .reject("could not get questions")?;
    let questions = arrange(quiz, questions);

    Ok(views::page(
        &quiz.title,
        public_views::quiz_form(quiz, &questions, warning, locale),
        locale,
    ))
}

async fn quiz_start(
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

    quiz_form(&state, &quiz, None, &locale).await
}

async fn quiz_result(
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(quiz_id): Path<i64>,
    body: String,
) -> Result<Markup, AppError> {
    let quiz = state
        .db
        .get_quiz(quiz_id)
        .await
        .reject("could not get quiz")?
        .or_not_found()?;

    let questions = state
        .db
        .questions(quiz_id)
        .await
        .reject("could not get questions")?;

    let pairs = form_pairs(&body);
    let selected = SelectedChoices::from_form(&pairs, &questions);

    let outcome = state
        .scoring
        .score(quiz_id, &selected)
        .await
        .reject("could not score answers")?;

    match outcome.result {
        Some(result) => Ok(views::page(
            &result.title,
            public_views::result_page(&quiz, outcome.total, &result, &locale),
            &locale,
        )),
        None => {
            let warning = t!("public.unresolved", locale = &locale);
            quiz_form(&state, &quiz, Some(&*warning), &locale).await
        }
    }
}

async fn set_locale(Path(locale): Path<String>) -> Response {
    if !names::SUPPORTED_LOCALES.contains(&locale.as_str()) {
        return AppError::NotFound.into_response();
    }

    let cookie = format!(
        "{}={locale}; Max-Age=31536000; Path=/; SameSite=Lax",
        names::LOCALE_COOKIE_NAME
    );
    (StatusCode::SEE_OTHER, [(SET_COOKIE, cookie), (LOCATION, "/".to_string())]).into_response()
}
