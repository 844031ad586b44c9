use std::collections::HashMap;

use axum::{
    extract::{DefaultBodyLimit, Form, Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use maud::Markup;
use rust_i18n::t;
use serde::Deserialize;

use crate::{
    db::Quiz,
    extractors::{AdminGuard, Locale},
    models::{ChoiceMode, ChoiceStyle, DisplayMode, QuizSettings},
    names,
    rejections::{AppError, OptionExt, ResultExt},
    uploads, views,
    views::admin as admin_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::ADMIN_URL, get(dashboard))
        .route(names::NEW_QUIZ_URL, get(new_quiz_page).post(new_quiz_post))
        .route(
            "/admin/quiz/{id}/edit",
            get(edit_quiz_page)
                .post(edit_quiz_post)
                .layer(DefaultBodyLimit::max(names::MAX_UPLOAD_BYTES)),
        )
        .route("/admin/quiz/{id}/delete", post(delete_quiz))
}

async fn dashboard(
    AdminGuard(admin): AdminGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
) -> Result<Markup, AppError> {
    let quizzes = state.db.quizzes().await.reject("could not get quizzes")?;

    Ok(views::admin_page(
        &t!("admin.dashboard_title", locale = &locale),
        admin_views::dashboard(&quizzes, &locale),
        &admin.username,
        &locale,
    ))
}

async fn new_quiz_page(AdminGuard(admin): AdminGuard, Locale(locale): Locale) -> Markup {
    views::admin_page(
        &t!("admin.new_quiz", locale = &locale),
        admin_views::new_quiz(None, &locale),
        &admin.username,
        &locale,
    )
}

#[derive(Deserialize)]
struct NewQuizPost {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

async fn new_quiz_post(
    AdminGuard(admin): AdminGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Form(body): Form<NewQuizPost>,
) -> Result<Response, AppError> {
    let title = body.title.trim();
    if title.is_empty() {
        let error = t!("admin.title_required", locale = &locale);
        return Ok(views::admin_page(
            &t!("admin.new_quiz", locale = &locale),
            admin_views::new_quiz(Some(&*error), &locale),
            &admin.username,
            &locale,
        )
        .into_response());
    }

    let quiz_id = state
        .db
        .create_quiz(title, body.description.trim())
        .await
        .reject("could not create quiz")?;

    Ok(Redirect::to(&names::edit_quiz_url(quiz_id)).into_response())
}

async fn edit_quiz_page(
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

    Ok(views::admin_page(
        &t!("admin.edit_quiz", locale = &locale),
        admin_views::edit_quiz(&quiz, None, &locale),
        &admin.username,
        &locale,
    ))
}

struct UploadedImage {
    file_name: String,
    bytes: Vec<u8>,
}

/// Text fields by name, and the image file when one was chosen.
async fn read_quiz_form(
    mut multipart: Multipart,
) -> Result<(HashMap<String, String>, Option<UploadedImage>), AppError> {
    let mut fields = HashMap::new();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("failed to read multipart field: {e}");
        AppError::Input("failed to read multipart field")
    })? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(|e| {
                tracing::warn!("failed to read image data: {e}");
                AppError::Input("failed to read image data")
            })?;
            // Browsers send an empty part when no file was picked.
            if !file_name.is_empty() && !bytes.is_empty() {
                image = Some(UploadedImage {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let text = field.text().await.map_err(|e| {
            tracing::warn!("failed to read field data: {e}");
            AppError::Input("failed to read field data")
        })?;
        fields.insert(name, text);
    }

    Ok((fields, image))
}

fn text<'a>(fields: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    fields.get(name).map(String::as_str)
}

fn edit_quiz_error(quiz: &Quiz, error: &str, username: &str, locale: &str) -> Response {
    views::admin_page(
        &t!("admin.edit_quiz", locale = locale),
        admin_views::edit_quiz(quiz, Some(error), locale),
        username,
        locale,
    )
    .into_response()
}

async fn edit_quiz_post(
    AdminGuard(admin): AdminGuard,
    State(state): State<AppState>,
    Locale(locale): Locale,
    Path(quiz_id): Path<i64>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let quiz = state
        .db
        .get_quiz(quiz_id)
        .await
        .reject("could not get quiz")?
        .or_not_found()?;

    let (fields, image) = read_quiz_form(multipart).await?;

    let title = text(&fields, "title").unwrap_or_default().trim();
    if title.is_empty() {
        let error = t!("admin.title_required", locale = &locale);
        return Ok(edit_quiz_error(&quiz, &error, &admin.username, &locale));
    }
    if image
        .as_ref()
        .is_some_and(|image| uploads::allowed_extension(&image.file_name).is_none())
    {
        let error = t!("admin.image_type", locale = &locale);
        return Ok(edit_quiz_error(&quiz, &error, &admin.username, &locale));
    }

    let settings = QuizSettings {
        title: title.to_string(),
        description: text(&fields, "description")
            .unwrap_or_default()
            .trim()
            .to_string(),
        display_mode: DisplayMode::parse(text(&fields, "display_mode")),
        choice_mode: ChoiceMode::parse(text(&fields, "choice_mode")),
        choice_style: ChoiceStyle::parse(text(&fields, "choice_style")),
    };
    state
        .db
        .update_quiz(quiz_id, &settings)
        .await
        .reject("could not update quiz")?;

    if text(&fields, "remove_image") == Some("1") {
        state
            .db
            .set_quiz_image(quiz_id, None)
            .await
            .reject("could not clear quiz image")?;
    }

    if let Some(image) = image {
        let url = uploads::save_image(&state.upload_dir, &image.file_name, &image.bytes)
            .await
            .reject("could not store image")?;
        state
            .db
            .set_quiz_image(quiz_id, Some(&url))
            .await
            .reject("could not set quiz image")?;
    }

    Ok(Redirect::to(&names::edit_quiz_url(quiz_id)).into_response())
}

async fn delete_quiz(
    AdminGuard(_admin): AdminGuard,
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
) -> Result<Redirect, AppError> {
    state
        .db
        .delete_quiz(quiz_id)
        .await
        .reject("could not delete quiz")?;

    Ok(Redirect::to(names::ADMIN_URL))
}
