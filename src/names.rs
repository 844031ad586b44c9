pub const ADMIN_URL: &str = "/admin";
pub const LOGIN_URL: &str = "/admin/login";
pub const LOGOUT_URL: &str = "/admin/logout";
pub const NEW_QUIZ_URL: &str = "/admin/quiz/new";
pub const UPLOADS_URL: &str = "/uploads";

pub const ADMIN_SESSION_COOKIE_NAME: &str = "admin_session";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

pub fn quiz_url(quiz_id: i64) -> String {
    format!("/quiz/{quiz_id}")
}

pub fn quiz_result_url(quiz_id: i64) -> String {
    format!("/quiz/{quiz_id}/result")
}

pub fn edit_quiz_url(quiz_id: i64) -> String {
    format!("/admin/quiz/{quiz_id}/edit")
}

pub fn delete_quiz_url(quiz_id: i64) -> String {
    format!("/admin/quiz/{quiz_id}/delete")
}

pub fn questions_url(quiz_id: i64) -> String {
    format!("/admin/quiz/{quiz_id}/questions")
}

pub fn results_url(quiz_id: i64) -> String {
    format!("/admin/quiz/{quiz_id}/results")
}

pub fn edit_question_url(question_id: i64) -> String {
    format!("/admin/question/{question_id}/edit")
}

pub fn delete_question_url(question_id: i64) -> String {
    format!("/admin/question/{question_id}/delete")
}

pub fn move_question_url(question_id: i64, direction: &str) -> String {
    format!("/admin/question/{question_id}/move/{direction}")
}

pub fn new_choice_url(question_id: i64) -> String {
    format!("/admin/question/{question_id}/choice/new")
}

pub fn update_choice_url(choice_id: i64) -> String {
    format!("/admin/choice/{choice_id}/update")
}

pub fn delete_choice_url(choice_id: i64) -> String {
    format!("/admin/choice/{choice_id}/delete")
}

pub fn update_result_url(result_id: i64) -> String {
    format!("/admin/result/{result_id}/update")
}

pub fn delete_result_url(result_id: i64) -> String {
    format!("/admin/result/{result_id}/delete")
}

pub fn upload_url(file_name: &str) -> String {
    format!("{UPLOADS_URL}/{file_name}")
}

// Image uploads
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

// i18n
pub const LOCALE_COOKIE_NAME: &str = "lang";
pub const DEFAULT_LOCALE: &str = "en";
pub const SUPPORTED_LOCALES: &[&str] = &["en", "ja"];

pub fn lang_url(locale: &str) -> String {
    format!("/lang/{locale}")
}
