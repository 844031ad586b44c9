// Database model structs

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub display_mode: String,
    pub choice_mode: String,
    pub image_url: Option<String>,
    pub choice_style: String,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct QuizSummary {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub question_count: i64,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,
    pub text: String,
    pub order: i64,
    pub multiple: bool,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
    pub sum_points: i64,
}

/// A question together with the choices it offers, in presentation order.
#[derive(Clone, Debug)]
pub struct QuestionWithChoices {
    pub question: Question,
    pub choices: Vec<Choice>,
}

/// One configured outcome of a quiz. `None` bounds are unbounded.
#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct ResultBand {
    pub id: i64,
    pub quiz_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub min_total: Option<i64>,
    pub max_total: Option<i64>,
    pub winning_trait_id: Option<i64>,
}
