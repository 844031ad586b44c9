use maud::{html, Markup};
use rust_i18n::t;

use crate::{
    db::{Quiz, QuizSummary, QuestionWithChoices, ResultBand},
    models::{question_field, ChoiceStyle},
    names,
    views::components,
};

pub fn index(quizzes: &[QuizSummary], locale: &str) -> Markup {
    html! {
        h1 { (t!("public.title", locale = locale)) }

        @if quizzes.is_empty() {
            p { (t!("public.no_quizzes", locale = locale)) }
        }

        div."quiz-grid" {
            @for quiz in quizzes {
                article."quiz-card" {
                    @if let Some(image_url) = &quiz.image_url {
                        img src=(image_url) alt=(quiz.title);
                    }
                    h3 { a href=(names::quiz_url(quiz.id)) { (quiz.title) } }
                    @if let Some(description) = &quiz.description {
                        p { (description) }
                    }
                    small { (t!("public.question_count", locale = locale, count = quiz.question_count)) }
                }
            }
        }
    }
}

/// The answer form. `questions` is already in display order; a `warning`
/// is shown when a previous submission matched no result.
pub fn quiz_form(
    quiz: &Quiz,
    questions: &[QuestionWithChoices],
    warning: Option<&str>,
    locale: &str,
) -> Markup {
    let style = ChoiceStyle::parse(Some(quiz.choice_style.as_str()));

    html! {
        h1 { (quiz.title) }
        @if let Some(image_url) = &quiz.image_url {
            img."quiz-image" src=(image_url) alt=(quiz.title);
        }
        @if let Some(description) = &quiz.description {
            p { (description) }
        }
        @if let Some(message) = warning {
            (components::warning(message))
        }

        progress #quiz-progress value="0" max=(questions.len()) {}

        form method="post" action=(names::quiz_result_url(quiz.id)) {
            @for (index, item) in questions.iter().enumerate() {
                @let field = question_field(item.question.id);
                @let input_type = if item.question.multiple { "checkbox" } else { "radio" };
                fieldset."question" data-question=(item.question.id) {
                    legend {
                        (index + 1) ". " (item.question.text)
                        @if item.question.multiple {
                            small { " " (t!("public.select_all", locale = locale)) }
                        }
                    }
                    @for choice in &item.choices {
                        label class=(format!("choice choice-style-{}", style.as_str())) {
                            input type=(input_type) name=(field) value=(choice.id);
                            (choice.text)
                        }
                    }
                }
            }
            button type="submit" { (t!("public.submit", locale = locale)) }
        }
    }
}

pub fn result_page(quiz: &Quiz, total: i64, result: &ResultBand, locale: &str) -> Markup {
    html! {
        h1 { (quiz.title) }
        article."result" {
            header { (t!("public.your_result", locale = locale)) }
            h2 { (result.title) }
            @if let Some(description) = &result.description {
                p { (description) }
            }
            footer { (t!("public.total", locale = locale, total = total)) }
        }
        p {
            a role="button" href=(names::quiz_url(quiz.id)) { (t!("public.retry", locale = locale)) }
            " "
            a."secondary" role="button" href="/" { (t!("public.back", locale = locale)) }
        }
    }
}
