use maud::{html, Markup};
use rust_i18n::t;

use crate::{
    db::{Choice, Question, QuestionWithChoices, Quiz, QuizSummary, ResultBand},
    models::{ChoiceMode, ChoiceStyle, DisplayMode},
    names,
    views::components,
};

pub enum LoginState {
    NoError,
    InvalidCredentials,
    EmptyFields,
}

pub fn login(state: LoginState, locale: &str) -> Markup {
    let error = match state {
        LoginState::NoError => None,
        LoginState::InvalidCredentials => Some(t!("admin.login_invalid", locale = locale)),
        LoginState::EmptyFields => Some(t!("admin.login_empty", locale = locale)),
    };

    html! {
        article."login" {
            h1 { (t!("admin.login_title", locale = locale)) }
            @if let Some(error) = error {
                (components::warning(&error))
            }
            form method="post" action=(names::LOGIN_URL) {
                label {
                    (t!("admin.username", locale = locale))
                    input name="username" type="text" autocomplete="username" required;
                }
                label {
                    (t!("admin.password", locale = locale))
                    input name="password" type="password" autocomplete="current-password" required;
                }
                button type="submit" { (t!("admin.login_button", locale = locale)) }
            }
        }
    }
}

pub fn dashboard(quizzes: &[QuizSummary], locale: &str) -> Markup {
    html! {
        h1 { (t!("admin.dashboard_title", locale = locale)) }
        p { a role="button" href=(names::NEW_QUIZ_URL) { (t!("admin.new_quiz", locale = locale)) } }

        table {
            thead { tr {
                th { "ID" }
                th { (t!("admin.quiz_title", locale = locale)) }
                th { (t!("admin.questions", locale = locale)) }
                th {}
            } }
            tbody {
                @for quiz in quizzes {
                    tr {
                        td { (quiz.id) }
                        td { a href=(names::quiz_url(quiz.id)) { (quiz.title) } }
                        td { (quiz.question_count) }
                        td."actions" {
                            a href=(names::edit_quiz_url(quiz.id)) { (t!("admin.edit", locale = locale)) }
                            " "
                            a href=(names::questions_url(quiz.id)) { (t!("admin.questions", locale = locale)) }
                            " "
                            a href=(names::results_url(quiz.id)) { (t!("admin.results", locale = locale)) }
                            (components::action_button(
                                &names::delete_quiz_url(quiz.id),
                                &t!("admin.delete", locale = locale),
                                "secondary",
                            ))
                        }
                    }
                }
            }
        }
    }
}

pub fn new_quiz(error: Option<&str>, locale: &str) -> Markup {
    html! {
        h1 { (t!("admin.new_quiz", locale = locale)) }
        @if let Some(error) = error {
            (components::warning(error))
        }
        form method="post" action=(names::NEW_QUIZ_URL) {
            label {
                (t!("admin.quiz_title", locale = locale))
                input name="title" type="text" required;
            }
            label {
                (t!("admin.description", locale = locale))
                textarea name="description" {}
            }
            button type="submit" { (t!("admin.create", locale = locale)) }
        }
    }
}

fn select<T: Copy + PartialEq>(
    name: &str,
    options: &[T],
    current: T,
    as_str: fn(T) -> &'static str,
) -> Markup {
    html! {
        select name=(name) {
            @for option in options {
                option value=(as_str(*option)) selected[*option == current] { (as_str(*option)) }
            }
        }
    }
}

pub fn edit_quiz(quiz: &Quiz, error: Option<&str>, locale: &str) -> Markup {
    let display_mode = DisplayMode::parse(Some(quiz.display_mode.as_str()));
    let choice_mode = ChoiceMode::parse(Some(quiz.choice_mode.as_str()));
    let choice_style = ChoiceStyle::parse(Some(quiz.choice_style.as_str()));

    html! {
        h1 { (t!("admin.edit_quiz", locale = locale)) }
        @if let Some(error) = error {
            (components::warning(error))
        }
        form method="post" action=(names::edit_quiz_url(quiz.id)) enctype="multipart/form-data" {
            label {
                (t!("admin.quiz_title", locale = locale))
                input name="title" type="text" value=(quiz.title) required;
            }
            label {
                (t!("admin.description", locale = locale))
                textarea name="description" { (quiz.description.as_deref().unwrap_or_default()) }
            }
            div."grid" {
                label {
                    (t!("admin.display_mode", locale = locale))
                    (select("display_mode", DisplayMode::ALL, display_mode, DisplayMode::as_str))
                }
                label {
                    (t!("admin.choice_mode", locale = locale))
                    (select("choice_mode", ChoiceMode::ALL, choice_mode, ChoiceMode::as_str))
                }
                label {
                    (t!("admin.choice_style", locale = locale))
                    (select("choice_style", ChoiceStyle::ALL, choice_style, ChoiceStyle::as_str))
                }
            }
            @if let Some(image_url) = &quiz.image_url {
                img."quiz-image" src=(image_url) alt=(quiz.title);
                label {
                    input name="remove_image" type="checkbox" value="1";
                    (t!("admin.remove_image", locale = locale))
                }
            }
            label {
                (t!("admin.image", locale = locale))
                input name="image" type="file" accept=".png,.jpg,.jpeg,.gif,.webp";
            }
            button type="submit" { (t!("admin.save", locale = locale)) }
        }
        p {
            a href=(names::questions_url(quiz.id)) { (t!("admin.questions", locale = locale)) }
            " | "
            a href=(names::results_url(quiz.id)) { (t!("admin.results", locale = locale)) }
        }
    }
}

pub fn questions(quiz: &Quiz, questions: &[QuestionWithChoices], locale: &str) -> Markup {
    let last = questions.len().saturating_sub(1);

    html! {
        h1 { (quiz.title) ": " (t!("admin.questions", locale = locale)) }

        ol."question-list" {
            @for (index, item) in questions.iter().enumerate() {
                li {
                    a href=(names::edit_question_url(item.question.id)) { (item.question.text) }
                    @if item.question.multiple {
                        " " mark { (t!("admin.multiple", locale = locale)) }
                    }
                    small { " (" (item.choices.len()) " " (t!("admin.choices", locale = locale)) ")" }
                    div."actions" {
                        @if index > 0 {
                            (components::action_button(&names::move_question_url(item.question.id, "up"), "↑", "outline"))
                        }
                        @if index < last {
                            (components::action_button(&names::move_question_url(item.question.id, "down"), "↓", "outline"))
                        }
                        (components::action_button(
                            &names::delete_question_url(item.question.id),
                            &t!("admin.delete", locale = locale),
                            "secondary",
                        ))
                    }
                }
            }
        }

        form method="post" action=(names::questions_url(quiz.id)) {
            label {
                (t!("admin.new_question", locale = locale))
                input name="text" type="text" required;
            }
            button type="submit" { (t!("admin.add", locale = locale)) }
        }
        p { a href=(names::edit_quiz_url(quiz.id)) { (t!("admin.back_to_quiz", locale = locale)) } }
    }
}

pub fn edit_question(question: &Question, choices: &[Choice], locale: &str) -> Markup {
    html! {
        h1 { (t!("admin.edit_question", locale = locale)) }
        form method="post" action=(names::edit_question_url(question.id)) {
            label {
                (t!("admin.question_text", locale = locale))
                input name="text" type="text" value=(question.text) required;
            }
            label {
                input name="multiple" type="checkbox" value="1" checked[question.multiple];
                (t!("admin.multiple", locale = locale))
            }
            button type="submit" { (t!("admin.save", locale = locale)) }
        }

        h2 { (t!("admin.choices", locale = locale)) }
        table {
            thead { tr {
                th { (t!("admin.choice_text", locale = locale)) }
                th { (t!("admin.points", locale = locale)) }
                th {}
            } }
            tbody {
                @for choice in choices {
                    tr {
                        td colspan="2" {
                            form."inline" method="post" action=(names::update_choice_url(choice.id)) {
                                input name="text" type="text" value=(choice.text);
                                input name="sum_points" type="number" value=(choice.sum_points);
                                button."outline" type="submit" { (t!("admin.save", locale = locale)) }
                            }
                        }
                        td {
                            (components::action_button(
                                &names::delete_choice_url(choice.id),
                                &t!("admin.delete", locale = locale),
                                "secondary",
                            ))
                        }
                    }
                }
            }
        }

        form method="post" action=(names::new_choice_url(question.id)) {
            div."grid" {
                input name="text" type="text" placeholder=(t!("admin.choice_text", locale = locale)) required;
                input name="sum_points" type="number" value="0";
                button type="submit" { (t!("admin.add", locale = locale)) }
            }
        }
        p { a href=(names::questions_url(question.quiz_id)) { (t!("admin.back_to_questions", locale = locale)) } }
    }
}

fn bound_input(name: &str, value: Option<i64>) -> Markup {
    html! {
        input name=(name) type="number" value=[value];
    }
}

pub fn results(quiz: &Quiz, results: &[ResultBand], locale: &str) -> Markup {
    html! {
        h1 { (quiz.title) ": " (t!("admin.results", locale = locale)) }
        p { (t!("admin.results_help", locale = locale)) }

        @for result in results {
            article {
                header {
                    strong { (result.title) }
                    " [" (components::bound(result.min_total)) ", " (components::bound(result.max_total)) "]"
                }
                form method="post" action=(names::update_result_url(result.id)) {
                    input name="title" type="text" value=(result.title) required;
                    textarea name="description" { (result.description.as_deref().unwrap_or_default()) }
                    div."grid" {
                        (bound_input("min_total", result.min_total))
                        (bound_input("max_total", result.max_total))
                    }
                    button."outline" type="submit" { (t!("admin.save", locale = locale)) }
                }
                (components::action_button(
                    &names::delete_result_url(result.id),
                    &t!("admin.delete", locale = locale),
                    "secondary",
                ))
            }
        }

        h2 { (t!("admin.new_result", locale = locale)) }
        form method="post" action=(names::results_url(quiz.id)) {
            input name="title" type="text" placeholder=(t!("admin.result_title", locale = locale)) required;
            textarea name="description" placeholder=(t!("admin.description", locale = locale)) {}
            div."grid" {
                input name="min_total" type="number" placeholder=(t!("admin.min_total", locale = locale));
                input name="max_total" type="number" placeholder=(t!("admin.max_total", locale = locale));
            }
            button type="submit" { (t!("admin.add", locale = locale)) }
        }
        p { a href=(names::edit_quiz_url(quiz.id)) { (t!("admin.back_to_quiz", locale = locale)) } }
    }
}
