use maud::{html, Markup, DOCTYPE};
use rust_i18n::t;

use crate::{names, utils};

const THEMES: &[&str] = &["light", "dark", "pink"];

fn css() -> Markup {
    html! {
        link rel="stylesheet" href="/static/index.css";
    }
}

fn js() -> Markup {
    html! {
        script src="/static/theme.js" defer {}
        script src="/static/quiz_progress.js" defer {}
    }
}

fn icon() -> Markup {
    html! {
        link rel="icon" href="/static/img/icon.svg" type="image/svg+xml" {}
    }
}

fn header(admin: Option<&str>, locale: &str) -> Markup {
    html! {
        header {
            nav {
                ul {
                    li."secondary" {
                        a href="/" {
                            strong { (t!("app.name", locale = locale)) }
                        }
                    }
                }
                ul {
                    @if let Some(username) = admin {
                        li { a href=(names::ADMIN_URL) { (t!("nav.admin", locale = locale)) } }
                        li."secondary" { (username) }
                        li {
                            form method="post" action=(names::LOGOUT_URL) {
                                button."outline" type="submit" { (t!("nav.logout", locale = locale)) }
                            }
                        }
                    }
                    @for lang in names::SUPPORTED_LOCALES {
                        @if *lang != locale {
                            li { a href=(names::lang_url(lang)) { (lang) } }
                        }
                    }
                    li {
                        @for theme in THEMES {
                            button."theme-dot" type="button" data-theme=(theme) title=(theme) {}
                        }
                    }
                    li."secondary" { (utils::VERSION) }
                }
            }
        }
    }
}

fn document(title: &str, body: Markup, admin: Option<&str>, locale: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(locale) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="color-scheme" content="light dark";

                (css())
                (js())
                (icon())

                (titled(title, locale))
            }

            body."container" {
                (header(admin, locale))
                main { (body) }
            }
        }
    }
}

/// Full public page.
pub fn page(title: &str, body: Markup, locale: &str) -> Markup {
    document(title, body, None, locale)
}

/// Full page with the admin navigation for the logged-in `username`.
pub fn admin_page(title: &str, body: Markup, username: &str, locale: &str) -> Markup {
    document(title, body, Some(username), locale)
}

pub fn titled(title: &str, locale: &str) -> Markup {
    html! {
        title { (title) " - " (t!("app.name", locale = locale)) }
    }
}
