use maud::{html, Markup};

/// Banner shown above a form when the previous submission could not be used.
pub fn warning(message: &str) -> Markup {
    html! {
        article."warning" role="alert" { (message) }
    }
}

/// A POST form holding a single button, for actions like delete or move.
pub fn action_button(action: &str, label: &str, class: &str) -> Markup {
    html! {
        form."inline" method="post" action=(action) {
            button class=(class) type="submit" { (label) }
        }
    }
}

/// `"-"` for an unset band bound.
pub fn bound(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_bound_renders_dash() {
        assert_eq!(bound(None), "-");
        assert_eq!(bound(Some(-9999)), "-9999");
    }
}
