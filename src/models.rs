//! Request-side types: what arrives from forms, parsed permissively into
//! values the data layer accepts.

use std::collections::BTreeSet;

use crate::db::Question;

macro_rules! form_enum {
    ($name:ident, default $default:ident => $default_value:literal, $($variant:ident => $value:literal),+ $(,)?) => {
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub enum $name {
            #[default]
            $default,
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$name::$default, $($name::$variant),+];

            /// Unknown or missing values fall back to the default.
            pub fn parse(value: Option<&str>) -> Self {
                match value.map(str::trim) {
                    $(Some($value) => $name::$variant,)+
                    _ => $name::$default,
                }
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $name::$default => $default_value,
                    $($name::$variant => $value),+
                }
            }
        }
    };
}

form_enum!(DisplayMode, default Ordered => "ordered", Random => "random");
form_enum!(ChoiceMode, default Ordered => "ordered", Random => "random");
form_enum!(
    ChoiceStyle,
    default Normal => "normal",
    Heart => "heart",
    Star => "star",
    Diamond => "diamond",
);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            _ => None,
        }
    }
}

/// Editable quiz attributes, already normalised.
#[derive(Clone, Debug)]
pub struct QuizSettings {
    pub title: String,
    pub description: String,
    pub display_mode: DisplayMode,
    pub choice_mode: ChoiceMode,
    pub choice_style: ChoiceStyle,
}

/// A result as entered by the admin. Blank or unparsable bounds are unset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultForm {
    pub title: String,
    pub description: String,
    pub min_total: Option<i64>,
    pub max_total: Option<i64>,
}

impl ResultForm {
    pub fn new(title: &str, description: &str, min_total: &str, max_total: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            min_total: parse_bound(min_total),
            max_total: parse_bound(max_total),
        }
    }
}

/// Band bound from a form field: blank or garbage means "no bound".
pub fn parse_bound(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Point value from a form field: blank or garbage means zero.
pub fn parse_points(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// Decode an `application/x-www-form-urlencoded` body into ordered pairs,
/// keeping repeated keys. Pairs that fail to decode are dropped.
pub fn form_pairs(body: &str) -> Vec<(String, String)> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = urlencoding::decode(&key.replace('+', " ")).ok()?.into_owned();
            let value = urlencoding::decode(&value.replace('+', " ")).ok()?.into_owned();
            Some((key, value))
        })
        .collect()
}

pub fn question_field(question_id: i64) -> String {
    format!("q-{question_id}")
}

/// The validated set of choice ids a user picked.
///
/// Anything that is not an integer is discarded here; ids that parse but
/// name no choice are discarded later by aggregation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectedChoices(BTreeSet<i64>);

impl SelectedChoices {
    pub fn from_raw<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            values
                .into_iter()
                .filter_map(|v| v.as_ref().trim().parse::<i64>().ok())
                .collect(),
        )
    }

    /// Collect answers for `questions` from submitted form pairs. A
    /// single-select question contributes its first non-empty value, a
    /// multi-select question all of them. Fields for other questions are
    /// ignored.
    pub fn from_form(pairs: &[(String, String)], questions: &[Question]) -> Self {
        let mut raw: Vec<&str> = Vec::new();

        for question in questions {
            let field = question_field(question.id);
            let mut values = pairs
                .iter()
                .filter(|(key, value)| *key == field && !value.is_empty())
                .map(|(_, value)| value.as_str());

            if question.multiple {
                raw.extend(values);
            } else if let Some(first) = values.next() {
                raw.push(first);
            }
        }

        Self::from_raw(raw)
    }

    pub fn ids(&self) -> Vec<i64> {
        self.0.iter().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<i64> for SelectedChoices {
    fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
