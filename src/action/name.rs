//! Action-name normalization.
//!
//! The normalized name is the message type tag the store's reducer matches
//! on, and the key under which polls are registered.

use serde::{Deserialize, Serialize};

/// How whitespace inside an action name turns into underscores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhitespaceStyle {
    /// Each run of whitespace becomes a single underscore.
    #[default]
    Collapse,
    /// Each whitespace character becomes its own underscore.
    PerCharacter,
}

/// Normalize an action name into a dispatch type tag.
///
/// No trimming is applied: leading and trailing whitespace also turns into
/// underscores.
pub fn normalize_action_name(action: &str, style: WhitespaceStyle) -> String {
    let mut out = String::with_capacity(action.len());
    let mut in_run = false;

    for ch in action.chars() {
        if ch.is_whitespace() {
            if style == WhitespaceStyle::PerCharacter || !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            in_run = false;
            out.extend(ch.to_uppercase());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_space_becomes_underscore() {
        assert_eq!(
            normalize_action_name("change value", WhitespaceStyle::Collapse),
            "CHANGE_VALUE"
        );
        assert_eq!(
            normalize_action_name("change value", WhitespaceStyle::PerCharacter),
            "CHANGE_VALUE"
        );
    }

    #[test]
    fn collapse_merges_runs_without_trimming() {
        assert_eq!(
            normalize_action_name("  multi   space  ", WhitespaceStyle::Collapse),
            "_MULTI_SPACE_"
        );
    }

    #[test]
    fn per_character_keeps_every_whitespace() {
        assert_eq!(
            normalize_action_name("  multi   space  ", WhitespaceStyle::PerCharacter),
            "__MULTI___SPACE__"
        );
    }

    #[test]
    fn tabs_and_newlines_count_as_whitespace() {
        assert_eq!(
            normalize_action_name("load\t\nrows", WhitespaceStyle::Collapse),
            "LOAD_ROWS"
        );
    }

    #[test]
    fn already_normalized_names_are_unchanged() {
        assert_eq!(
            normalize_action_name("FETCH_DATA", WhitespaceStyle::Collapse),
            "FETCH_DATA"
        );
    }

    #[test]
    fn empty_name_stays_empty() {
        assert_eq!(normalize_action_name("", WhitespaceStyle::Collapse), "");
    }
}
