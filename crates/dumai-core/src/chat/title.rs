//! Session title derivation.
//!
//! `derive_title` turns the first user message of a conversation into a short
//! sidebar title. It is pure: no LLM call, no store access.

use dumai_types::chat::SessionTitle;

/// Maximum title length, in characters, including the ellipsis.
pub const MAX_TITLE_CHARS: usize = 40;

/// Marker appended to truncated titles.
pub const ELLIPSIS: &str = "...";

/// Derive a session title from a user message.
///
/// Takes the first line (leading blank lines are skipped), cuts it after the
/// first `?` when there is one, trims it, and caps it at [`MAX_TITLE_CHARS`]
/// characters with [`ELLIPSIS`] replacing the tail. Empty or whitespace-only
/// input yields `placeholder`.
pub fn derive_title(message: &str, placeholder: &str) -> SessionTitle {
    let first_line = message.trim_start().lines().next().unwrap_or("");

    let question = match first_line.find('?') {
        Some(idx) => &first_line[..=idx],
        None => first_line,
    };

    let candidate = question.trim();
    if candidate.is_empty() {
        return SessionTitle::Placeholder(placeholder.to_string());
    }

    if candidate.chars().count() <= MAX_TITLE_CHARS {
        return SessionTitle::Derived(candidate.to_string());
    }

    let keep = MAX_TITLE_CHARS - ELLIPSIS.chars().count();
    let mut title: String = candidate.chars().take(keep).collect();
    title.push_str(ELLIPSIS);
    SessionTitle::Derived(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACEHOLDER: &str = "New Chat";

    #[test]
    fn test_truncates_at_first_question_mark() {
        let title = derive_title(
            "What is the capital of France? It's actually Lyon.",
            PLACEHOLDER,
        );
        assert_eq!(title, SessionTitle::Derived("What is the capital of France?".into()));
    }

    #[test]
    fn test_long_input_capped_with_ellipsis() {
        let title = derive_title(&"a".repeat(60), PLACEHOLDER);
        let text = title.as_str();
        assert_eq!(text.chars().count(), 40);
        assert!(text.ends_with("..."));
        assert!(text.starts_with(&"a".repeat(37)));
        assert!(!title.is_placeholder());
    }

    #[test]
    fn test_exactly_forty_chars_is_kept() {
        let input = "b".repeat(40);
        assert_eq!(derive_title(&input, PLACEHOLDER), SessionTitle::Derived(input));
    }

    #[test]
    fn test_empty_and_whitespace_yield_placeholder() {
        for input in ["", "   ", "\n\t  \n"] {
            assert_eq!(
                derive_title(input, PLACEHOLDER),
                SessionTitle::Placeholder(PLACEHOLDER.into())
            );
        }
    }

    #[test]
    fn test_only_first_line_is_used() {
        let title = derive_title("Tell me a joke\nabout penguins please", PLACEHOLDER);
        assert_eq!(title.as_str(), "Tell me a joke");
    }

    #[test]
    fn test_leading_blank_lines_are_skipped() {
        let title = derive_title("\n\n  Why is the sky green?\n", PLACEHOLDER);
        assert_eq!(title.as_str(), "Why is the sky green?");
    }

    #[test]
    fn test_multibyte_characters_counted_as_chars() {
        let input = "é".repeat(50);
        let title = derive_title(&input, PLACEHOLDER);
        assert_eq!(title.as_str().chars().count(), 40);
        assert!(title.as_str().ends_with("..."));
    }

    #[test]
    fn test_long_question_is_cut_then_capped() {
        let input = format!("{}? trailing", "q".repeat(45));
        let title = derive_title(&input, PLACEHOLDER);
        assert_eq!(title.as_str().chars().count(), 40);
        assert!(title.as_str().ends_with("..."));
    }
}
