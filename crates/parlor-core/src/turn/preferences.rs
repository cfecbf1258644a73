//! Preference extraction heuristic.
//!
//! If a message contains "i like" or "my preference is" (case-insensitive),
//! those phrases are stripped globally and the trimmed remainder becomes the
//! new value of the "updated" preference key, overwriting any prior value.
//! Free-form text is stored as-is: no validation, no sanitization.

use std::sync::LazyLock;

use regex::Regex;

/// The fixed preference key every extraction writes to.
pub const UPDATED_KEY: &str = "updated";

static PREFERENCE_PHRASES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)i like|my preference is").expect("valid phrase pattern"));

/// Extract a stated preference from a message, if any.
///
/// Returns `None` when the message contains neither trigger phrase.
pub fn extract_preference(message: &str) -> Option<String> {
    let lowered = message.to_lowercase();
    if !lowered.contains("i like") && !lowered.contains("my preference is") {
        return None;
    }

    Some(
        PREFERENCE_PHRASES
            .replace_all(message, "")
            .trim()
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_trigger_phrase() {
        assert_eq!(extract_preference("what's the weather?"), None);
    }

    #[test]
    fn test_i_like_strips_and_trims() {
        assert_eq!(extract_preference("I like jazz").as_deref(), Some("jazz"));
    }

    #[test]
    fn test_my_preference_is() {
        assert_eq!(
            extract_preference("my preference is dark mode").as_deref(),
            Some("dark mode")
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            extract_preference("MY PREFERENCE IS tea").as_deref(),
            Some("tea")
        );
    }

    #[test]
    fn test_global_strip_of_both_phrases() {
        // Both phrases vanish; whatever text is left survives.
        assert_eq!(
            extract_preference("I like jazz and my preference is vinyl").as_deref(),
            Some("jazz and  vinyl")
        );
    }

    #[test]
    fn test_phrase_only_yields_empty_value() {
        assert_eq!(extract_preference("i like").as_deref(), Some(""));
    }
}
