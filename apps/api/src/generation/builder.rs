//! Prompt Builder: turns rules and keywords into the two chat messages.

use crate::errors::{AppError, MISSING_KEYWORDS};
use crate::generation::prompts::{GENERATION_CONSTRAINTS, SYSTEM_MESSAGE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMessages {
    pub system_message: String,
    pub user_message: String,
}

/// Composes the request messages. Empty keywords or empty rules are rejected
/// before anything is sent.
pub fn build(rules: &str, keywords: &str) -> Result<PromptMessages, AppError> {
    let keywords = keywords.trim();
    if keywords.is_empty() {
        return Err(AppError::MissingInput(MISSING_KEYWORDS));
    }

    let rules = rules.trim_end();
    if rules.trim_start().is_empty() {
        return Err(AppError::MissingRules);
    }

    Ok(PromptMessages {
        system_message: SYSTEM_MESSAGE.to_string(),
        user_message: format!("{rules}\nInitial keywords: {keywords}\n{GENERATION_CONSTRAINTS}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_layout() {
        let messages = build("Write like a poet.\n", "  foggy harbor, dawn ").unwrap();
        let mut lines = messages.user_message.lines();

        assert_eq!(lines.next(), Some("Write like a poet."));
        assert_eq!(lines.next(), Some("Initial keywords: foggy harbor, dawn"));
        assert!(messages.user_message.ends_with(GENERATION_CONSTRAINTS));
        assert_eq!(messages.system_message, SYSTEM_MESSAGE);
    }

    #[test]
    fn test_constraints_cover_budget_and_format() {
        assert!(GENERATION_CONSTRAINTS.contains("77 tokens"));
        assert!(GENERATION_CONSTRAINTS.contains("single line"));
        assert!(GENERATION_CONSTRAINTS.contains("No quotation marks or dashes"));
        assert!(GENERATION_CONSTRAINTS.contains("commas"));
    }

    #[test]
    fn test_rules_placeholders_are_not_expanded() {
        let messages = build("Use {keywords} literally.", "cats").unwrap();
        assert!(messages.user_message.starts_with("Use {keywords} literally."));
    }

    #[test]
    fn test_empty_keywords_rejected() {
        assert!(matches!(
            build("rules", "   "),
            Err(AppError::MissingInput(MISSING_KEYWORDS))
        ));
    }

    #[test]
    fn test_empty_rules_rejected() {
        assert!(matches!(build("\n  \n", "cats"), Err(AppError::MissingRules)));
    }
}
