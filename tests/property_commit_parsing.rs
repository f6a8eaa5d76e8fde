use notion_commit_sync::domain::models::{CommitMessage, MatchStrategy, TaskKey, TaskToken};
use notion_commit_sync::SyncError;
use proptest::prelude::*;

proptest! {
    /// Property: the title is the first non-blank line, and no blank line
    /// survives into the body
    #[test]
    fn prop_parse_drops_blank_lines(
        lines in prop::collection::vec("[ \\t]{0,2}|[a-zA-Z0-9\\[\\] ]{1,20}", 0..12)
    ) {
        let raw = lines.join("\n");
        let msg = CommitMessage::parse(&raw);

        let kept: Vec<&str> = lines
            .iter()
            .map(String::as_str)
            .filter(|l| !l.trim().is_empty())
            .collect();

        prop_assert_eq!(msg.title.as_str(), kept.first().copied().unwrap_or(""));
        prop_assert!(!msg.title.contains('\n'));
        prop_assert!(msg.body.split('\n').all(|l| msg.body.is_empty() || !l.trim().is_empty()));
        prop_assert_eq!(msg.body, kept.iter().skip(1).copied().collect::<Vec<_>>().join("\n"));
    }

    /// Property: whatever sits inside the leading brackets is the token
    #[test]
    fn prop_leading_bracket_is_extracted(
        token in "[^\\]\\n]{0,20}",
        rest in "[^\\n]{0,40}",
    ) {
        let title = format!("[{token}]{rest}");
        let extracted = TaskToken::extract(&title).unwrap();
        prop_assert_eq!(extracted.as_str(), token.as_str());
    }

    /// Property: a title that does not open with `[` never yields a token
    #[test]
    fn prop_title_without_leading_bracket_is_missing(title in "[^\\[\\n][^\\n]{0,40}") {
        let result = TaskToken::extract(&title);
        prop_assert!(matches!(result, Err(SyncError::TokenMissing { .. })), "unexpected token");
    }

    /// Property: the numeric strategy reads the first number, ignoring
    /// prefixes and leading zeros
    #[test]
    fn prop_numeric_strategy_reads_first_number(
        prefix in "[A-Z]{0,5}-?#?",
        zeros in 0usize..4,
        value in 0u64..1_000_000_000,
        suffix in "( [a-z]{1,6})?",
    ) {
        let title = format!("[{prefix}{}{value}{suffix}] Something", "0".repeat(zeros));
        let token = TaskToken::extract(&title).unwrap();
        let key = MatchStrategy::Numeric.normalize(&token).unwrap();
        prop_assert_eq!(key, TaskKey::Numeric(value));
    }

    /// Property: the opaque strategy keeps any token verbatim, empty included
    #[test]
    fn prop_opaque_strategy_is_verbatim(token in "[^\\]\\n]{0,20}") {
        let title = format!("[{token}] Something");
        let key = MatchStrategy::Opaque
            .normalize(&TaskToken::extract(&title).unwrap())
            .unwrap();
        prop_assert_eq!(key, TaskKey::Opaque(token));
    }
}
