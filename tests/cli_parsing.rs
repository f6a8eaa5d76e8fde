use clap::Parser;
use notion_commit_sync::cli::Cli;
use notion_commit_sync::MatchStrategy;

#[test]
fn test_parse_no_arguments() {
    let cli = Cli::try_parse_from(["notion-commit-sync"]).unwrap();

    assert!(cli.config.is_none());
    assert!(cli.commit_ref.is_none());
    assert!(cli.strategy.is_none());
    assert!(!cli.dry_run);
    assert!(!cli.json);
}

#[test]
fn test_parse_all_flags() {
    let cli = Cli::try_parse_from([
        "notion-commit-sync",
        "--config",
        "sync.yaml",
        "--commit-ref",
        "6dcb09b",
        "--strategy",
        "numeric",
        "--dry-run",
        "--json",
    ])
    .unwrap();

    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("sync.yaml")));
    assert_eq!(cli.commit_ref.as_deref(), Some("6dcb09b"));
    assert_eq!(cli.strategy, Some(MatchStrategy::Numeric));
    assert!(cli.dry_run);
    assert!(cli.json);
}

#[test]
fn test_parse_short_flags() {
    let cli = Cli::try_parse_from(["notion-commit-sync", "-c", "a.yaml", "-s", "opaque", "-j"])
        .unwrap();

    assert_eq!(cli.strategy, Some(MatchStrategy::Opaque));
    assert!(cli.json);
}

#[test]
fn test_parse_strategy_is_case_insensitive() {
    let cli = Cli::try_parse_from(["notion-commit-sync", "--strategy", "NUMERIC"]).unwrap();
    assert_eq!(cli.strategy, Some(MatchStrategy::Numeric));
}

#[test]
fn test_parse_unknown_strategy_fails() {
    let result = Cli::try_parse_from(["notion-commit-sync", "--strategy", "fuzzy"]);
    let err = result.unwrap_err().to_string();
    assert!(err.contains("Unknown match strategy"));
}

#[test]
fn test_parse_rejects_positional_arguments() {
    assert!(Cli::try_parse_from(["notion-commit-sync", "extra"]).is_err());
}
