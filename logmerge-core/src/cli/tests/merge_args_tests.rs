use crate::cli::MergeArgs;
use crate::color::ColorScheme;
use crate::conf::types::{DisplaySection, FilterSection, MergeSection};
use crate::conf::{ConfigError, LogmergeConfig};
use crate::entry::TimeRange;
use crate::merge::StalePolicy;
use clap::Parser;
use pretty_assertions::assert_eq;
use std::time::Duration;

// ---------------------------
// Helpers
// ---------------------------

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    merge: MergeArgs,
}

fn parse(args: &[&str]) -> MergeArgs {
    let argv = std::iter::once("logmerge").chain(args.iter().copied());
    TestCli::try_parse_from(argv).unwrap().merge
}

fn file_config() -> LogmergeConfig {
    LogmergeConfig {
        merge: MergeSection {
            batch_size: Some(7),
            channel_capacity: Some(3),
            max_entry_size: Some(4096),
            stale_timeout_ms: Some(1500),
        },
        display: DisplaySection {
            color: Some(ColorScheme::Light),
            full_names: Some(true),
        },
        filter: FilterSection {
            grep: Some("from-file".to_string()),
            highlight: None,
        },
    }
}

const PST_505: i64 = 1_447_951_959_505_000_000;

// ---------------------------
// Tests
// ---------------------------

#[test]
fn defaults_apply_without_flags_or_file() {
    // Arrange
    let args = parse(&["a.log"]);

    // Act
    let settings = args.settings(&LogmergeConfig::default()).unwrap();

    // Assert
    assert_eq!(settings.range, TimeRange::default());
    assert_eq!(settings.batch_size, 20);
    assert_eq!(settings.channel_capacity, 100);
    assert_eq!(settings.max_entry_size, 64 * 1024);
    assert_eq!(settings.stale, StalePolicy::Wait);
    assert!(settings.grep.is_none());
    assert_eq!(args.color(&LogmergeConfig::default()), ColorScheme::Dark);
}

#[test]
fn files_are_required() {
    // Act
    let result = TestCli::try_parse_from(["logmerge"]);

    // Assert
    assert!(result.is_err());
}

#[test]
fn config_file_fills_in_missing_flags() {
    // Arrange
    let args = parse(&["a.log"]);
    let config = file_config();

    // Act
    let settings = args.settings(&config).unwrap();

    // Assert
    assert_eq!(settings.batch_size, 7);
    assert_eq!(settings.channel_capacity, 3);
    assert_eq!(settings.max_entry_size, 4096);
    assert_eq!(
        settings.stale,
        StalePolicy::ForceFlush(Duration::from_millis(1500))
    );
    assert_eq!(settings.grep.unwrap().as_str(), "from-file");
    assert_eq!(args.color(&config), ColorScheme::Light);
    assert!(args.full_names(&config));
}

#[test]
fn flags_override_the_config_file() {
    // Arrange
    let args = parse(&[
        "--batch-size",
        "1",
        "--channel-capacity",
        "9",
        "--max-buffer",
        "100",
        "--stale-timeout",
        "0",
        "--grep",
        "from-flag",
        "--color",
        "off",
        "a.log",
    ]);
    let config = file_config();

    // Act
    let settings = args.settings(&config).unwrap();

    // Assert
    assert_eq!(settings.batch_size, 1);
    assert_eq!(settings.channel_capacity, 9);
    assert_eq!(settings.max_entry_size, 100);
    assert_eq!(settings.stale, StalePolicy::Wait);
    assert_eq!(settings.grep.unwrap().as_str(), "from-flag");
    assert_eq!(args.color(&config), ColorScheme::Off);
}

#[test]
fn stale_timeout_is_given_in_seconds() {
    // Arrange
    let args = parse(&["--stale-timeout", "3", "a.log"]);

    // Act
    let settings = args.settings(&LogmergeConfig::default()).unwrap();

    // Assert
    assert_eq!(settings.stale, StalePolicy::ForceFlush(Duration::from_secs(3)));
}

#[test]
fn start_and_duration_bound_the_range() {
    // Arrange
    let args = parse(&[
        "--start",
        "2015/11/19 08:52:39.505 PST",
        "--duration",
        "2",
        "a.log",
    ]);

    // Act
    let settings = args.settings(&LogmergeConfig::default()).unwrap();

    // Assert
    assert_eq!(settings.range, TimeRange::new(PST_505, PST_505 + 2_000_000_000));
}

#[test]
fn stop_and_duration_bound_the_range() {
    // Arrange
    let args = parse(&[
        "--stop",
        "2015/11/19 08:52:39.505 PST",
        "--duration",
        "1",
        "a.log",
    ]);

    // Act
    let settings = args.settings(&LogmergeConfig::default()).unwrap();

    // Assert
    assert_eq!(settings.range, TimeRange::new(PST_505 - 1_000_000_000, PST_505));
}

#[test]
fn unparseable_bound_is_rejected() {
    // Arrange
    let args = parse(&["--start", "yesterday", "a.log"]);

    // Act
    let result = args.settings(&LogmergeConfig::default());

    // Assert
    match result {
        Err(ConfigError::InvalidTimestamp { value, .. }) => assert_eq!(value, "yesterday"),
        other => panic!("expected invalid timestamp, got {other:?}"),
    }
}

#[test]
fn start_after_stop_is_rejected() {
    // Arrange
    let args = parse(&[
        "--start",
        "2015/11/19 08:52:40.000 UTC",
        "--stop",
        "2015/11/19 08:52:39.000 UTC",
        "a.log",
    ]);

    // Act
    let result = args.settings(&LogmergeConfig::default());

    // Assert
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn zero_sizes_are_rejected() {
    // Arrange
    let no_buffer = parse(&["--max-buffer", "0", "a.log"]);
    let no_capacity = parse(&["--channel-capacity", "0", "a.log"]);

    // Act
    let buffer = no_buffer.settings(&LogmergeConfig::default());
    let capacity = no_capacity.settings(&LogmergeConfig::default());

    // Assert
    assert!(matches!(buffer, Err(ConfigError::InvalidValue { .. })));
    assert!(matches!(capacity, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn broken_flag_pattern_names_the_flag() {
    // Arrange
    let args = parse(&["--highlight", "[oops", "a.log"]);

    // Act
    let result = args.settings(&LogmergeConfig::default());

    // Assert
    match result {
        Err(ConfigError::InvalidPattern { field, .. }) => assert_eq!(field, "highlight"),
        other => panic!("expected invalid pattern, got {other:?}"),
    }
}
