//! Integration tests for the logging system

use bridge_traits::logging::LogLevel;
use core_runtime::logging::{
    init_logging, redact_if_sensitive, strip_path, LogFormat, LoggingConfig,
};
use core_runtime::Error;

#[test]
fn test_config_chaining() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Warn)
        .with_spans(false)
        .with_target(false)
        .with_thread_info(true);

    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.level, LogLevel::Warn);
    assert!(!config.enable_spans);
    assert!(!config.display_target);
    assert!(config.display_thread_info);
    assert!(config.logger_sink.is_none());
}

#[test]
fn test_credentials_never_reach_logs_verbatim() {
    assert_eq!(redact_if_sensitive("password", "s3cret!"), "[REDACTED]");
    assert_eq!(redact_if_sensitive("secret", "s3cret!"), "[REDACTED]");
    assert_eq!(
        redact_if_sensitive("x-fallback-cookies", "{\"a_session\":\"x\"}"),
        "[REDACTED]"
    );

    let redacted = redact_if_sensitive("identifier", "user@example.com");
    assert!(redacted.starts_with('u'));
    assert!(!redacted.contains("example.com"));
}

#[test]
fn test_plain_values_pass_through() {
    assert_eq!(redact_if_sensitive("document_id", "65f0c1a2"), "65f0c1a2");
    assert_eq!(redact_if_sensitive("username", "johndoe123"), "johndoe123");
}

#[test]
fn test_path_stripping() {
    assert_eq!(strip_path("/home/user/Videos/trip.mp4"), "trip.mp4");
    assert_eq!(strip_path("D:\\data\\thumb.png"), "thumb.png");
    assert_eq!(strip_path(""), "");
}

#[test]
fn test_format_selection() {
    #[cfg(debug_assertions)]
    assert_eq!(LoggingConfig::default().format, LogFormat::Pretty);

    #[cfg(not(debug_assertions))]
    assert_eq!(LoggingConfig::default().format, LogFormat::Json);
}

#[test]
fn test_init_logging_only_once() {
    // Single test touching the global subscriber in this binary.
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug);

    assert!(init_logging(config.clone()).is_ok());
    assert!(matches!(init_logging(config), Err(Error::Config(_))));
}
