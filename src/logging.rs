//! Logging configuration for lexsearch

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{
    self,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::config::AppConfig;
use crate::Result;

const LOG_DIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "lexsearch.log";

/// Filter for an explicit `level`; `RUST_LOG` is only consulted when no level is given
fn env_filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::try_new(format!("{level},lexsearch={level}")).unwrap_or_else(|_| {
            eprintln!("Invalid log level '{level}', using info");
            EnvFilter::new("info,lexsearch=info")
        }),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,lexsearch=debug")),
    }
}

/// Level picked for a run: `--verbose` forces debug, otherwise `[logging].level`
fn effective_level(config: &AppConfig, verbose: bool) -> &str {
    if verbose {
        "debug"
    } else {
        &config.logging.level
    }
}

/// Initialize logging from the `[logging]` config section
pub fn init_logging_with_config(config: &AppConfig, verbose: bool) -> Result<WorkerGuard> {
    init_logging_with_level(effective_level(config, verbose))
}

/// Initialize console and daily-rolling file logging at `level`.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the process.
pub fn init_logging_with_level(level: &str) -> Result<WorkerGuard> {
    // Create logs directory if it doesn't exist
    let logs_dir = Path::new(LOG_DIR);
    if !logs_dir.exists() {
        std::fs::create_dir_all(logs_dir)?;
    }

    let file_appender = tracing_appender::rolling::daily(LOG_DIR, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking)
        .with_ansi(false); // No colors in file

    Registry::default()
        .with(env_filter(Some(level)))
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized with level: {} - console and file output enabled", level);
    tracing::info!("Log files will be saved to: {}/{}.YYYY-MM-DD", LOG_DIR, LOG_FILE_PREFIX);

    Ok(guard)
}

/// Initialize console-only logging, for tests and one-shot commands.
/// Does nothing if a global subscriber is already installed.
pub fn init_simple_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(None))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    #[test]
    fn test_simple_logging_initialization_is_idempotent() {
        init_simple_logging();
        init_simple_logging();
        tracing::info!("still logging");
    }

    #[test]
    fn test_explicit_level_sets_filter() {
        assert_eq!(
            env_filter(Some("warn")).max_level_hint(),
            Some(LevelFilter::WARN)
        );
        assert_eq!(
            env_filter(Some("trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn test_invalid_level_falls_back_to_info() {
        assert_eq!(
            env_filter(Some("loud")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn test_verbose_overrides_configured_level() {
        let mut config = AppConfig::default();
        config.logging.level = "warn".to_string();
        assert_eq!(effective_level(&config, false), "warn");
        assert_eq!(effective_level(&config, true), "debug");
    }
}
