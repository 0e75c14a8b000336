//! Logging initialization.
//!
//! Terminal mode: logs to `{state}/logs/vibes-invite-{datetime}.log`
//! CLI mode: logs to stderr

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Keeps the log writer alive; buffered lines are flushed when dropped.
pub struct LoggingHandle {
    pub _guard: Option<WorkerGuard>,

    /// Set only when logging to a file
    pub log_file_path: Option<PathBuf>,
}

/// Level directive in effect: `--debug`, then `RUST_LOG`, then config.
fn filter_directive(config: &Config, debug_override: bool, rust_log: Option<String>) -> String {
    if debug_override {
        return "debug".to_string();
    }
    rust_log
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| config.logging.level.clone())
}

fn log_file_name(now: DateTime<Utc>) -> String {
    format!("vibes-invite-{}.log", now.format("%Y%m%dT%H%M%SZ"))
}

fn writes_to_file(config: &Config, is_tui_mode: bool) -> bool {
    is_tui_mode && config.logging.to_file
}

/// Install the global subscriber. Call once, early in `main`.
pub fn init_logging(
    config: &Config,
    is_tui_mode: bool,
    debug_override: bool,
) -> Result<LoggingHandle> {
    let directive = filter_directive(config, debug_override, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter '{}'", directive))?;

    if writes_to_file(config, is_tui_mode) {
        // stderr would corrupt the alternate screen
        let logs_dir = config.logs_path();
        std::fs::create_dir_all(&logs_dir)
            .with_context(|| format!("Failed to create {}", logs_dir.display()))?;

        let log_filename = log_file_name(Utc::now());
        let log_file_path = logs_dir.join(&log_filename);

        let file_appender = tracing_appender::rolling::never(&logs_dir, &log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();

        Ok(LoggingHandle {
            _guard: Some(guard),
            log_file_path: Some(log_file_path),
        })
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();

        Ok(LoggingHandle {
            _guard: None,
            log_file_path: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.paths.state = temp_dir.path().to_string_lossy().to_string();
        config
    }

    #[test]
    fn test_logs_dir_inside_state_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let logs_dir = config.logs_path();
        assert!(logs_dir.ends_with("logs"));
        assert!(logs_dir.starts_with(temp_dir.path()));
    }

    #[test]
    fn test_log_file_name_format() {
        let now = Utc.with_ymd_and_hms(2025, 7, 15, 20, 0, 5).unwrap();
        assert_eq!(log_file_name(now), "vibes-invite-20250715T200005Z.log");
    }

    #[test]
    fn test_debug_flag_beats_rust_log() {
        let config = Config::default();
        assert_eq!(
            filter_directive(&config, true, Some("warn".to_string())),
            "debug"
        );
    }

    #[test]
    fn test_rust_log_beats_config() {
        let config = Config::default();
        assert_eq!(
            filter_directive(&config, false, Some("vibes_invite=trace".to_string())),
            "vibes_invite=trace"
        );
        assert_eq!(filter_directive(&config, false, Some("  ".to_string())), "info");
        assert_eq!(filter_directive(&config, false, None), "info");
    }

    #[test]
    fn test_file_logging_only_in_tui_mode() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = test_config(&temp_dir);
        assert!(writes_to_file(&config, true));
        assert!(!writes_to_file(&config, false));

        config.logging.to_file = false;
        assert!(!writes_to_file(&config, true));
    }
}
