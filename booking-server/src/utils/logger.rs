//! Logging Infrastructure
//!
//! Structured logging on stdout, or a daily rolling file when a log
//! directory is configured and exists.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger at `info` on stdout
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger with optional JSON formatting and file output
///
/// `RUST_LOG` wins over `log_level` when set.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level.unwrap_or("info"))));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let file_dir = log_dir
        .map(Path::new)
        .filter(|dir| dir.is_dir())
        .and_then(Path::to_str);

    // try_init: tests may initialise more than once
    let result = match (file_dir, json) {
        (Some(dir), true) => builder
            .json()
            .with_writer(tracing_appender::rolling::daily(dir, "booking-server"))
            .try_init(),
        (Some(dir), false) => builder
            .with_ansi(false)
            .with_writer(tracing_appender::rolling::daily(dir, "booking-server"))
            .try_init(),
        (None, true) => builder.json().try_init(),
        (None, false) => builder.try_init(),
    };

    if let Err(e) = result {
        eprintln!("Logger already initialised: {e}");
    }
}

fn default_directives(level: &str) -> String {
    format!("booking_server={level},shared={level},tower_http={level},security={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_own_crates() {
        let d = default_directives("debug");
        assert!(d.contains("booking_server=debug"));
        assert!(d.contains("tower_http=debug"));
    }

    #[test]
    fn missing_log_dir_falls_back_to_stdout() {
        init_logger_with_file(Some("warn"), false, Some("/definitely/not/here"));
        init_logger();
    }
}
