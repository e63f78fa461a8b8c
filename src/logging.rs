//! Structured JSONL logging plus human-readable stderr output.
//!
//! This module provides dual-output logging:
//! - **JSONL to file** (`<data dir>/shortcut-dispatch/logs/shortcut-dispatch.jsonl`)
//! - **Compact to stderr** for developers
//!
//! # Usage
//!
//! ```rust,ignore
//! use shortcut_dispatch::logging;
//!
//! // Initialize logging - MUST keep guard alive for duration of program
//! let _guard = logging::init("info");
//!
//! tracing::info!(event_type = "shortcut_dispatch", action = "open-search", "Action dispatched");
//! ```
//!
//! Stdout is left untouched: the binary writes protocol output there.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::APP_DIR_NAME;

const LOG_FILE_NAME: &str = "shortcut-dispatch.jsonl";

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the dual-output logging system.
///
/// `default_filter` applies when RUST_LOG is unset. If the log file cannot
/// be opened only the stderr layer is installed.
pub fn init(default_filter: &str) -> LoggingGuard {
    let log_dir = get_log_dir();
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
    }
    let log_path = log_dir.join(LOG_FILE_NAME);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| eprintln!("[LOGGING] Failed to open log file: {}", e))
        .ok();

    let (json_layer, file_guard) = match file {
        Some(file) => {
            // Non-blocking writer keeps file I/O off the dispatch path
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_timer(UtcTime::new(format_description!(
                    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
                )))
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .with_span_events(FmtSpan::NONE);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .compact();

    // try_init so a second call (e.g. from tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(stderr_layer)
        .try_init();

    tracing::info!(
        event_type = "app_lifecycle",
        action = "started",
        log_path = %log_path.display(),
        "Logging initialized"
    );

    LoggingGuard {
        _file_guard: file_guard,
    }
}

/// Get the log directory path (`<data dir>/shortcut-dispatch/logs`)
fn get_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR_NAME).join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("shortcut-dispatch-logs"))
}

/// Get the path to the JSONL log file
pub fn log_path() -> PathBuf {
    get_log_dir().join(LOG_FILE_NAME)
}

/// Log a keyboard event with structured fields
pub fn log_key_event(key: &str, modifiers: &str, outcome: &str) {
    tracing::debug!(
        event_type = "key_event",
        key = key,
        modifiers = modifiers,
        outcome = outcome,
        "Key {} {}",
        key,
        outcome
    );
}
