//! Tracing configuration
//!
//! Initializes the tracing-subscriber registry for structured logging with
//! spans: an env filter, a stderr layer and, when a log directory is
//! configured, a non-blocking daily rolling file layer.

use std::sync::OnceLock;
use std::{fs, io};

use pl_core::config::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_PREFIX: &str = "principal-list.log";

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// - **Development**: debug level for the workspace crates
/// - **Production**: info level
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        "warn".to_string(),
        format!("pl_core={level}"),
        format!("pl_app={level}"),
        format!("pl_infra={level}"),
        format!("principal_list={level}"),
    ]
}

/// Pick the env filter: `RUST_LOG` first, then the configured directives,
/// then the build defaults.
fn build_env_filter(settings: &LoggingSettings) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    if let Some(directives) = settings.filter.as_deref() {
        match EnvFilter::try_new(directives) {
            Ok(filter) => return filter,
            Err(err) => eprintln!("Invalid log filter {directives:?}, using defaults: {err}"),
        }
    }
    EnvFilter::new(build_filter_directives(is_development()).join(","))
}

/// Initialize the tracing subscriber.
///
/// Call once, before any logging occurs. Format:
/// `2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message`
///
/// ## Errors
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber(settings: &LoggingSettings) -> anyhow::Result<()> {
    let env_filter = build_env_filter(settings);

    // stdout carries the rendered list only
    let stderr_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(BoxMakeWriter::new(io::stderr));

    let file_layer = match settings.directory.as_deref() {
        Some(dir) => match fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                if LOG_GUARD.set(guard).is_err() {
                    eprintln!("Log guard already initialized");
                }
                Some(
                    fmt::layer()
                        .with_timer(fmt::time::ChronoUtc::new(
                            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                        ))
                        .with_level(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_target(true)
                        .with_ansi(false)
                        .with_writer(writer),
                )
            }
            Err(err) => {
                eprintln!("Failed to initialize file logging, falling back to stderr: {err}");
                None
            }
        },
        None => None,
    };

    registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
