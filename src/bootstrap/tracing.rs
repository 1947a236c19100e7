//! Tracing configuration for joinflow
//!
//! The console owns stdout, so events go to a non-blocking log file in the
//! data directory. Stdout is used only when the file cannot be opened.

use std::path::Path;
use std::sync::OnceLock;
use std::{fs, io};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

pub const LOG_FILE_NAME: &str = "joinflow.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default filter directives when `RUST_LOG` is unset.
///
/// ## Behavior / 行为
/// - **Development**: debug for the app crates
/// - **Production**: info for the app crates
/// - HTTP client internals stay at warn
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    vec![
        if is_dev { "debug" } else { "info" }.to_string(),
        "hyper=warn".to_string(),
        "hyper_util=warn".to_string(),
        "reqwest=warn".to_string(),
        "rustls=warn".to_string(),
    ]
}

/// Initialize the tracing subscriber.
///
/// Call once from `main` before wiring.
///
/// ## Errors / 错误
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber(data_dir: &Path) -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(build_filter_directives(is_development()).join(","))
    });

    let (writer, ansi) = match build_file_writer(data_dir) {
        Ok(writer) => (BoxMakeWriter::new(writer), false),
        Err(err) => {
            eprintln!("Failed to initialize file logging, falling back to stdout: {err}");
            (BoxMakeWriter::new(io::stdout), cfg!(not(test)))
        }
    };

    // "2026-10-16 10:30:45.123 INFO file.rs:42 target: message"
    let fmt_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(writer);

    registry().with(env_filter).with(fmt_layer).try_init()?;
    Ok(())
}

fn build_file_writer(data_dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(data_dir)?;

    let file_appender = tracing_appender::rolling::never(data_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
