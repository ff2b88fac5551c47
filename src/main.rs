//! typeahead binary entrypoint kept minimal. The interactive runtime lives in `app`.

mod app;
mod args;

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;

/// Log timestamp formatter: local time, millisecond precision.
struct TypeaheadTimer;

impl tracing_subscriber::fmt::time::FormatTime for TypeaheadTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        w.write_str(&format_timestamp(chrono::Local::now()))
    }
}

/// Render a log timestamp as `YYYY-MM-DDTHH:MM:SS.mmm`.
fn format_timestamp<Tz: chrono::TimeZone>(at: chrono::DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    at.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize tracing, writing to `<config>/logs/typeahead.log`.
///
/// Inputs:
/// - `level`: Default filter used when `RUST_LOG` is unset.
///
/// Details:
/// - Falls back to stderr when the log file cannot be opened.
fn init_logging(level: &str) {
    let mut log_path = typeahead::config::logs_dir();
    log_path.push("typeahead.log");
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(TypeaheadTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: stderr logger so startup is never blocked
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(TypeaheadTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = args::Args::parse();
    init_logging(&args::determine_log_level(&args));

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "typeahead starting");
    if let Err(err) = app::run(args).await {
        tracing::error!(error = %err, "Application error");
        eprintln!("typeahead: {err}");
        std::process::exit(1);
    }
    tracing::info!("typeahead exited");
}
