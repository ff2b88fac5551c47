//! typeahead application module: terminal setup, the interactive event loop and `--once` mode.

/// Single-shot search printed to stdout.
mod once;
/// Runtime event loop and the terminal event reader.
mod runtime;
/// Terminal setup and restoration utilities.
mod terminal;

// Re-export the public entrypoint so callers keep using `app::run(...)`.
pub use runtime::run;

/// Boxed error returned by the binary's fallible entrypoints.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
