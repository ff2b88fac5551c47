//! Core non-UI search logic split into modular submodules.

pub mod controller;
pub mod debounce;
pub mod dispatch;
pub mod highlight;
pub mod navigator;
pub mod results;

// Re-export public APIs so callers can use `crate::logic::...` directly.
pub use controller::{ControllerEvent, ControllerOptions, SearchController};
pub use debounce::{DebounceScheduler, TimerToken};
pub use dispatch::{QueryDispatcher, SearchOutcome};
pub use highlight::{Fragment, highlight};
pub use navigator::{KeyboardNavigator, NavKey, NavOutcome};
pub use results::ResultSet;
