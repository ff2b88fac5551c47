//! Library entry for typeahead exposing the search controller for the binary and integration tests.

pub mod config;
pub mod events;
pub mod history;
pub mod logic;
pub mod sources;
pub mod state;
pub mod ui;
pub mod util;

#[cfg(test)]
mod test_utils;
