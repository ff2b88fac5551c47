//! Value types passed between the controller, its background tasks and the host shell.

pub mod types;

pub use types::{
    Category, NavigationIntent, Phase, ResultKey, SearchItem, SearchPage, SearchQuery,
    SearchRequest,
};
