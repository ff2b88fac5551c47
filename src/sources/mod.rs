//! Network data retrieval: the search endpoint client.

mod search;

pub use search::{HttpSearchApi, SearchApi, SearchError, decode_page};
