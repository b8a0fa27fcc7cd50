//! Catalog ingestion: title parsing and the paginated listing walk.

pub mod fetcher;
pub mod title;

pub use fetcher::{CatalogFetcher, FetchOutcome, FetchStats};
pub use title::parse_title;
