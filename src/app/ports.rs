use crate::error::Result;
use crate::types::ListingPage;
use async_trait::async_trait;

/// Source of catalog listing pages.
///
/// `cursor` is `None` for the first page and the previous page's `offset` afterwards.
#[async_trait]
pub trait ListingPort: Send + Sync {
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<ListingPage>;
}
