use crate::app::ports::ListingPort;
use crate::config::CatalogConfig;
use crate::error::{CensusError, Result};
use crate::types::ListingPage;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Listing client for the wiki `Articles/List` endpoint.
pub struct ReqwestListing {
    client: reqwest::Client,
    base_url: String,
    category: String,
    limit: u32,
}

impl ReqwestListing {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            category: config.category.clone(),
            limit: config.limit,
        })
    }

    fn query_params(&self, cursor: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("category", self.category.clone()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(offset) = cursor {
            params.push(("offset", offset.to_string()));
        }
        params
    }
}

#[async_trait]
impl ListingPort for ReqwestListing {
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<ListingPage> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&self.query_params(cursor))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CensusError::Status {
                url: resp.url().to_string(),
                status: status.as_u16(),
            });
        }
        let body = resp.bytes().await?;
        debug!(bytes = body.len(), cursor = ?cursor, "Received listing page");
        Ok(serde_json::from_slice(&body)?)
    }
}
