use crate::app::ports::ListingPort;
use crate::catalog::title::parse_title;
use crate::error::{CensusError, Result};
use crate::matrix::CatalogIndex;
use crate::metrics::FetchMetrics;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Counters gathered over one complete fetch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FetchStats {
    pub pages: usize,
    pub titles_seen: usize,
    pub titles_matched: usize,
    pub titles_skipped: usize,
}

/// Result of walking the whole catalog
#[derive(Debug)]
pub struct FetchOutcome {
    pub index: CatalogIndex,
    pub stats: FetchStats,
}

/// Walks the paginated listing until it reports no further page.
pub struct CatalogFetcher<'a> {
    port: &'a dyn ListingPort,
    max_pages: Option<usize>,
}

impl<'a> CatalogFetcher<'a> {
    pub fn new(port: &'a dyn ListingPort) -> Self {
        Self { port, max_pages: None }
    }

    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetch every page and index the parsable titles.
    ///
    /// A page without an offset ends the walk successfully. Transport, status and
    /// decoding failures are returned as errors and the partial index is dropped.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<FetchOutcome> {
        let mut index = CatalogIndex::new();
        let mut stats = FetchStats::default();
        let mut cursor: Option<String> = None;

        loop {
            if let Some(max) = self.max_pages {
                if stats.pages >= max {
                    FetchMetrics::record_error();
                    return Err(CensusError::Api {
                        message: format!("catalog still had pages after the {} page limit", max),
                    });
                }
            }

            let started = Instant::now();
            let page = match self.port.fetch_page(cursor.as_deref()).await {
                Ok(page) => page,
                Err(e) => {
                    FetchMetrics::record_error();
                    warn!(page = stats.pages + 1, cursor = ?cursor, "Listing request failed: {}", e);
                    return Err(e);
                }
            };
            stats.pages += 1;

            let items = page.items.len();
            let mut matched = 0;
            for item in page.items {
                match parse_title(&item.title) {
                    Some(entry) => {
                        index.record(entry);
                        matched += 1;
                    }
                    None => debug!(title = %item.title, "Skipping title without origin"),
                }
            }
            stats.titles_seen += items;
            stats.titles_matched += matched;
            stats.titles_skipped += items - matched;
            FetchMetrics::record_page(items, matched, items - matched, started.elapsed().as_secs_f64());
            debug!(page = stats.pages, items, matched, "Indexed listing page");

            match page.offset.filter(|next| !next.is_empty()) {
                Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                    FetchMetrics::record_error();
                    return Err(CensusError::Api {
                        message: format!("listing returned the same offset '{}' twice", next),
                    });
                }
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        info!(
            pages = stats.pages,
            characters = index.entity_count(),
            universes = index.origin_count(),
            skipped = stats.titles_skipped,
            "Catalog fetch complete"
        );
        Ok(FetchOutcome { index, stats })
    }
}
