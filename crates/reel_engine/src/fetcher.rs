use std::sync::Arc;

use async_trait::async_trait;
use reel_core::{FetchError, MediaItem, Page, PageToken};
use reel_logging::reel_trace;

use crate::{CatalogApi, Feed};

/// Performs one remote fetch per call. `None` asks for the first page.
///
/// Implementations never retry; every fault comes back as `Err`.
#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    async fn fetch(&self, token: Option<PageToken>) -> Result<Page<T>, FetchError>;
}

/// Page fetcher over one paged catalog feed.
pub struct FeedFetcher {
    api: Arc<dyn CatalogApi>,
    feed: Feed,
}

impl FeedFetcher {
    pub fn new(api: Arc<dyn CatalogApi>, feed: Feed) -> Self {
        Self { api, feed }
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }
}

#[async_trait]
impl PageFetcher<MediaItem> for FeedFetcher {
    async fn fetch(&self, token: Option<PageToken>) -> Result<Page<MediaItem>, FetchError> {
        let page = token.unwrap_or(1);
        reel_trace!("fetching {:?} page {}", self.feed, page);
        let remote = self.api.list(&self.feed, page).await?;
        Ok(Page::forward(remote.results, remote.page, remote.total_pages))
    }
}
