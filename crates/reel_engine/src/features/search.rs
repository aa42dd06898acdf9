use std::sync::Arc;

use reel_core::{
    MediaItem, MediaKind, RefreshStatus, ScrollPosition, Search, SearchMsg, SearchState,
};
use reel_logging::reel_debug;

use crate::{Dispatched, Feed, MovieRepository, PagingStream, StateContainer};

use super::PagedScreen;

/// Multi-search over movies, TV series and people.
pub struct SearchCoordinator {
    repository: MovieRepository,
    screen: PagedScreen<Search>,
}

impl SearchCoordinator {
    pub fn new(repository: &MovieRepository) -> Self {
        let container = StateContainer::new("search", SearchState::default());
        let paging = PagingStream::new("search", repository.feed(Feed::Search(String::new())));
        Self {
            repository: repository.clone(),
            screen: PagedScreen::new(container, paging),
        }
    }

    pub fn container(&self) -> &StateContainer<Search> {
        &self.screen.container
    }

    pub fn results(&self) -> &Arc<PagingStream<MediaItem>> {
        &self.screen.paging
    }

    /// Results are loaded by `search`. A query whose results were cancelled
    /// by an earlier deactivation is searched again.
    pub fn activate(&self) {
        let Some(token) = self.screen.activate(SearchMsg::Activated, false) else {
            return;
        };
        let paging = self.screen.paging.clone();
        let repository = self.repository.clone();
        self.screen.container.dispatch(move |ctx| async move {
            let query = ctx.state().query.trim().to_string();
            if query.is_empty() || paging.snapshot().refresh_status() != RefreshStatus::Idle {
                return;
            }
            reel_debug!("search: reloading {:?}", query);
            tokio::spawn(async move {
                tokio::select! {
                    _ = token.cancelled() => {}
                    _ = paging.refresh_with(repository.feed(Feed::Search(query))) => {}
                }
            });
        });
    }

    pub fn deactivate(&self, scroll: ScrollPosition) {
        self.screen.deactivate(SearchMsg::ScrollSaved(scroll));
    }

    pub fn teardown(&self) {
        self.screen.teardown();
    }

    /// Replaces the results with the first page for `query`. A blank query
    /// empties the list instead. Results of an earlier query that land
    /// afterwards are dropped.
    pub async fn search(&self, query: &str) {
        self.screen
            .container
            .apply(SearchMsg::QueryChanged(query.to_string()));

        let query = query.trim();
        let paging = &self.screen.paging;
        if query.is_empty() {
            paging.cancel();
            paging.clear();
            return;
        }
        reel_debug!("search: {:?}", query);
        paging
            .refresh_with(self.repository.feed(Feed::Search(query.to_string())))
            .await;
    }

    pub fn select_item(&self, id: u64, kind: MediaKind) -> Dispatched {
        self.screen
            .container
            .apply(SearchMsg::ItemSelected { id, kind })
    }

    pub async fn load_more(&self) -> bool {
        self.screen.paging.load_next().await
    }

    pub async fn retry_page(&self) -> bool {
        self.screen.container.apply(SearchMsg::RetryRequested);
        self.screen.paging.retry().await
    }

    pub fn set_scroll_position(&self, index: usize, offset: i32) -> Dispatched {
        self.screen
            .container
            .apply(SearchMsg::ScrollSaved(ScrollPosition::new(index, offset)))
    }
}
