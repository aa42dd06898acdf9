use std::sync::Arc;

use reel_core::{MediaItem, MovieId, ScrollPosition, Upcoming, UpcomingMsg, UpcomingState};

use crate::{Dispatched, Feed, MovieRepository, PagingStream, StateContainer};

use super::PagedScreen;

/// Carousel of upcoming movies.
pub struct UpcomingCoordinator {
    screen: PagedScreen<Upcoming>,
}

impl UpcomingCoordinator {
    pub fn new(repository: &MovieRepository) -> Self {
        let container = StateContainer::new("upcoming", UpcomingState::default());
        let paging = PagingStream::new("upcoming", repository.feed(Feed::Upcoming));
        Self {
            screen: PagedScreen::new(container, paging),
        }
    }

    pub fn container(&self) -> &StateContainer<Upcoming> {
        &self.screen.container
    }

    pub fn paging(&self) -> &Arc<PagingStream<MediaItem>> {
        &self.screen.paging
    }

    pub fn activate(&self) {
        self.screen.activate(UpcomingMsg::Activated, true);
    }

    pub fn deactivate(&self, scroll: ScrollPosition) {
        self.screen.deactivate(UpcomingMsg::ScrollSaved(scroll));
    }

    pub fn teardown(&self) {
        self.screen.teardown();
    }

    pub async fn load_more(&self) -> bool {
        self.screen.paging.load_next().await
    }

    pub async fn retry_page(&self) -> bool {
        self.screen.container.apply(UpcomingMsg::RetryRequested);
        self.screen.paging.retry().await
    }

    pub fn set_current_page(&self, page: usize) -> Dispatched {
        self.screen.container.apply(UpcomingMsg::PageChanged(page))
    }

    pub fn select_movie(&self, movie_id: MovieId) -> Dispatched {
        self.screen
            .container
            .apply(UpcomingMsg::MovieSelected(movie_id))
    }

    pub fn set_scroll_position(&self, index: usize, offset: i32) -> Dispatched {
        self.screen
            .container
            .apply(UpcomingMsg::ScrollSaved(ScrollPosition::new(index, offset)))
    }
}
