use std::sync::Arc;

use reel_core::{
    MediaItem, MovieDetailsFeature, MovieDetailsMsg, MovieDetailsState, MovieId, PlaylistChoice,
    PlaylistId, ScrollPosition,
};
use reel_logging::{reel_debug, reel_warn};

use crate::{Dispatched, Feed, MovieRepository, PagingStream, StateContainer};

use super::PagedScreen;

/// Detail screen of one movie: details with cast, recommendations and
/// playlist membership.
pub struct MovieDetailsCoordinator {
    movie_id: MovieId,
    repository: MovieRepository,
    screen: PagedScreen<MovieDetailsFeature>,
}

impl MovieDetailsCoordinator {
    pub fn new(repository: &MovieRepository, movie_id: MovieId) -> Self {
        let container = StateContainer::new("movie_details", MovieDetailsState::new(movie_id));
        let paging = PagingStream::new(
            format!("recommendations/{movie_id}"),
            repository.feed(Feed::Recommendations(movie_id)),
        );
        Self {
            movie_id,
            repository: repository.clone(),
            screen: PagedScreen::new(container, paging),
        }
    }

    pub fn movie_id(&self) -> MovieId {
        self.movie_id
    }

    pub fn container(&self) -> &StateContainer<MovieDetailsFeature> {
        &self.screen.container
    }

    pub fn recommendations(&self) -> &Arc<PagingStream<MediaItem>> {
        &self.screen.paging
    }

    pub fn activate(&self) {
        self.screen.activate(MovieDetailsMsg::Activated, true);
    }

    pub fn deactivate(&self, scroll: ScrollPosition) {
        self.screen.deactivate(MovieDetailsMsg::ScrollSaved(scroll));
    }

    pub fn teardown(&self) {
        self.screen.teardown();
    }

    /// Details and cast in one go; a failure of either puts the screen in
    /// its error phase.
    pub fn load(&self) -> Dispatched {
        let repository = self.repository.clone();
        let movie_id = self.movie_id;
        self.screen.container.dispatch(move |ctx| async move {
            ctx.apply(MovieDetailsMsg::LoadStarted);
            match repository.movie_with_cast(movie_id).await {
                Ok(details) => ctx.apply(MovieDetailsMsg::Loaded(details)),
                Err(err) => {
                    reel_warn!("Loading movie {} failed: {}", movie_id, err);
                    ctx.apply(MovieDetailsMsg::LoadFailed(err));
                }
            }
        })
    }

    pub fn open_playlist_selector(&self) -> Dispatched {
        let repository = self.repository.clone();
        let movie_id = self.movie_id;
        self.screen.container.dispatch(move |ctx| async move {
            let store = repository.store();
            let playlists = match store.playlists().await {
                Ok(playlists) => playlists,
                Err(err) => {
                    ctx.apply(MovieDetailsMsg::StorageFailed(err.to_string()));
                    return;
                }
            };
            let mut choices = Vec::with_capacity(playlists.len());
            for playlist in playlists {
                let is_added = match store.is_added_to_playlist(movie_id, playlist.id).await {
                    Ok(is_added) => is_added,
                    Err(err) => {
                        ctx.apply(MovieDetailsMsg::StorageFailed(err.to_string()));
                        return;
                    }
                };
                choices.push(PlaylistChoice {
                    playlist_id: playlist.id,
                    name: playlist.name,
                    is_added,
                });
            }
            ctx.apply(MovieDetailsMsg::SelectorOpened(choices));
        })
    }

    /// Adds the movie to the playlist, or removes it when already there.
    pub fn select_playlist(&self, playlist_id: PlaylistId) -> Dispatched {
        let repository = self.repository.clone();
        let movie_id = self.movie_id;
        self.screen.container.dispatch(move |ctx| async move {
            let Some(details) = ctx.state().details else {
                ctx.apply(MovieDetailsMsg::StorageFailed(
                    "movie details are not loaded yet".to_string(),
                ));
                return;
            };
            let store = repository.store();
            let toggled = match store.is_added_to_playlist(movie_id, playlist_id).await {
                Ok(true) => store
                    .remove_movie(playlist_id, movie_id)
                    .await
                    .map(|()| false),
                Ok(false) => store
                    .add_movie(playlist_id, details.to_saved())
                    .await
                    .map(|()| true),
                Err(err) => Err(err),
            };
            match toggled {
                Ok(is_added) => {
                    reel_debug!(
                        "Movie {} {} playlist {}",
                        movie_id,
                        if is_added { "added to" } else { "removed from" },
                        playlist_id
                    );
                    ctx.apply(MovieDetailsMsg::PlaylistToggled {
                        playlist_id,
                        is_added,
                    });
                }
                Err(err) => ctx.apply(MovieDetailsMsg::StorageFailed(err.to_string())),
            }
        })
    }

    pub fn close_playlist_selector(&self) -> Dispatched {
        self.screen.container.apply(MovieDetailsMsg::SelectorClosed)
    }

    pub fn navigate_to_movie(&self, movie_id: MovieId) -> Dispatched {
        self.screen
            .container
            .apply(MovieDetailsMsg::NavigateRequested(movie_id))
    }

    pub async fn load_more(&self) -> bool {
        self.screen.paging.load_next().await
    }

    pub async fn retry_page(&self) -> bool {
        self.screen.container.apply(MovieDetailsMsg::RetryRequested);
        self.screen.paging.retry().await
    }

    pub fn set_scroll_position(&self, index: usize, offset: i32) -> Dispatched {
        self.screen
            .container
            .apply(MovieDetailsMsg::ScrollSaved(ScrollPosition::new(index, offset)))
    }
}
