use std::sync::{Arc, PoisonError, RwLock};

use reel_core::{FetchError, Genre, MovieDetails, MovieId};
use reel_logging::reel_debug;

use crate::{CatalogApi, Feed, FeedFetcher, PlaylistStore};

/// Shared access to the remote catalog and the local playlist store.
///
/// One instance is built at startup and handed to every coordinator.
#[derive(Clone)]
pub struct MovieRepository {
    api: Arc<dyn CatalogApi>,
    store: Arc<dyn PlaylistStore>,
    genres: Arc<RwLock<Vec<Genre>>>,
}

impl MovieRepository {
    pub fn new(api: Arc<dyn CatalogApi>, store: Arc<dyn PlaylistStore>) -> Self {
        Self {
            api,
            store,
            genres: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn api(&self) -> &Arc<dyn CatalogApi> {
        &self.api
    }

    pub fn store(&self) -> &Arc<dyn PlaylistStore> {
        &self.store
    }

    pub fn feed(&self, feed: Feed) -> Arc<FeedFetcher> {
        Arc::new(FeedFetcher::new(self.api.clone(), feed))
    }

    /// Movie and TV genres, merged by id.
    pub async fn fetch_genres(&self) -> Result<Vec<Genre>, FetchError> {
        let (movie, tv) = tokio::join!(self.api.movie_genres(), self.api.tv_genres());
        let mut genres = movie?;
        for genre in tv? {
            if !genres.iter().any(|known| known.id == genre.id) {
                genres.push(genre);
            }
        }
        Ok(genres)
    }

    /// Genres published by the last successful `fetch_genres` caller.
    pub fn genres(&self) -> Vec<Genre> {
        self.genres
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn publish_genres(&self, genres: Vec<Genre>) {
        reel_debug!("{} genres cached", genres.len());
        *self.genres.write().unwrap_or_else(PoisonError::into_inner) = genres;
    }

    /// Names of `ids`, skipping unknown ones.
    pub fn genre_names(&self, ids: &[u32]) -> Vec<String> {
        let genres = self.genres.read().unwrap_or_else(PoisonError::into_inner);
        ids.iter()
            .filter_map(|id| genres.iter().find(|genre| genre.id == *id))
            .map(|genre| genre.name.clone())
            .collect()
    }

    /// Details and credits fetched concurrently.
    pub async fn movie_with_cast(&self, movie_id: MovieId) -> Result<MovieDetails, FetchError> {
        let (details, cast) = tokio::join!(
            self.api.movie_details(movie_id),
            self.api.movie_credits(movie_id)
        );
        Ok(details?.with_cast(cast?))
    }
}
