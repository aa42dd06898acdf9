use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use reel_core::{MovieId, Playlist, PlaylistId, SavedMovie, DEFAULT_PLAYLISTS, FAVOURITE_MOVIES};
use reel_engine::{
    insert_default_playlists, InsertOutcome, MemoryPlaylistStore, PlaylistStore, StorageError,
};
use tokio::sync::watch;

async fn seeded(names: &[&str]) -> MemoryPlaylistStore {
    let store = MemoryPlaylistStore::new();
    for name in names {
        store.insert_playlist(name).await.unwrap();
    }
    store
}

async fn names(store: &dyn PlaylistStore) -> Vec<String> {
    let mut names: Vec<String> = store
        .playlists()
        .await
        .unwrap()
        .into_iter()
        .map(|playlist| playlist.name)
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn running_twice_keeps_one_playlist_per_default_name() {
    reel_logging::initialize_for_tests();
    let seeds: [&[&str]; 3] = [&[], &[FAVOURITE_MOVIES], &DEFAULT_PLAYLISTS];
    let mut expected: Vec<String> = DEFAULT_PLAYLISTS.iter().map(|n| n.to_string()).collect();
    expected.sort();

    for seed in seeds {
        let store = seeded(seed).await;

        let first = insert_default_playlists(&store).await;
        let second = insert_default_playlists(&store).await;

        assert!(first.is_complete());
        assert_eq!(first.inserted.len(), DEFAULT_PLAYLISTS.len() - seed.len());
        assert!(second.inserted.is_empty());
        assert_eq!(second.playlists.len(), DEFAULT_PLAYLISTS.len());
        assert_eq!(names(&store).await, expected);
    }
}

#[tokio::test]
async fn concurrent_runs_do_not_duplicate() {
    let store = Arc::new(MemoryPlaylistStore::new());

    let (a, b) = tokio::join!(
        insert_default_playlists(store.as_ref()),
        insert_default_playlists(store.as_ref())
    );

    assert!(a.is_complete() && b.is_complete());
    assert_eq!(a.inserted.len() + b.inserted.len(), DEFAULT_PLAYLISTS.len());
    assert_eq!(store.playlists().await.unwrap().len(), DEFAULT_PLAYLISTS.len());
}

/// Store whose inserts fail for one name.
struct RejectingStore {
    inner: MemoryPlaylistStore,
    rejected: &'static str,
}

#[async_trait]
impl PlaylistStore for RejectingStore {
    async fn playlists(&self) -> Result<Vec<Playlist>, StorageError> {
        self.inner.playlists().await
    }

    async fn insert_playlist(&self, name: &str) -> Result<InsertOutcome, StorageError> {
        if name == self.rejected {
            return Err(StorageError::Unavailable("disk full".to_string()));
        }
        self.inner.insert_playlist(name).await
    }

    async fn add_movie(
        &self,
        playlist_id: PlaylistId,
        movie: SavedMovie,
    ) -> Result<(), StorageError> {
        self.inner.add_movie(playlist_id, movie).await
    }

    async fn remove_movie(
        &self,
        playlist_id: PlaylistId,
        movie_id: MovieId,
    ) -> Result<(), StorageError> {
        self.inner.remove_movie(playlist_id, movie_id).await
    }

    async fn is_added_to_playlist(
        &self,
        movie_id: MovieId,
        playlist_id: PlaylistId,
    ) -> Result<bool, StorageError> {
        self.inner.is_added_to_playlist(movie_id, playlist_id).await
    }

    fn subscribe(&self) -> watch::Receiver<Vec<Playlist>> {
        self.inner.subscribe()
    }
}

#[tokio::test]
async fn a_failed_insert_does_not_stop_the_others() {
    let store = RejectingStore {
        inner: MemoryPlaylistStore::new(),
        rejected: FAVOURITE_MOVIES,
    };

    let report = insert_default_playlists(&store).await;

    assert!(!report.is_complete());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, FAVOURITE_MOVIES);
    assert_eq!(report.inserted, vec![DEFAULT_PLAYLISTS[1].to_string()]);
    assert_eq!(names(&store).await, vec![DEFAULT_PLAYLISTS[1].to_string()]);
}
