use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use reel_core::{MovieId, Playlist, PlaylistId, SavedMovie};
use reel_logging::{reel_error, reel_info};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{watch, Mutex};

use crate::SnapshotFile;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize playlists: {0}")]
    Serialize(String),
    #[error("failed to parse {path:?}: {message}")]
    Deserialize { path: PathBuf, message: String },
    #[error("unknown playlist {0}")]
    UnknownPlaylist(PlaylistId),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(PlaylistId),
    /// A playlist with that name was already stored.
    AlreadyExists(PlaylistId),
}

impl InsertOutcome {
    pub fn id(self) -> PlaylistId {
        match self {
            InsertOutcome::Inserted(id) | InsertOutcome::AlreadyExists(id) => id,
        }
    }
}

/// Local playlist persistence shared by every screen.
///
/// Each write is atomic for the record it touches. Playlist names are
/// unique: inserting an existing name reports the stored id instead of
/// creating a second playlist.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    async fn playlists(&self) -> Result<Vec<Playlist>, StorageError>;

    async fn insert_playlist(&self, name: &str) -> Result<InsertOutcome, StorageError>;

    /// Adds or replaces `movie` in the playlist.
    async fn add_movie(&self, playlist_id: PlaylistId, movie: SavedMovie)
        -> Result<(), StorageError>;

    async fn remove_movie(
        &self,
        playlist_id: PlaylistId,
        movie_id: MovieId,
    ) -> Result<(), StorageError>;

    /// `false` for unknown playlists.
    async fn is_added_to_playlist(
        &self,
        movie_id: MovieId,
        playlist_id: PlaylistId,
    ) -> Result<bool, StorageError>;

    /// Latest list of playlists, updated after every change.
    fn subscribe(&self) -> watch::Receiver<Vec<Playlist>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Records {
    next_id: PlaylistId,
    playlists: BTreeMap<PlaylistId, Playlist>,
}

impl Default for Records {
    fn default() -> Self {
        Self {
            next_id: 1,
            playlists: BTreeMap::new(),
        }
    }
}

impl Records {
    fn list(&self) -> Vec<Playlist> {
        self.playlists.values().cloned().collect()
    }

    fn playlist_mut(&mut self, playlist_id: PlaylistId) -> Result<&mut Playlist, StorageError> {
        self.playlists
            .get_mut(&playlist_id)
            .ok_or(StorageError::UnknownPlaylist(playlist_id))
    }
}

/// In-memory store, optionally mirrored to a snapshot file.
///
/// Writers queue on an async lock; file IO runs on the blocking pool.
pub struct MemoryPlaylistStore {
    records: Mutex<Records>,
    changes: watch::Sender<Vec<Playlist>>,
    snapshot: Option<SnapshotFile>,
}

impl Default for MemoryPlaylistStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPlaylistStore {
    pub fn new() -> Self {
        Self::with_records(Records::default(), None)
    }

    /// Loads playlists from `file` (if present) and saves every change to it.
    pub async fn open(file: SnapshotFile) -> Result<Self, StorageError> {
        let source = file.clone();
        let stored = blocking(move || source.load::<StoredPlaylists>()).await?;
        let records = stored.map(Records::from).unwrap_or_default();
        reel_info!(
            "Loaded {} playlists from {:?}",
            records.playlists.len(),
            file.path()
        );
        Ok(Self::with_records(records, Some(file)))
    }

    fn with_records(records: Records, snapshot: Option<SnapshotFile>) -> Self {
        let (changes, _) = watch::channel(records.list());
        Self {
            records: Mutex::new(records),
            changes,
            snapshot,
        }
    }

    async fn read<R>(&self, view: impl FnOnce(&Records) -> R + Send) -> R {
        view(&*self.records.lock().await)
    }

    /// Applies `change` to a copy, persists it, and only then commits it.
    async fn write<R: Send>(
        &self,
        change: impl FnOnce(&mut Records) -> Result<R, StorageError> + Send,
    ) -> Result<R, StorageError> {
        let mut records = self.records.lock().await;
        let mut next = records.clone();
        let result = change(&mut next)?;
        if next == *records {
            return Ok(result);
        }
        if let Some(file) = &self.snapshot {
            let target = file.clone();
            let stored = StoredPlaylists::from(&next);
            if let Err(err) = blocking(move || target.save(&stored)).await {
                reel_error!("Failed to write playlists to {:?}: {}", file.path(), err);
                return Err(err);
            }
        }
        *records = next;
        let playlists = records.list();
        drop(records);
        self.changes.send_replace(playlists);
        Ok(result)
    }
}

#[async_trait]
impl PlaylistStore for MemoryPlaylistStore {
    async fn playlists(&self) -> Result<Vec<Playlist>, StorageError> {
        Ok(self.read(Records::list).await)
    }

    async fn insert_playlist(&self, name: &str) -> Result<InsertOutcome, StorageError> {
        self.write(move |records| {
            if let Some(existing) = records.playlists.values().find(|p| p.name == name) {
                return Ok(InsertOutcome::AlreadyExists(existing.id));
            }
            let id = records.next_id;
            records.next_id += 1;
            records.playlists.insert(
                id,
                Playlist {
                    id,
                    name: name.to_string(),
                    movies: Vec::new(),
                },
            );
            Ok(InsertOutcome::Inserted(id))
        })
        .await
    }

    async fn add_movie(
        &self,
        playlist_id: PlaylistId,
        movie: SavedMovie,
    ) -> Result<(), StorageError> {
        self.write(move |records| {
            let playlist = records.playlist_mut(playlist_id)?;
            match playlist.movies.iter_mut().find(|saved| saved.id == movie.id) {
                Some(saved) => *saved = movie,
                None => playlist.movies.push(movie),
            }
            Ok(())
        })
        .await
    }

    async fn remove_movie(
        &self,
        playlist_id: PlaylistId,
        movie_id: MovieId,
    ) -> Result<(), StorageError> {
        self.write(move |records| {
            records
                .playlist_mut(playlist_id)?
                .movies
                .retain(|saved| saved.id != movie_id);
            Ok(())
        })
        .await
    }

    async fn is_added_to_playlist(
        &self,
        movie_id: MovieId,
        playlist_id: PlaylistId,
    ) -> Result<bool, StorageError> {
        Ok(self
            .read(|records| {
                records
                    .playlists
                    .get(&playlist_id)
                    .is_some_and(|playlist| playlist.contains(movie_id))
            })
            .await)
    }

    fn subscribe(&self) -> watch::Receiver<Vec<Playlist>> {
        self.changes.subscribe()
    }
}

/// Runs snapshot file IO on the blocking pool.
async fn blocking<R: Send + 'static>(
    io: impl FnOnce() -> Result<R, StorageError> + Send + 'static,
) -> Result<R, StorageError> {
    tokio::task::spawn_blocking(io)
        .await
        .map_err(|err| StorageError::Unavailable(format!("playlist file task failed: {err}")))?
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredMovie {
    id: MovieId,
    title: String,
    poster_path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredPlaylist {
    id: PlaylistId,
    name: String,
    movies: Vec<StoredMovie>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredPlaylists {
    next_id: PlaylistId,
    playlists: Vec<StoredPlaylist>,
}

impl From<&Records> for StoredPlaylists {
    fn from(records: &Records) -> Self {
        Self {
            next_id: records.next_id,
            playlists: records
                .playlists
                .values()
                .map(|playlist| StoredPlaylist {
                    id: playlist.id,
                    name: playlist.name.clone(),
                    movies: playlist
                        .movies
                        .iter()
                        .map(|movie| StoredMovie {
                            id: movie.id,
                            title: movie.title.clone(),
                            poster_path: movie.poster_path.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl From<StoredPlaylists> for Records {
    fn from(stored: StoredPlaylists) -> Self {
        let playlists: BTreeMap<_, _> = stored
            .playlists
            .into_iter()
            .map(|playlist| {
                let record = Playlist {
                    id: playlist.id,
                    name: playlist.name,
                    movies: playlist
                        .movies
                        .into_iter()
                        .map(|movie| SavedMovie {
                            id: movie.id,
                            title: movie.title,
                            poster_path: movie.poster_path,
                        })
                        .collect(),
                };
                (record.id, record)
            })
            .collect();
        let next_id = playlists
            .keys()
            .next_back()
            .map_or(1, |last| last + 1)
            .max(stored.next_id);
        Self { next_id, playlists }
    }
}
