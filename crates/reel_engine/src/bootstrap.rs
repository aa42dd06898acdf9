use reel_core::{Playlist, DEFAULT_PLAYLISTS};
use reel_logging::{reel_info, reel_warn};

use crate::{InsertOutcome, PlaylistStore, StorageError};

/// Outcome of making sure the default playlists exist.
#[derive(Debug, Default)]
pub struct BootstrapReport {
    /// Playlists known after the run, in store order.
    pub playlists: Vec<Playlist>,
    /// Names created by this run.
    pub inserted: Vec<String>,
    /// Inserts that failed; the other defaults are unaffected.
    pub failures: Vec<(String, StorageError)>,
    /// Set when the final listing failed.
    pub list_error: Option<StorageError>,
}

impl BootstrapReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.list_error.is_none()
    }
}

/// Inserts every default playlist that is not stored yet.
///
/// Running it again, or after a partial run, never creates a duplicate.
pub async fn insert_default_playlists(store: &dyn PlaylistStore) -> BootstrapReport {
    let mut report = BootstrapReport::default();

    let existing = match store.playlists().await {
        Ok(playlists) => playlists,
        Err(err) => {
            reel_warn!("Could not list playlists before bootstrap: {}", err);
            Vec::new()
        }
    };

    for name in DEFAULT_PLAYLISTS {
        if existing.iter().any(|playlist| playlist.name == name) {
            continue;
        }
        match store.insert_playlist(name).await {
            Ok(InsertOutcome::Inserted(id)) => {
                reel_info!("Created playlist {:?} ({})", name, id);
                report.inserted.push(name.to_string());
            }
            Ok(InsertOutcome::AlreadyExists(_)) => {}
            Err(err) => {
                reel_warn!("Failed to create playlist {:?}: {}", name, err);
                report.failures.push((name.to_string(), err));
            }
        }
    }

    match store.playlists().await {
        Ok(playlists) => report.playlists = playlists,
        Err(err) => {
            reel_warn!("Could not list playlists after bootstrap: {}", err);
            report.list_error = Some(err);
        }
    }
    report
}
