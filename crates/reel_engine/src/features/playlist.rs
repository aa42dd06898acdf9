use reel_core::{PlaylistFeature, PlaylistId, PlaylistMsg, PlaylistState};

use crate::{spawn_watch_bridge, Dispatched, MovieRepository, StateContainer};

use super::Activation;

/// Playlist overview, kept in sync with the store.
pub struct PlaylistCoordinator {
    repository: MovieRepository,
    container: StateContainer<PlaylistFeature>,
    activation: Activation,
}

impl PlaylistCoordinator {
    pub fn new(repository: &MovieRepository) -> Self {
        Self {
            repository: repository.clone(),
            container: StateContainer::new("playlists", PlaylistState::default()),
            activation: Activation::default(),
        }
    }

    pub fn container(&self) -> &StateContainer<PlaylistFeature> {
        &self.container
    }

    /// Publishes the stored playlists now and after every change.
    pub fn activate(&self) {
        if self.container.is_torn_down() {
            return;
        }
        let token = self.activation.start(&self.container.cancellation());
        spawn_watch_bridge(
            self.repository.store().subscribe(),
            self.container.clone(),
            token,
            Vec::clone,
            PlaylistMsg::PlaylistsChanged,
        );
    }

    pub fn deactivate(&self) {
        self.activation.stop();
    }

    pub fn teardown(&self) {
        self.activation.stop();
        self.container.teardown();
    }

    pub fn navigate_to_playlist_details(&self, playlist_id: PlaylistId) -> Dispatched {
        self.container.apply(PlaylistMsg::PlaylistOpened(playlist_id))
    }
}
