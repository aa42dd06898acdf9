use crate::{Feature, Playlist, PlaylistId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaylistState {
    pub playlists: Vec<Playlist>,
    pub selected: Option<PlaylistId>,
}

impl PlaylistState {
    pub fn any_has_items(&self) -> bool {
        self.playlists.iter().any(|playlist| !playlist.movies.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistMsg {
    PlaylistsChanged(Vec<Playlist>),
    PlaylistOpened(PlaylistId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistEffect {
    /// Playlists to show; empty when none of them holds a movie.
    UpdatePlaylist(Vec<Playlist>),
    NavigateToPlaylistDetails(PlaylistId),
}

pub struct PlaylistFeature;

impl Feature for PlaylistFeature {
    type State = PlaylistState;
    type Msg = PlaylistMsg;
    type Effect = PlaylistEffect;

    fn update(mut state: PlaylistState, msg: PlaylistMsg) -> (PlaylistState, Vec<PlaylistEffect>) {
        let effects = match msg {
            PlaylistMsg::PlaylistsChanged(playlists) => {
                state.playlists = playlists;
                let visible = if state.any_has_items() {
                    state.playlists.clone()
                } else {
                    Vec::new()
                };
                vec![PlaylistEffect::UpdatePlaylist(visible)]
            }
            PlaylistMsg::PlaylistOpened(playlist_id) => {
                state.selected = Some(playlist_id);
                vec![PlaylistEffect::NavigateToPlaylistDetails(playlist_id)]
            }
        };
        (state, effects)
    }
}
