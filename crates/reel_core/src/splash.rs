use crate::{FetchError, Feature, Genre, Playlist, ScreenPhase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplashState {
    pub is_screen_open: bool,
    pub phase: ScreenPhase,
    pub playlists: Vec<Playlist>,
    pub genres: Vec<Genre>,
    /// Default playlists whose insert failed during this bootstrap.
    pub failed_playlists: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplashMsg {
    ScreenOpened,
    PlaylistsKnown(Vec<Playlist>),
    PlaylistInsertFailed(String),
    GenresLoaded(Vec<Genre>),
    GenresFailed(FetchError),
    /// The minimum splash display time is over.
    DelayElapsed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplashEffect {
    MoveToNextScreen,
    ShowErrorState,
}

pub struct Splash;

impl Feature for Splash {
    type State = SplashState;
    type Msg = SplashMsg;
    type Effect = SplashEffect;

    fn update(mut state: SplashState, msg: SplashMsg) -> (SplashState, Vec<SplashEffect>) {
        let effects = match msg {
            SplashMsg::ScreenOpened => {
                state.is_screen_open = true;
                state.phase = ScreenPhase::Loading;
                Vec::new()
            }
            SplashMsg::PlaylistsKnown(playlists) => {
                for playlist in playlists {
                    if !state.playlists.iter().any(|known| known.id == playlist.id) {
                        state.playlists.push(playlist);
                    }
                }
                Vec::new()
            }
            SplashMsg::PlaylistInsertFailed(name) => {
                state.failed_playlists.push(name);
                Vec::new()
            }
            SplashMsg::GenresLoaded(genres) => {
                state.genres = genres;
                state.phase = ScreenPhase::Ready;
                Vec::new()
            }
            SplashMsg::GenresFailed(_) => {
                state.phase = ScreenPhase::Error;
                vec![SplashEffect::ShowErrorState]
            }
            SplashMsg::DelayElapsed => {
                if state.phase == ScreenPhase::Ready {
                    vec![SplashEffect::MoveToNextScreen]
                } else {
                    Vec::new()
                }
            }
        };
        (state, effects)
    }
}
