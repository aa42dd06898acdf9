use crate::{
    FetchError, Feature, MovieDetails, MovieId, PlaylistId, RefreshStatus, ScreenPhase,
    ScrollPosition, ScrollState,
};

#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetailsState {
    pub movie_id: MovieId,
    pub phase: ScreenPhase,
    pub details: Option<MovieDetails>,
    pub recommendations_loading: bool,
    pub selector: PlaylistSelectorState,
    pub scroll: ScrollState,
}

impl MovieDetailsState {
    pub fn new(movie_id: MovieId) -> Self {
        Self {
            movie_id,
            phase: ScreenPhase::Loading,
            details: None,
            recommendations_loading: false,
            selector: PlaylistSelectorState::default(),
            scroll: ScrollState::default(),
        }
    }
}

/// Child state: which playlists the current movie belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaylistSelectorState {
    pub is_open: bool,
    pub choices: Vec<PlaylistChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistChoice {
    pub playlist_id: PlaylistId,
    pub name: String,
    pub is_added: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MovieDetailsMsg {
    LoadStarted,
    Loaded(MovieDetails),
    LoadFailed(FetchError),
    SelectorOpened(Vec<PlaylistChoice>),
    SelectorClosed,
    PlaylistToggled { playlist_id: PlaylistId, is_added: bool },
    StorageFailed(String),
    NavigateRequested(MovieId),
    RetryRequested,
    Activated,
    ScrollSaved(ScrollPosition),
    Recommendations(RefreshStatus),
}

impl From<RefreshStatus> for MovieDetailsMsg {
    fn from(status: RefreshStatus) -> Self {
        MovieDetailsMsg::Recommendations(status)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MovieDetailsEffect {
    ShowLoadingState,
    ShowMovieData(Box<MovieDetails>),
    ShowErrorState,
    OpenPlaylistSelector,
    TryReloadRecommendationsPage,
    NavigateToMovie(MovieId),
    RestoreScroll(ScrollPosition),
    ShowToast(String),
}

pub struct MovieDetailsFeature;

impl Feature for MovieDetailsFeature {
    type State = MovieDetailsState;
    type Msg = MovieDetailsMsg;
    type Effect = MovieDetailsEffect;

    fn update(
        mut state: MovieDetailsState,
        msg: MovieDetailsMsg,
    ) -> (MovieDetailsState, Vec<MovieDetailsEffect>) {
        let effects = match msg {
            MovieDetailsMsg::LoadStarted => {
                state.phase = ScreenPhase::Loading;
                vec![MovieDetailsEffect::ShowLoadingState]
            }
            MovieDetailsMsg::Loaded(details) => {
                state.phase = ScreenPhase::Ready;
                state.details = Some(details.clone());
                vec![MovieDetailsEffect::ShowMovieData(Box::new(details))]
            }
            MovieDetailsMsg::LoadFailed(_) => {
                state.phase = ScreenPhase::Error;
                vec![MovieDetailsEffect::ShowErrorState]
            }
            MovieDetailsMsg::SelectorOpened(choices) => {
                state.selector = PlaylistSelectorState {
                    is_open: true,
                    choices,
                };
                vec![MovieDetailsEffect::OpenPlaylistSelector]
            }
            MovieDetailsMsg::SelectorClosed => {
                state.selector = PlaylistSelectorState::default();
                Vec::new()
            }
            MovieDetailsMsg::PlaylistToggled {
                playlist_id,
                is_added,
            } => {
                if let Some(choice) = state
                    .selector
                    .choices
                    .iter_mut()
                    .find(|choice| choice.playlist_id == playlist_id)
                {
                    choice.is_added = is_added;
                }
                Vec::new()
            }
            MovieDetailsMsg::StorageFailed(message) => vec![MovieDetailsEffect::ShowToast(message)],
            MovieDetailsMsg::NavigateRequested(movie_id) => {
                vec![MovieDetailsEffect::NavigateToMovie(movie_id)]
            }
            MovieDetailsMsg::RetryRequested => vec![MovieDetailsEffect::TryReloadRecommendationsPage],
            MovieDetailsMsg::Activated => {
                state.scroll.arm();
                Vec::new()
            }
            MovieDetailsMsg::ScrollSaved(position) => {
                state.scroll.save(position);
                Vec::new()
            }
            MovieDetailsMsg::Recommendations(status) => {
                state.recommendations_loading = status == RefreshStatus::Loading;
                state
                    .scroll
                    .on_refresh(&status)
                    .map(MovieDetailsEffect::RestoreScroll)
                    .into_iter()
                    .collect()
            }
        };
        (state, effects)
    }
}
