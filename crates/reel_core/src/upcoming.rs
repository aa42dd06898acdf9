use crate::{Feature, MovieId, RefreshStatus, ScreenPhase, ScrollPosition, ScrollState};

/// Upcoming-movies carousel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpcomingState {
    pub phase: ScreenPhase,
    pub current_page: usize,
    pub item_count: usize,
    pub selected_movie: Option<MovieId>,
    pub scroll: ScrollState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpcomingMsg {
    Activated,
    ScrollSaved(ScrollPosition),
    Refresh(RefreshStatus),
    PageChanged(usize),
    MovieSelected(MovieId),
    RetryRequested,
}

impl From<RefreshStatus> for UpcomingMsg {
    fn from(status: RefreshStatus) -> Self {
        UpcomingMsg::Refresh(status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpcomingEffect {
    NavigateToMovieDetails(MovieId),
    TryReloadPage,
    RestoreScroll(ScrollPosition),
    ShowErrorState,
}

pub struct Upcoming;

impl Feature for Upcoming {
    type State = UpcomingState;
    type Msg = UpcomingMsg;
    type Effect = UpcomingEffect;

    fn update(mut state: UpcomingState, msg: UpcomingMsg) -> (UpcomingState, Vec<UpcomingEffect>) {
        let effects = match msg {
            UpcomingMsg::Activated => {
                state.scroll.arm();
                Vec::new()
            }
            UpcomingMsg::ScrollSaved(position) => {
                state.scroll.save(position);
                state.current_page = position.index;
                Vec::new()
            }
            UpcomingMsg::Refresh(status) => {
                let mut effects = Vec::new();
                match &status {
                    RefreshStatus::Idle => {}
                    RefreshStatus::Loading => state.phase = ScreenPhase::Loading,
                    RefreshStatus::Settled { item_count } => {
                        state.phase = ScreenPhase::Ready;
                        state.item_count = *item_count;
                    }
                    RefreshStatus::Failed(_) => {
                        state.phase = ScreenPhase::Error;
                        effects.push(UpcomingEffect::ShowErrorState);
                    }
                }
                if let Some(position) = state.scroll.on_refresh(&status) {
                    state.current_page = position.index;
                    effects.push(UpcomingEffect::RestoreScroll(position));
                }
                effects
            }
            UpcomingMsg::PageChanged(page) => {
                state.current_page = page;
                Vec::new()
            }
            UpcomingMsg::MovieSelected(movie_id) => {
                state.selected_movie = Some(movie_id);
                vec![UpcomingEffect::NavigateToMovieDetails(movie_id)]
            }
            UpcomingMsg::RetryRequested => vec![UpcomingEffect::TryReloadPage],
        };
        (state, effects)
    }
}
