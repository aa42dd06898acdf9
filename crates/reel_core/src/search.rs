use crate::{Feature, MediaKind, RefreshStatus, ScreenPhase, ScrollPosition, ScrollState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    /// Query whose results are currently on screen.
    pub saved_query: String,
    pub is_loading: bool,
    pub result_count: usize,
    pub phase: ScreenPhase,
    pub scroll: ScrollState,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            saved_query: String::new(),
            is_loading: false,
            result_count: 0,
            phase: ScreenPhase::Ready,
            scroll: ScrollState::default(),
        }
    }
}

impl SearchState {
    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMsg {
    QueryChanged(String),
    Results(RefreshStatus),
    ItemSelected { id: u64, kind: MediaKind },
    RetryRequested,
    Activated,
    ScrollSaved(ScrollPosition),
}

impl From<RefreshStatus> for SearchMsg {
    fn from(status: RefreshStatus) -> Self {
        SearchMsg::Results(status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEffect {
    TryReloadPage,
    SetIsLoading(bool),
    SetSavedQuery(String),
    NavigateToMovie(u64),
    NavigateToTvSeries(u64),
    NavigateToPersonDetails(u64),
    RestoreScroll(ScrollPosition),
    ShowErrorState,
}

pub struct Search;

impl Feature for Search {
    type State = SearchState;
    type Msg = SearchMsg;
    type Effect = SearchEffect;

    fn update(mut state: SearchState, msg: SearchMsg) -> (SearchState, Vec<SearchEffect>) {
        let effects = match msg {
            SearchMsg::QueryChanged(query) => {
                state.query = query;
                if !state.has_query() {
                    state.result_count = 0;
                    state.phase = ScreenPhase::Ready;
                }
                Vec::new()
            }
            SearchMsg::Results(status) => apply_results(&mut state, status),
            SearchMsg::ItemSelected { id, kind } => vec![match kind {
                MediaKind::Movie => SearchEffect::NavigateToMovie(id),
                MediaKind::Tv => SearchEffect::NavigateToTvSeries(id),
                MediaKind::Person => SearchEffect::NavigateToPersonDetails(id),
            }],
            SearchMsg::RetryRequested => vec![SearchEffect::TryReloadPage],
            SearchMsg::Activated => {
                state.scroll.arm();
                Vec::new()
            }
            SearchMsg::ScrollSaved(position) => {
                state.scroll.save(position);
                Vec::new()
            }
        };
        (state, effects)
    }
}

fn apply_results(state: &mut SearchState, status: RefreshStatus) -> Vec<SearchEffect> {
    let mut effects = Vec::new();
    let was_loading = state.is_loading;
    state.is_loading = status == RefreshStatus::Loading;
    if was_loading != state.is_loading {
        effects.push(SearchEffect::SetIsLoading(state.is_loading));
    }

    match &status {
        RefreshStatus::Idle => state.result_count = 0,
        RefreshStatus::Loading => state.phase = ScreenPhase::Loading,
        RefreshStatus::Settled { item_count } => {
            state.phase = ScreenPhase::Ready;
            state.result_count = *item_count;
            state.saved_query = state.query.clone();
            effects.push(SearchEffect::SetSavedQuery(state.saved_query.clone()));
        }
        RefreshStatus::Failed(_) => {
            state.phase = ScreenPhase::Error;
            effects.push(SearchEffect::ShowErrorState);
        }
    }

    if let Some(position) = state.scroll.on_refresh(&status) {
        effects.push(SearchEffect::RestoreScroll(position));
    }
    effects
}
