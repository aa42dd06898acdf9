//! Reel core: domain records, the paging state machine, and one pure
//! update function per screen.
mod details;
mod error;
mod feature;
mod model;
mod paging;
mod playlist;
mod scroll;
mod search;
mod splash;
mod upcoming;

pub use details::{
    MovieDetailsEffect, MovieDetailsFeature, MovieDetailsMsg, MovieDetailsState, PlaylistChoice,
    PlaylistSelectorState,
};
pub use error::{FailureKind, FetchError};
pub use feature::{Feature, ScreenPhase};
pub use model::{
    CastMember, Genre, MediaItem, MediaKind, MovieDetails, MovieId, Playlist, PlaylistId,
    SavedMovie, DEFAULT_PLAYLISTS, FAVOURITE_MOVIES, FAVOURITE_TV_SERIES,
};
pub use paging::{
    next_page_token, Direction, LoadState, LoadStates, Page, PageRequest, PageToken,
    PagingSnapshot, RefreshStatus,
};
pub use playlist::{PlaylistEffect, PlaylistFeature, PlaylistMsg, PlaylistState};
pub use scroll::{ScrollPosition, ScrollState};
pub use search::{Search, SearchEffect, SearchMsg, SearchState};
pub use splash::{Splash, SplashEffect, SplashMsg, SplashState};
pub use upcoming::{Upcoming, UpcomingEffect, UpcomingMsg, UpcomingState};
