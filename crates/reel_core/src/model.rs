//! Records fetched from the remote catalog and kept in the local store.

pub type MovieId = u64;
pub type PlaylistId = u64;

/// Name of the playlist every installation starts with for movies.
pub const FAVOURITE_MOVIES: &str = "Favourite movies";
/// Name of the playlist every installation starts with for TV series.
pub const FAVOURITE_TV_SERIES: &str = "Favourite TV series";
/// Playlists created on first launch, in insertion order.
pub const DEFAULT_PLAYLISTS: [&str; 2] = [FAVOURITE_MOVIES, FAVOURITE_TV_SERIES];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Movie,
    Tv,
    Person,
}

/// One entry of a paged list: movie, TV show, or search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub id: u64,
    pub kind: MediaKind,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: f32,
    pub genre_ids: Vec<u32>,
}

impl MediaItem {
    /// Minimal item, mostly useful for fakes.
    pub fn new(id: u64, kind: MediaKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            vote_average: 0.0,
            genre_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetails {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub tagline: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub release_date: Option<String>,
    pub vote_average: f32,
    pub genres: Vec<Genre>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub cast: Vec<CastMember>,
}

impl MovieDetails {
    pub fn with_cast(mut self, cast: Vec<CastMember>) -> Self {
        self.cast = cast;
        self
    }

    /// Projection stored in playlists.
    pub fn to_saved(&self) -> SavedMovie {
        SavedMovie {
            id: self.id,
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
        }
    }
}

/// Movie as remembered by a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedMovie {
    pub id: MovieId,
    pub title: String,
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub movies: Vec<SavedMovie>,
}

impl Playlist {
    pub fn contains(&self, movie_id: MovieId) -> bool {
        self.movies.iter().any(|movie| movie.id == movie_id)
    }
}
