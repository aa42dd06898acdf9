use async_trait::async_trait;
use reel_core::{CastMember, FetchError, Genre, MediaItem, MediaKind, MovieDetails, MovieId, PageToken};

/// A paged list endpoint of the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Feed {
    Discover,
    Upcoming,
    TrendingTv,
    TopRatedTv,
    Search(String),
    Recommendations(MovieId),
}

impl Feed {
    pub fn path(&self) -> String {
        match self {
            Feed::Discover => "discover/movie".to_string(),
            Feed::Upcoming => "movie/upcoming".to_string(),
            Feed::TrendingTv => "trending/tv/week".to_string(),
            Feed::TopRatedTv => "tv/top_rated".to_string(),
            Feed::Search(_) => "search/multi".to_string(),
            Feed::Recommendations(movie_id) => format!("movie/{movie_id}/recommendations"),
        }
    }

    /// Feed-specific query parameters, excluding `page` and credentials.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Feed::Discover => vec![
                ("sort_by", "popularity.desc".to_string()),
                ("include_adult", "true".to_string()),
                ("include_video", "true".to_string()),
            ],
            Feed::Search(query) => vec![("query", query.clone())],
            Feed::Upcoming | Feed::TrendingTv | Feed::TopRatedTv | Feed::Recommendations(_) => {
                Vec::new()
            }
        }
    }

    /// Kind assumed for results that do not state their own.
    pub fn default_kind(&self) -> MediaKind {
        match self {
            Feed::TrendingTv | Feed::TopRatedTv => MediaKind::Tv,
            Feed::Discover | Feed::Upcoming | Feed::Search(_) | Feed::Recommendations(_) => {
                MediaKind::Movie
            }
        }
    }
}

/// One page as reported by the remote side.
#[derive(Debug, Clone, PartialEq)]
pub struct RemotePage {
    pub page: u32,
    pub total_pages: u32,
    pub results: Vec<MediaItem>,
}

#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list(&self, feed: &Feed, page: PageToken) -> Result<RemotePage, FetchError>;

    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails, FetchError>;

    async fn movie_credits(&self, movie_id: MovieId) -> Result<Vec<CastMember>, FetchError>;

    async fn movie_genres(&self) -> Result<Vec<Genre>, FetchError>;

    async fn tv_genres(&self) -> Result<Vec<Genre>, FetchError>;
}
