//! Wire shapes of the catalog API. Kept private; everything leaving the
//! client is a `reel_core` record.

use reel_core::{CastMember, Genre, MediaItem, MediaKind, MovieDetails};
use serde::Deserialize;

use crate::RemotePage;

#[derive(Debug, Deserialize)]
pub(crate) struct PagedResponse {
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub results: Vec<ItemDto>,
}

impl PagedResponse {
    pub(crate) fn into_remote_page(self, fallback: MediaKind) -> RemotePage {
        RemotePage {
            page: self.page,
            total_pages: self.total_pages,
            results: self
                .results
                .into_iter()
                .map(|item| item.into_item(fallback))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemDto {
    id: u64,
    title: Option<String>,
    name: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    profile_path: Option<String>,
    backdrop_path: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    #[serde(default)]
    vote_average: f32,
    #[serde(default)]
    genre_ids: Vec<u32>,
    media_type: Option<String>,
}

impl ItemDto {
    fn into_item(self, fallback: MediaKind) -> MediaItem {
        let kind = match self.media_type.as_deref() {
            Some("movie") => MediaKind::Movie,
            Some("tv") => MediaKind::Tv,
            Some("person") => MediaKind::Person,
            _ => fallback,
        };
        MediaItem {
            id: self.id,
            kind,
            title: self.title.or(self.name).unwrap_or_default(),
            overview: self.overview.unwrap_or_default(),
            poster_path: self.poster_path.or(self.profile_path),
            backdrop_path: self.backdrop_path,
            release_date: self.release_date.or(self.first_air_date),
            vote_average: self.vote_average,
            genre_ids: self.genre_ids,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenreDto {
    id: u32,
    name: String,
}

impl From<GenreDto> for Genre {
    fn from(dto: GenreDto) -> Self {
        Genre {
            id: dto.id,
            name: dto.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenresResponse {
    #[serde(default)]
    pub genres: Vec<GenreDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    id: u64,
    #[serde(default)]
    title: String,
    overview: Option<String>,
    tagline: Option<String>,
    runtime: Option<u32>,
    release_date: Option<String>,
    #[serde(default)]
    vote_average: f32,
    #[serde(default)]
    genres: Vec<GenreDto>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
}

impl From<DetailsResponse> for MovieDetails {
    fn from(dto: DetailsResponse) -> Self {
        MovieDetails {
            id: dto.id,
            title: dto.title,
            overview: dto.overview.unwrap_or_default(),
            tagline: dto.tagline.filter(|tagline| !tagline.is_empty()),
            runtime_minutes: dto.runtime,
            release_date: dto.release_date,
            vote_average: dto.vote_average,
            genres: dto.genres.into_iter().map(Genre::from).collect(),
            poster_path: dto.poster_path,
            backdrop_path: dto.backdrop_path,
            cast: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreditsResponse {
    #[serde(default)]
    pub cast: Vec<CastDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CastDto {
    id: u64,
    name: String,
    character: Option<String>,
    profile_path: Option<String>,
}

impl From<CastDto> for CastMember {
    fn from(dto: CastDto) -> Self {
        CastMember {
            id: dto.id,
            name: dto.name,
            character: dto.character,
            profile_path: dto.profile_path,
        }
    }
}
