use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reel_core::{CastMember, FailureKind, FetchError, Genre, MovieDetails, MovieId, PageToken};
use reel_logging::{reel_debug, reel_trace};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::dto::{CreditsResponse, DetailsResponse, GenresResponse, PagedResponse};
use crate::{CatalogApi, Feed, RemotePage};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub base_url: String,
    pub api_key: String,
    pub language: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            language: Some("en-US".to_string()),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// How a non-2xx status is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Collection,
    /// 404 means the record does not exist.
    Single,
}

/// HTTP+JSON catalog client.
#[derive(Debug, Clone)]
pub struct ReqwestCatalog {
    settings: CatalogSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestCatalog {
    pub fn new(settings: CatalogSettings) -> Result<Self, FetchError> {
        let base = parse_base_url(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, FetchError> {
        let mut url = self
            .base
            .join(path.trim_start_matches('/'))
            .map_err(|err| FetchError::new(FailureKind::InvalidRequest, err.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            if !self.settings.api_key.is_empty() {
                pairs.append_pair("api_key", &self.settings.api_key);
            }
            if let Some(language) = &self.settings.language {
                pairs.append_pair("language", language);
            }
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        lookup: Lookup,
    ) -> Result<T, FetchError> {
        let url = self.endpoint(path, query)?;
        reel_trace!("GET {}", path);

        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND && lookup == Lookup::Single {
            return Err(FetchError::new(FailureKind::NotFound, path));
        }
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }
        reel_debug!("GET {} -> {} ({} bytes)", path, status, body.len());

        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, format!("{path}: {err}")))
    }
}

#[async_trait]
impl CatalogApi for ReqwestCatalog {
    async fn list(&self, feed: &Feed, page: PageToken) -> Result<RemotePage, FetchError> {
        let mut query = feed.query();
        query.push(("page", page.to_string()));
        let response: PagedResponse = self
            .get_json(&feed.path(), &query, Lookup::Collection)
            .await?;
        Ok(response.into_remote_page(feed.default_kind()))
    }

    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails, FetchError> {
        let response: DetailsResponse = self
            .get_json(&format!("movie/{movie_id}"), &[], Lookup::Single)
            .await?;
        Ok(response.into())
    }

    async fn movie_credits(&self, movie_id: MovieId) -> Result<Vec<CastMember>, FetchError> {
        let response: CreditsResponse = self
            .get_json(&format!("movie/{movie_id}/credits"), &[], Lookup::Single)
            .await?;
        Ok(response.cast.into_iter().map(CastMember::from).collect())
    }

    async fn movie_genres(&self) -> Result<Vec<Genre>, FetchError> {
        let response: GenresResponse = self
            .get_json("genre/movie/list", &[], Lookup::Collection)
            .await?;
        Ok(response.genres.into_iter().map(Genre::from).collect())
    }

    async fn tv_genres(&self) -> Result<Vec<Genre>, FetchError> {
        let response: GenresResponse = self
            .get_json("genre/tv/list", &[], Lookup::Collection)
            .await?;
        Ok(response.genres.into_iter().map(Genre::from).collect())
    }
}

/// Base URL with a trailing slash, so relative joins keep its path.
fn parse_base_url(raw: &str) -> Result<Url, FetchError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|err| FetchError::new(FailureKind::InvalidRequest, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
