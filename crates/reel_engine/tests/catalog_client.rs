use std::time::Duration;

use reel_core::{FailureKind, MediaKind};
use reel_engine::{CatalogApi, CatalogSettings, Feed, ReqwestCatalog};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog(server: &MockServer) -> ReqwestCatalog {
    catalog_with(server, CatalogSettings::default())
}

fn catalog_with(server: &MockServer, settings: CatalogSettings) -> ReqwestCatalog {
    ReqwestCatalog::new(CatalogSettings {
        base_url: format!("{}/3", server.uri()),
        api_key: "test-key".to_string(),
        ..settings
    })
    .expect("valid settings")
}

#[tokio::test]
async fn list_requests_page_and_maps_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/upcoming"))
        .and(query_param("page", "2"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 2,
            "total_pages": 3,
            "results": [
                { "id": 103, "title": "Dune", "poster_path": "/dune.jpg", "genre_ids": [878] },
                { "id": 104, "title": "Arrival" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = catalog(&server)
        .list(&Feed::Upcoming, 2)
        .await
        .expect("page ok");

    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 3);
    let ids: Vec<u64> = page.results.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![103, 104]);
    assert_eq!(page.results[0].title, "Dune");
    assert_eq!(page.results[0].poster_path.as_deref(), Some("/dune.jpg"));
    assert_eq!(page.results[0].genre_ids, vec![878]);
    assert_eq!(page.results[1].kind, MediaKind::Movie);
}

#[tokio::test]
async fn search_results_use_their_media_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/search/multi"))
        .and(query_param("query", "star wars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "total_pages": 1,
            "results": [
                { "id": 11, "media_type": "movie", "title": "Star Wars" },
                { "id": 1399, "media_type": "tv", "name": "Andor" },
                { "id": 2, "media_type": "person", "name": "Mark Hamill", "profile_path": "/mh.jpg" }
            ]
        })))
        .mount(&server)
        .await;

    let page = catalog(&server)
        .list(&Feed::Search("star wars".to_string()), 1)
        .await
        .expect("page ok");

    let kinds: Vec<MediaKind> = page.results.iter().map(|item| item.kind).collect();
    assert_eq!(kinds, vec![MediaKind::Movie, MediaKind::Tv, MediaKind::Person]);
    assert_eq!(page.results[1].title, "Andor");
    assert_eq!(page.results[2].poster_path.as_deref(), Some("/mh.jpg"));
}

#[tokio::test]
async fn details_and_credits_are_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/603"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 603,
            "title": "The Matrix",
            "overview": "A hacker learns the truth.",
            "tagline": "",
            "runtime": 136,
            "genres": [{ "id": 28, "name": "Action" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/movie/603/credits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cast": [{ "id": 6384, "name": "Keanu Reeves", "character": "Neo" }]
        })))
        .mount(&server)
        .await;

    let catalog = catalog(&server);
    let details = catalog.movie_details(603).await.expect("details ok");
    assert_eq!(details.title, "The Matrix");
    assert_eq!(details.runtime_minutes, Some(136));
    assert_eq!(details.tagline, None);
    assert_eq!(details.genres.len(), 1);

    let cast = catalog.movie_credits(603).await.expect("credits ok");
    assert_eq!(cast[0].name, "Keanu Reeves");
    assert_eq!(cast[0].character.as_deref(), Some("Neo"));
}

#[tokio::test]
async fn missing_movie_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = catalog(&server).movie_details(1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::NotFound);
}

#[tokio::test]
async fn list_reports_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/tv/top_rated"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = catalog(&server)
        .list(&Feed::TopRatedTv, 1)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert!(err.is_network());
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/genre/movie/list"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{ not json", "application/json"))
        .mount(&server)
        .await;

    let err = catalog(&server).movie_genres().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
    assert!(!err.is_network());
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    let body = format!(r#"{{"genres":[],"padding":"{}"}}"#, "x".repeat(256));
    Mock::given(method("GET"))
        .and(path("/3/genre/tv/list"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let catalog = catalog_with(
        &server,
        CatalogSettings {
            max_bytes: 64,
            ..CatalogSettings::default()
        },
    );
    let err = catalog.tv_genres().await.unwrap_err();
    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 64, .. }
    ));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/trending/tv/week"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "page": 1, "total_pages": 1, "results": [] }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let catalog = catalog_with(
        &server,
        CatalogSettings {
            request_timeout: Duration::from_millis(50),
            ..CatalogSettings::default()
        },
    );
    let err = catalog.list(&Feed::TrendingTv, 1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}
