use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use reel_core::{MediaItem, ScreenPhase, SplashEffect};
use reel_engine::{
    MemoryPlaylistStore, MovieRepository, PlaylistCoordinator, ReqwestCatalog, SnapshotFile,
    SplashCoordinator, UpcomingCoordinator,
};
use reel_logging::{reel_info, reel_warn};

use super::config::{self, API_KEY_ENV};
use super::effects::{describe_playlists, describe_splash, describe_upcoming, spawn_printer};
use super::logging;

/// Longest wait for the first page of a feed.
const FIRST_PAGE_TIMEOUT: Duration = Duration::from_secs(60);

pub async fn run_app() -> anyhow::Result<()> {
    let path = config::config_path(std::env::args());
    let loaded = config::load(&path);
    let config = loaded
        .config
        .with_api_key_override(std::env::var(API_KEY_ENV).ok());

    logging::initialize(config.log_destination, config.level());
    if let Some(problem) = loaded.problem {
        reel_warn!("{}; using defaults", problem);
    }
    if config.api_key.is_empty() {
        reel_warn!("No API key configured; set {} or api_key in {:?}", API_KEY_ENV, path);
    }

    let catalog = ReqwestCatalog::new(config.catalog_settings())
        .context("invalid catalog settings")?;
    let store = MemoryPlaylistStore::open(SnapshotFile::new(&config.playlist_file))
        .await
        .with_context(|| format!("cannot open playlists at {:?}", config.playlist_file))?;
    let repository = MovieRepository::new(Arc::new(catalog), Arc::new(store));

    run_splash(&repository, &config).await?;
    show_playlists(&repository).await;
    show_upcoming(&repository, config.upcoming_pages).await?;
    Ok(())
}

async fn run_splash(repository: &MovieRepository, config: &config::AppConfig) -> anyhow::Result<()> {
    let splash = SplashCoordinator::new(repository, config.splash_settings());
    let mut effects = splash.container().subscribe_effects();
    println!("Starting up...");

    let completed = splash.activate().completed().await;
    let state = splash.container().current_state();
    splash.teardown();

    for name in &state.failed_playlists {
        println!("Could not create playlist {name:?}");
    }
    let mut moved_on = false;
    while let Ok(effect) = effects.try_recv() {
        println!("[splash] {}", describe_splash(&effect));
        moved_on |= effect == SplashEffect::MoveToNextScreen;
    }
    if !completed || !moved_on {
        bail!("startup failed ({:?})", state.phase);
    }
    reel_info!(
        "Splash done: {} playlists, {} genres",
        state.playlists.len(),
        state.genres.len()
    );
    Ok(())
}

async fn show_playlists(repository: &MovieRepository) {
    let playlists = PlaylistCoordinator::new(repository);
    let printer = spawn_printer(
        "playlists",
        playlists.container().subscribe_effects(),
        describe_playlists,
    );
    playlists.activate();
    let mut state = playlists.container().subscribe_state();
    let _ = tokio::time::timeout(
        Duration::from_secs(1),
        state.wait_for(|state| !state.playlists.is_empty()),
    )
    .await;
    // Let the printer drain the first update before the screen goes away.
    tokio::task::yield_now().await;
    playlists.teardown();
    printer.abort();
}

async fn show_upcoming(repository: &MovieRepository, pages: u32) -> anyhow::Result<()> {
    let upcoming = UpcomingCoordinator::new(repository);
    let printer = spawn_printer(
        "upcoming",
        upcoming.container().subscribe_effects(),
        describe_upcoming,
    );
    upcoming.activate();

    let mut state = upcoming.container().subscribe_state();
    let phase = tokio::time::timeout(
        FIRST_PAGE_TIMEOUT,
        state.wait_for(|state| state.phase != ScreenPhase::Loading),
    )
    .await
    .context("upcoming movies did not load in time")?
    .context("upcoming screen closed")?
    .phase;

    if phase == ScreenPhase::Error {
        // One retry, as a user pressing the retry button would.
        upcoming.retry_page().await;
    }
    for _ in 1..pages {
        if !upcoming.load_more().await {
            break;
        }
    }

    let snapshot = upcoming.paging().snapshot();
    if let Some(err) = snapshot.load_states().refresh.error() {
        upcoming.teardown();
        printer.abort();
        bail!("upcoming movies unavailable: {err}");
    }
    println!("Upcoming movies:");
    for item in snapshot.items() {
        println!("{}", format_item(repository, item));
    }

    upcoming.teardown();
    printer.abort();
    Ok(())
}

fn format_item(repository: &MovieRepository, item: &MediaItem) -> String {
    let genres = repository.genre_names(&item.genre_ids);
    let mut line = format!("  {:>8}  {}", item.id, item.title);
    if let Some(date) = &item.release_date {
        line.push_str(&format!(" ({date})"));
    }
    if !genres.is_empty() {
        line.push_str(&format!(" [{}]", genres.join(", ")));
    }
    line
}
