use std::time::Duration;

use reel_core::{Splash, SplashMsg, SplashState};
use reel_logging::{reel_info, reel_warn};

use crate::{insert_default_playlists, Dispatched, MovieRepository, StateContainer};

#[derive(Debug, Clone)]
pub struct SplashSettings {
    /// Minimum time the splash stays up after a successful bootstrap.
    pub splash_delay: Duration,
}

impl Default for SplashSettings {
    fn default() -> Self {
        Self {
            splash_delay: Duration::from_millis(1000),
        }
    }
}

/// First screen: prepares local playlists and the genre list.
pub struct SplashCoordinator {
    repository: MovieRepository,
    settings: SplashSettings,
    container: StateContainer<Splash>,
}

impl SplashCoordinator {
    pub fn new(repository: &MovieRepository, settings: SplashSettings) -> Self {
        Self {
            repository: repository.clone(),
            settings,
            container: StateContainer::new("splash", SplashState::default()),
        }
    }

    pub fn container(&self) -> &StateContainer<Splash> {
        &self.container
    }

    /// Runs the bootstrap. `MoveToNextScreen` follows the splash delay when
    /// genres loaded; a genre failure shows the error state instead.
    pub fn activate(&self) -> Dispatched {
        let repository = self.repository.clone();
        let delay = self.settings.splash_delay;
        self.container.dispatch(move |ctx| async move {
            ctx.apply(SplashMsg::ScreenOpened);

            let report = insert_default_playlists(repository.store().as_ref()).await;
            for (name, _) in report.failures {
                ctx.apply(SplashMsg::PlaylistInsertFailed(name));
            }
            ctx.apply(SplashMsg::PlaylistsKnown(report.playlists));

            match repository.fetch_genres().await {
                Ok(genres) => {
                    reel_info!("Splash bootstrap done, {} genres", genres.len());
                    repository.publish_genres(genres.clone());
                    ctx.apply(SplashMsg::GenresLoaded(genres));
                    tokio::time::sleep(delay).await;
                    ctx.apply(SplashMsg::DelayElapsed);
                }
                Err(err) => {
                    reel_warn!("Loading genres failed: {}", err);
                    ctx.apply(SplashMsg::GenresFailed(err));
                }
            }
        })
    }

    pub fn teardown(&self) {
        self.container.teardown();
    }
}
