use std::fmt::Debug;

use reel_core::{PlaylistEffect, SplashEffect, UpcomingEffect};
use reel_logging::{reel_debug, reel_warn};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

/// Prints every effect the receiver yields until its container goes away.
pub fn spawn_printer<E>(
    label: &'static str,
    mut effects: broadcast::Receiver<E>,
    describe: fn(&E) -> String,
) -> JoinHandle<()>
where
    E: Clone + Debug + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            match effects.recv().await {
                Ok(effect) => {
                    reel_debug!("{}: {:?}", label, effect);
                    println!("[{label}] {}", describe(&effect));
                }
                Err(RecvError::Lagged(skipped)) => {
                    reel_warn!("{}: {} effects skipped", label, skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

pub fn describe_splash(effect: &SplashEffect) -> String {
    match effect {
        SplashEffect::MoveToNextScreen => "ready".to_string(),
        SplashEffect::ShowErrorState => "could not reach the catalog".to_string(),
    }
}

pub fn describe_upcoming(effect: &UpcomingEffect) -> String {
    match effect {
        UpcomingEffect::NavigateToMovieDetails(id) => format!("open movie {id}"),
        UpcomingEffect::TryReloadPage => "retrying page".to_string(),
        UpcomingEffect::RestoreScroll(position) => {
            format!("scroll to item {} ({}px)", position.index, position.offset)
        }
        UpcomingEffect::ShowErrorState => "upcoming movies unavailable".to_string(),
    }
}

pub fn describe_playlists(effect: &PlaylistEffect) -> String {
    match effect {
        PlaylistEffect::UpdatePlaylist(playlists) if playlists.is_empty() => {
            "no saved movies yet".to_string()
        }
        PlaylistEffect::UpdatePlaylist(playlists) => playlists
            .iter()
            .map(|playlist| format!("{} ({})", playlist.name, playlist.movies.len()))
            .collect::<Vec<_>>()
            .join(", "),
        PlaylistEffect::NavigateToPlaylistDetails(id) => format!("open playlist {id}"),
    }
}
