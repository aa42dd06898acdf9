//! One coordinator per screen: a state container, an optional paging
//! stream, and the intents the boundary layer calls.

mod details;
mod playlist;
mod search;
mod splash;
mod upcoming;

use std::sync::{Arc, Mutex, PoisonError};

use reel_core::{Feature, MediaItem, RefreshStatus};
use tokio_util::sync::CancellationToken;

use crate::{spawn_refresh_bridge, PagingStream, StateContainer};

pub use details::MovieDetailsCoordinator;
pub use playlist::PlaylistCoordinator;
pub use search::SearchCoordinator;
pub use splash::{SplashCoordinator, SplashSettings};
pub use upcoming::UpcomingCoordinator;

/// Token of the current activation; replaced on every `start`.
#[derive(Default)]
struct Activation {
    current: Mutex<Option<CancellationToken>>,
}

impl Activation {
    fn start(&self, parent: &CancellationToken) -> CancellationToken {
        let token = parent.child_token();
        let previous = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }
        token
    }

    fn stop(&self) {
        let current = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(token) = current {
            token.cancel();
        }
    }
}

/// A feature whose screen shows one paged list.
struct PagedScreen<F: Feature> {
    container: StateContainer<F>,
    paging: Arc<PagingStream<MediaItem>>,
    activation: Activation,
}

impl<F> PagedScreen<F>
where
    F: Feature + 'static,
    F::Msg: From<RefreshStatus>,
{
    fn new(container: StateContainer<F>, paging: PagingStream<MediaItem>) -> Self {
        Self {
            container,
            paging: Arc::new(paging),
            activation: Activation::default(),
        }
    }

    /// Arms scroll restore, then follows the list's refresh status. A list
    /// that never loaded is refreshed when `load_if_empty` is set.
    ///
    /// Returns the token of this activation, or `None` after teardown.
    fn activate(&self, activated: F::Msg, load_if_empty: bool) -> Option<CancellationToken> {
        if self.container.is_torn_down() {
            return None;
        }
        self.container.apply(activated);
        let token = self.activation.start(&self.container.cancellation());
        spawn_refresh_bridge(self.paging.subscribe(), self.container.clone(), token.clone());

        let snapshot = self.paging.snapshot();
        if load_if_empty && snapshot.refresh_status() == RefreshStatus::Idle {
            let paging = self.paging.clone();
            tokio::spawn(async move { paging.refresh().await });
        }
        Some(token)
    }

    /// Stores the scroll position and stops every task of this activation.
    fn deactivate(&self, scroll_saved: F::Msg) {
        self.container.apply(scroll_saved);
        self.activation.stop();
        self.paging.cancel();
    }

    fn teardown(&self) {
        self.activation.stop();
        self.paging.cancel();
        self.container.teardown();
    }
}
