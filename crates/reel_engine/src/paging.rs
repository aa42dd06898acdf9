use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use reel_core::{PageRequest, PagingSnapshot};
use reel_logging::{reel_debug, reel_warn};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::PageFetcher;

/// Growing list fed by repeated page fetches.
///
/// Observers get the latest snapshot through `subscribe`. At most one fetch
/// per direction is in flight; results that arrive after a refresh, clear
/// or cancel are discarded. A fetch whose future is dropped puts its
/// direction back to `NotLoading`.
pub struct PagingStream<T> {
    label: String,
    fetcher: Mutex<Arc<dyn PageFetcher<T>>>,
    snapshot: watch::Sender<PagingSnapshot<T>>,
    cancel: Mutex<CancellationToken>,
}

impl<T> PagingStream<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(label: impl Into<String>, fetcher: Arc<dyn PageFetcher<T>>) -> Self {
        let (snapshot, _) = watch::channel(PagingSnapshot::new());
        Self {
            label: label.into(),
            fetcher: Mutex::new(fetcher),
            snapshot,
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PagingSnapshot<T>> {
        self.snapshot.subscribe()
    }

    pub fn snapshot(&self) -> PagingSnapshot<T> {
        self.snapshot.borrow().clone()
    }

    /// Fetches the page after the last one. Returns `false` without fetching
    /// when a fetch is already loading, either direction has failed, or the
    /// feed ended.
    pub async fn load_next(&self) -> bool {
        match self.begin(PagingSnapshot::begin_append) {
            Some(request) => {
                self.run(request).await;
                true
            }
            None => false,
        }
    }

    /// Re-issues the failed fetch with the token it used.
    pub async fn retry(&self) -> bool {
        match self.begin(PagingSnapshot::begin_retry) {
            Some(request) => {
                reel_debug!("{}: retrying page {:?}", self.label, request.token);
                self.run(request).await;
                true
            }
            None => false,
        }
    }

    /// Drops everything and fetches the first page again.
    pub async fn refresh(&self) {
        if let Some(request) = self.begin(|snapshot| Some(snapshot.begin_refresh())) {
            reel_debug!("{}: refresh", self.label);
            self.run(request).await;
        }
    }

    /// Switches to another source, then refreshes.
    pub async fn refresh_with(&self, fetcher: Arc<dyn PageFetcher<T>>) {
        *lock(&self.fetcher) = fetcher;
        self.refresh().await;
    }

    /// Empty, idle snapshot.
    pub fn clear(&self) {
        self.snapshot.send_modify(PagingSnapshot::clear);
    }

    /// Cancels every fetch in flight. Later calls start with a fresh token.
    pub fn cancel(&self) {
        let mut token = lock(&self.cancel);
        token.cancel();
        *token = CancellationToken::new();
        reel_debug!("{}: in-flight fetches cancelled", self.label);
    }

    fn begin(
        &self,
        start: impl FnOnce(&mut PagingSnapshot<T>) -> Option<PageRequest>,
    ) -> Option<PageRequest> {
        let mut request = None;
        self.snapshot.send_if_modified(|snapshot| {
            request = start(snapshot);
            request.is_some()
        });
        request
    }

    async fn run(&self, request: PageRequest) {
        let fetcher = lock(&self.fetcher).clone();
        let cancel = lock(&self.cancel).clone();
        let mut in_flight = InFlight {
            snapshot: &self.snapshot,
            request,
            settled: false,
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            result = fetcher.fetch(request.token) => result,
        };

        if let Err(err) = &result {
            reel_warn!(
                "{}: {:?} page {:?} failed: {}",
                self.label,
                request.direction,
                request.token,
                err
            );
        }
        in_flight.settled = true;
        let applied = self
            .snapshot
            .send_if_modified(|snapshot| snapshot.complete(request, result));
        if !applied {
            reel_debug!("{}: stale page {:?} dropped", self.label, request.token);
        }
    }
}

/// Puts an unfinished request's direction back to `NotLoading` on drop.
struct InFlight<'a, T> {
    snapshot: &'a watch::Sender<PagingSnapshot<T>>,
    request: PageRequest,
    settled: bool,
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if !self.settled {
            let request = self.request;
            self.snapshot
                .send_if_modified(|snapshot| snapshot.cancel(request));
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
