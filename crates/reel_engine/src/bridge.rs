//! Tasks that turn changes of a latest-value stream into intents.

use reel_core::{Feature, PagingSnapshot, RefreshStatus};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::StateContainer;

/// Applies `to_msg(project(value))` for the current value and for every
/// change whose projection differs from the previous one, until `cancel`
/// fires or the source closes.
pub fn spawn_watch_bridge<V, M, F>(
    mut source: watch::Receiver<V>,
    container: StateContainer<F>,
    cancel: CancellationToken,
    project: impl Fn(&V) -> M + Send + 'static,
    to_msg: impl Fn(M) -> F::Msg + Send + 'static,
) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
    M: PartialEq + Clone + Send + 'static,
    F: Feature + 'static,
{
    tokio::spawn(async move {
        let mut last: Option<M> = None;
        loop {
            let current = project(&source.borrow_and_update());
            if last.as_ref() != Some(&current) {
                last = Some(current.clone());
                container.apply(to_msg(current));
            }
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                changed = source.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
    })
}

/// Feeds a paging stream's refresh status into a feature.
pub fn spawn_refresh_bridge<F, T>(
    source: watch::Receiver<PagingSnapshot<T>>,
    container: StateContainer<F>,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    F: Feature + 'static,
    F::Msg: From<RefreshStatus>,
    T: Send + Sync + 'static,
{
    spawn_watch_bridge(
        source,
        container,
        cancel,
        PagingSnapshot::refresh_status,
        <F::Msg as From<RefreshStatus>>::from,
    )
}
