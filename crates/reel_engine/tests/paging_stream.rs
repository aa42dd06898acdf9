use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use reel_core::{FailureKind, FetchError, LoadState, Page, PageToken, RefreshStatus};
use reel_engine::{PageFetcher, PagingStream};
use tokio::sync::Semaphore;

/// Replays scripted results in order and records the tokens it was asked
/// for. With a gate, each fetch waits for one permit before answering.
struct ScriptedFetcher {
    responses: Mutex<VecDeque<Result<Page<u64>, FetchError>>>,
    tokens: Mutex<Vec<Option<PageToken>>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedFetcher {
    fn new(responses: Vec<Result<Page<u64>, FetchError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            tokens: Mutex::new(Vec::new()),
            gate: None,
        })
    }

    fn gated(
        responses: Vec<Result<Page<u64>, FetchError>>,
        permits: usize,
    ) -> (Arc<Self>, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(permits));
        let fetcher = Arc::new(Self {
            responses: Mutex::new(responses.into()),
            tokens: Mutex::new(Vec::new()),
            gate: Some(gate.clone()),
        });
        (fetcher, gate)
    }

    fn tokens(&self) -> Vec<Option<PageToken>> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher<u64> for ScriptedFetcher {
    async fn fetch(&self, token: Option<PageToken>) -> Result<Page<u64>, FetchError> {
        self.tokens.lock().unwrap().push(token);
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(FetchError::new(FailureKind::NotFound, "script exhausted")))
    }
}

fn page(ids: &[u64], page: u32, total_pages: u32) -> Result<Page<u64>, FetchError> {
    Ok(Page::forward(ids.to_vec(), page, total_pages))
}

fn network_error() -> Result<Page<u64>, FetchError> {
    Err(FetchError::new(FailureKind::Network, "connection reset"))
}

fn stream_over(fetcher: &Arc<ScriptedFetcher>) -> Arc<PagingStream<u64>> {
    Arc::new(PagingStream::new(
        "test",
        fetcher.clone() as Arc<dyn PageFetcher<u64>>,
    ))
}

#[tokio::test]
async fn two_loads_concatenate_pages_and_keep_next_token() {
    reel_logging::initialize_for_tests();
    let fetcher = ScriptedFetcher::new(vec![page(&[101, 102], 1, 3), page(&[103, 104], 2, 3)]);
    let stream = stream_over(&fetcher);

    assert!(stream.load_next().await);
    assert!(stream.load_next().await);

    let snapshot = stream.snapshot();
    assert_eq!(snapshot.items(), &[101, 102, 103, 104]);
    assert_eq!(snapshot.load_states().append, LoadState::NotLoading);
    assert_eq!(snapshot.next_token(), Some(3));
    assert_eq!(fetcher.tokens(), vec![None, Some(2)]);
}

#[tokio::test]
async fn length_matches_fetched_pages_until_the_feed_ends() {
    let fetcher = ScriptedFetcher::new(vec![
        page(&[1, 2, 3], 1, 3),
        page(&[], 2, 3),
        page(&[4], 3, 3),
    ]);
    let stream = stream_over(&fetcher);

    let mut loads = 0;
    while stream.load_next().await {
        loads += 1;
    }

    let snapshot = stream.snapshot();
    assert_eq!(loads, 3);
    assert_eq!(snapshot.len(), 4);
    assert_eq!(snapshot.next_token(), None);
    assert!(snapshot.end_reached());
    assert_eq!(fetcher.tokens(), vec![None, Some(2), Some(3)]);
}

#[tokio::test]
async fn failed_refresh_is_recovered_only_through_retry() {
    let fetcher = ScriptedFetcher::new(vec![
        network_error(),
        page(&[101, 102], 1, 2),
        page(&[103], 2, 2),
    ]);
    let stream = stream_over(&fetcher);

    stream.refresh().await;
    assert!(!stream.load_next().await);
    assert!(stream.snapshot().is_empty());

    assert!(stream.retry().await);
    let snapshot = stream.snapshot();
    assert_eq!(snapshot.items(), &[101, 102]);
    assert_eq!(snapshot.refresh_status(), RefreshStatus::Settled { item_count: 2 });
    assert!(!stream.retry().await);

    assert!(stream.load_next().await);
    assert_eq!(stream.snapshot().items(), &[101, 102, 103]);
    assert_eq!(fetcher.tokens(), vec![None, None, Some(2)]);
}

#[tokio::test]
async fn retry_reissues_the_failed_token() {
    let (fetcher, gate) = ScriptedFetcher::gated(
        vec![page(&[1, 2], 1, 3), network_error(), page(&[3, 4], 2, 3)],
        2,
    );
    let stream = stream_over(&fetcher);
    let mut updates = stream.subscribe();

    assert!(stream.load_next().await);
    assert!(stream.load_next().await);
    let failed = stream.snapshot();
    assert!(matches!(failed.load_states().append, LoadState::Error(_)));
    assert_eq!(failed.items(), &[1, 2]);

    // Appending again is refused until the failure is retried.
    assert!(!stream.load_next().await);

    let retry = tokio::spawn({
        let stream = stream.clone();
        async move { stream.retry().await }
    });
    updates
        .wait_for(|snapshot| snapshot.load_states().append.is_loading())
        .await
        .unwrap();
    gate.add_permits(1);
    assert!(retry.await.unwrap());

    let snapshot = stream.snapshot();
    assert_eq!(snapshot.load_states().append, LoadState::NotLoading);
    assert_eq!(snapshot.items(), &[1, 2, 3, 4]);
    assert_eq!(fetcher.tokens(), vec![None, Some(2), Some(2)]);
}

#[tokio::test]
async fn retry_without_failure_does_nothing() {
    let fetcher = ScriptedFetcher::new(vec![page(&[1], 1, 2)]);
    let stream = stream_over(&fetcher);
    stream.load_next().await;

    assert!(!stream.retry().await);
    assert_eq!(fetcher.tokens(), vec![None]);
}

#[tokio::test]
async fn refresh_empties_the_list_before_the_first_page_lands() {
    let (fetcher, gate) = ScriptedFetcher::gated(
        vec![page(&[1, 2], 1, 2), page(&[3], 2, 2), page(&[9], 1, 1)],
        2,
    );
    let stream = stream_over(&fetcher);
    stream.load_next().await;
    stream.load_next().await;
    assert_eq!(stream.snapshot().len(), 3);

    let mut updates = stream.subscribe();
    let refresh = tokio::spawn({
        let stream = stream.clone();
        async move { stream.refresh().await }
    });
    let loading = updates
        .wait_for(|snapshot| snapshot.refresh_status() == RefreshStatus::Loading)
        .await
        .unwrap()
        .clone();
    assert!(loading.is_empty());

    gate.add_permits(1);
    refresh.await.unwrap();

    let snapshot = stream.snapshot();
    assert_eq!(snapshot.items(), &[9]);
    assert_eq!(snapshot.refresh_status(), RefreshStatus::Settled { item_count: 1 });
    assert_eq!(fetcher.tokens(), vec![None, Some(2), None]);
}

#[tokio::test]
async fn load_next_is_a_no_op_while_a_fetch_is_in_flight() {
    let (fetcher, gate) = ScriptedFetcher::gated(vec![page(&[1], 1, 5)], 0);
    let stream = stream_over(&fetcher);
    let mut updates = stream.subscribe();

    let first = tokio::spawn({
        let stream = stream.clone();
        async move { stream.load_next().await }
    });
    updates
        .wait_for(|snapshot| snapshot.load_states().append.is_loading())
        .await
        .unwrap();

    assert!(!stream.load_next().await);

    gate.add_permits(1);
    assert!(first.await.unwrap());
    assert_eq!(fetcher.tokens(), vec![None]);
    assert_eq!(stream.snapshot().items(), &[1]);
}

#[tokio::test]
async fn cancel_puts_the_direction_back_to_not_loading() {
    let (fetcher, _gate) = ScriptedFetcher::gated(vec![page(&[1], 1, 5)], 0);
    let stream = stream_over(&fetcher);
    let mut updates = stream.subscribe();

    let pending = tokio::spawn({
        let stream = stream.clone();
        async move { stream.load_next().await }
    });
    updates
        .wait_for(|snapshot| snapshot.load_states().append.is_loading())
        .await
        .unwrap();

    stream.cancel();
    pending.await.unwrap();

    let snapshot = stream.snapshot();
    assert_eq!(snapshot.load_states().append, LoadState::NotLoading);
    assert!(snapshot.is_empty());
}

#[tokio::test]
async fn dropping_a_pending_load_does_not_leave_it_loading() {
    let (fetcher, _gate) = ScriptedFetcher::gated(vec![page(&[1], 1, 5)], 0);
    let stream = stream_over(&fetcher);

    let outcome = tokio::time::timeout(Duration::from_millis(20), stream.load_next()).await;
    assert!(outcome.is_err());
    assert_eq!(stream.snapshot().load_states().append, LoadState::NotLoading);
}

#[tokio::test]
async fn results_of_a_replaced_source_are_dropped() {
    let (old, old_gate) = ScriptedFetcher::gated(vec![page(&[1, 2], 1, 1)], 0);
    let stream = stream_over(&old);
    let mut updates = stream.subscribe();

    let stale = tokio::spawn({
        let stream = stream.clone();
        async move { stream.load_next().await }
    });
    updates
        .wait_for(|snapshot| snapshot.load_states().append.is_loading())
        .await
        .unwrap();

    let new = ScriptedFetcher::new(vec![page(&[7, 8], 1, 1)]);
    stream
        .refresh_with(new.clone() as Arc<dyn PageFetcher<u64>>)
        .await;

    old_gate.add_permits(1);
    stale.await.unwrap();

    let snapshot = stream.snapshot();
    assert_eq!(snapshot.items(), &[7, 8]);
    assert_eq!(snapshot.load_states().append, LoadState::NotLoading);
}

#[tokio::test]
async fn clear_resets_to_an_idle_empty_list() {
    let fetcher = ScriptedFetcher::new(vec![page(&[1, 2], 1, 2), page(&[5], 1, 1)]);
    let stream = stream_over(&fetcher);
    stream.load_next().await;

    stream.clear();
    let snapshot = stream.snapshot();
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.refresh_status(), RefreshStatus::Idle);
    assert_eq!(snapshot.next_token(), None);

    // Next load starts from the first page again.
    assert!(stream.load_next().await);
    assert_eq!(fetcher.tokens(), vec![None, None]);
}

#[tokio::test]
async fn late_subscribers_see_the_latest_snapshot() {
    let fetcher = ScriptedFetcher::new(vec![page(&[1, 2], 1, 3)]);
    let stream = stream_over(&fetcher);
    stream.load_next().await;

    let late = stream.subscribe();
    assert_eq!(late.borrow().items(), &[1, 2]);
}
