use pretty_assertions::assert_eq;
use reel_core::{
    next_page_token, Direction, FailureKind, FetchError, LoadState, Page, PagingSnapshot,
    RefreshStatus,
};

fn page(ids: &[u64], page: u32, total_pages: u32) -> Page<u64> {
    Page::forward(ids.to_vec(), page, total_pages)
}

fn network_error() -> FetchError {
    FetchError::new(FailureKind::Network, "connection reset")
}

#[test]
fn next_token_stops_after_total_pages() {
    assert_eq!(next_page_token(1, 3), Some(2));
    assert_eq!(next_page_token(2, 3), Some(3));
    assert_eq!(next_page_token(3, 3), None);
    assert_eq!(next_page_token(1, 0), None);
    assert_eq!(next_page_token(u32::MAX, u32::MAX), None);
}

#[test]
fn two_appends_concatenate_pages_in_fetch_order() {
    let mut snapshot = PagingSnapshot::new();

    let first = snapshot.begin_append().expect("first request");
    assert_eq!(first.token, None);
    assert!(snapshot.load_states().append.is_loading());
    assert!(snapshot.complete(first, Ok(page(&[101, 102], 1, 3))));

    let second = snapshot.begin_append().expect("second request");
    assert_eq!(second.token, Some(2));
    assert!(snapshot.complete(second, Ok(page(&[103, 104], 2, 3))));

    assert_eq!(snapshot.items(), &[101, 102, 103, 104]);
    assert_eq!(snapshot.load_states().append, LoadState::NotLoading);
    assert_eq!(snapshot.next_token(), Some(3));
    assert!(!snapshot.end_reached());
}

#[test]
fn append_is_rejected_while_loading() {
    let mut snapshot: PagingSnapshot<u64> = PagingSnapshot::new();
    assert!(snapshot.begin_append().is_some());
    assert!(snapshot.begin_append().is_none());

    let mut refreshing: PagingSnapshot<u64> = PagingSnapshot::new();
    refreshing.begin_refresh();
    assert!(refreshing.begin_append().is_none());
}

#[test]
fn last_page_ends_the_feed() {
    let mut snapshot = PagingSnapshot::new();
    let request = snapshot.begin_append().unwrap();
    snapshot.complete(request, Ok(page(&[1], 1, 1)));

    assert!(snapshot.end_reached());
    assert_eq!(snapshot.next_token(), None);
    assert!(snapshot.begin_append().is_none());
}

#[test]
fn empty_page_still_decides_next_token() {
    let mut snapshot: PagingSnapshot<u64> = PagingSnapshot::new();
    let request = snapshot.begin_append().unwrap();
    snapshot.complete(request, Ok(page(&[], 1, 2)));
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.next_token(), Some(2));

    let request = snapshot.begin_append().unwrap();
    snapshot.complete(request, Ok(page(&[], 2, 2)));
    assert!(snapshot.end_reached());
}

#[test]
fn failure_keeps_items_and_retry_reuses_token() {
    let mut snapshot = PagingSnapshot::new();
    let first = snapshot.begin_append().unwrap();
    snapshot.complete(first, Ok(page(&[1, 2], 1, 3)));

    let failing = snapshot.begin_append().unwrap();
    snapshot.complete(failing, Err(network_error()));
    assert_eq!(snapshot.items(), &[1, 2]);
    assert_eq!(
        snapshot.load_states().append,
        LoadState::Error(network_error())
    );
    assert!(snapshot.begin_append().is_none(), "append waits for retry");

    let retry = snapshot.begin_retry().expect("retry request");
    assert_eq!(retry.token, failing.token);
    assert_eq!(retry.direction, Direction::Append);
    assert!(snapshot.load_states().append.is_loading());

    snapshot.complete(retry, Ok(page(&[3, 4], 2, 3)));
    assert_eq!(snapshot.items(), &[1, 2, 3, 4]);
    assert_eq!(snapshot.load_states().append, LoadState::NotLoading);
}

#[test]
fn retry_without_failure_is_rejected() {
    let mut snapshot: PagingSnapshot<u64> = PagingSnapshot::new();
    assert!(snapshot.begin_retry().is_none());
}

#[test]
fn refresh_empties_snapshot_and_discards_stale_results() {
    let mut snapshot = PagingSnapshot::new();
    let first = snapshot.begin_append().unwrap();
    snapshot.complete(first, Ok(page(&[1, 2], 1, 3)));
    let in_flight = snapshot.begin_append().unwrap();

    let refresh = snapshot.begin_refresh();
    assert!(snapshot.is_empty());
    assert_eq!(refresh.token, None);
    assert_eq!(snapshot.refresh_status(), RefreshStatus::Loading);

    assert!(!snapshot.complete(in_flight, Ok(page(&[3, 4], 2, 3))));
    assert!(snapshot.is_empty());

    snapshot.complete(refresh, Ok(page(&[9], 1, 1)));
    assert_eq!(snapshot.items(), &[9]);
    assert_eq!(snapshot.refresh_status(), RefreshStatus::Settled { item_count: 1 });
}

#[test]
fn duplicate_ids_across_pages_are_kept() {
    let mut snapshot = PagingSnapshot::new();
    let first = snapshot.begin_append().unwrap();
    snapshot.complete(first, Ok(page(&[7, 8], 1, 2)));
    let second = snapshot.begin_append().unwrap();
    snapshot.complete(second, Ok(page(&[8, 9], 2, 2)));

    assert_eq!(snapshot.items(), &[7, 8, 8, 9]);
}

#[test]
fn cancel_forces_terminal_state() {
    let mut snapshot: PagingSnapshot<u64> = PagingSnapshot::new();
    let request = snapshot.begin_refresh();
    assert!(snapshot.cancel(request));
    assert_eq!(snapshot.load_states().refresh, LoadState::NotLoading);
    assert_eq!(snapshot.refresh_status(), RefreshStatus::Idle);
    assert!(!snapshot.complete(request, Ok(page(&[1], 1, 1))));
}

#[test]
fn failed_refresh_reports_failure() {
    let mut snapshot: PagingSnapshot<u64> = PagingSnapshot::new();
    let request = snapshot.begin_refresh();
    snapshot.complete(request, Err(network_error()));

    assert_eq!(snapshot.refresh_status(), RefreshStatus::Failed(network_error()));
    let retry = snapshot.begin_retry().unwrap();
    assert_eq!(retry.direction, Direction::Refresh);
    assert_eq!(retry.token, None);
}

#[test]
fn append_waits_for_a_failed_refresh_to_be_retried() {
    let mut snapshot: PagingSnapshot<u64> = PagingSnapshot::new();
    let request = snapshot.begin_refresh();
    snapshot.complete(request, Err(network_error()));

    assert_eq!(snapshot.begin_append(), None);
    assert_eq!(snapshot.load_states().append, LoadState::NotLoading);

    let retry = snapshot.begin_retry().expect("failed refresh can be retried");
    assert!(snapshot.complete(retry, Ok(page(&[101, 102], 1, 3))));
    assert_eq!(snapshot.refresh_status(), RefreshStatus::Settled { item_count: 2 });
    assert_eq!(snapshot.failed_request(), None);

    let next = snapshot.begin_append().expect("append after recovery");
    assert_eq!(next.token, Some(2));
}
