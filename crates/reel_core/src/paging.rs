//! Pure paging state machine.
//!
//! `PagingSnapshot` is the value observers see. The engine drives it with
//! `begin_*` / `complete` pairs around every remote fetch; nothing here
//! performs IO.

use crate::FetchError;

/// Cursor of a paged remote list. `None` at a call site means "first page".
pub type PageToken = u32;

/// Token following `page`, or `None` once `page + 1` exceeds `total_pages`.
pub fn next_page_token(page: u32, total_pages: u32) -> Option<PageToken> {
    let next = page.checked_add(1)?;
    (next <= total_pages).then_some(next)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub prev_token: Option<PageToken>,
    pub next_token: Option<PageToken>,
}

impl<T> Page<T> {
    /// Page of a forward-only feed: no previous token.
    pub fn forward(items: Vec<T>, page: u32, total_pages: u32) -> Self {
        Self {
            items,
            prev_token: None,
            next_token: next_page_token(page, total_pages),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotLoading,
    Loading,
    Error(FetchError),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            LoadState::Error(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Refresh,
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadStates {
    pub refresh: LoadState,
    pub append: LoadState,
}

impl LoadStates {
    pub fn get(&self, direction: Direction) -> &LoadState {
        match direction {
            Direction::Refresh => &self.refresh,
            Direction::Append => &self.append,
        }
    }

    fn set(&mut self, direction: Direction, state: LoadState) {
        match direction {
            Direction::Refresh => self.refresh = state,
            Direction::Append => self.append = state,
        }
    }
}

/// One fetch issued by the stream. `generation` ties the result to the
/// snapshot it was issued against; a refresh or clear makes it stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub direction: Direction,
    pub token: Option<PageToken>,
    pub generation: u64,
}

/// Coarse view of the refresh direction, as consumed by features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshStatus {
    /// Nothing requested yet, or cleared.
    Idle,
    Loading,
    /// Refresh is not loading and at least one page has landed.
    Settled { item_count: usize },
    Failed(FetchError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Start,
    Next(PageToken),
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PagingSnapshot<T> {
    items: Vec<T>,
    load_states: LoadStates,
    cursor: Cursor,
    generation: u64,
    loaded_pages: usize,
    failed: Option<PageRequest>,
}

impl<T> Default for PagingSnapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            load_states: LoadStates::default(),
            cursor: Cursor::Start,
            generation: 0,
            loaded_pages: 0,
            failed: None,
        }
    }
}

impl<T> PagingSnapshot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn load_states(&self) -> &LoadStates {
        &self.load_states
    }

    /// Token the next append will use; `None` before the first page and
    /// after the last one.
    pub fn next_token(&self) -> Option<PageToken> {
        match self.cursor {
            Cursor::Next(token) => Some(token),
            Cursor::Start | Cursor::End => None,
        }
    }

    pub fn end_reached(&self) -> bool {
        self.cursor == Cursor::End
    }

    pub fn loaded_pages(&self) -> usize {
        self.loaded_pages
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Request a `retry` would re-issue.
    pub fn failed_request(&self) -> Option<PageRequest> {
        self.failed
    }

    pub fn is_settled(&self) -> bool {
        self.loaded_pages > 0 && self.load_states.refresh == LoadState::NotLoading
    }

    pub fn refresh_status(&self) -> RefreshStatus {
        match &self.load_states.refresh {
            LoadState::Loading => RefreshStatus::Loading,
            LoadState::Error(err) => RefreshStatus::Failed(err.clone()),
            LoadState::NotLoading if self.loaded_pages > 0 => RefreshStatus::Settled {
                item_count: self.items.len(),
            },
            LoadState::NotLoading => RefreshStatus::Idle,
        }
    }

    /// Starts an append. Returns `None` while any fetch is loading, while
    /// either direction sits in `Error` (use `begin_retry`), or after the
    /// last page.
    pub fn begin_append(&mut self) -> Option<PageRequest> {
        if self.load_states.refresh != LoadState::NotLoading
            || self.load_states.append != LoadState::NotLoading
        {
            return None;
        }
        let token = match self.cursor {
            Cursor::Start => None,
            Cursor::Next(token) => Some(token),
            Cursor::End => return None,
        };
        self.load_states.append = LoadState::Loading;
        Some(PageRequest {
            direction: Direction::Append,
            token,
            generation: self.generation,
        })
    }

    /// Drops every item and starts over from the first page.
    pub fn begin_refresh(&mut self) -> PageRequest {
        self.reset();
        self.load_states.refresh = LoadState::Loading;
        PageRequest {
            direction: Direction::Refresh,
            token: None,
            generation: self.generation,
        }
    }

    /// Re-arms the request that failed, with its original token.
    pub fn begin_retry(&mut self) -> Option<PageRequest> {
        let failed = self.failed?;
        if self.load_states.get(failed.direction).error().is_none() {
            return None;
        }
        self.failed = None;
        self.load_states.set(failed.direction, LoadState::Loading);
        Some(failed)
    }

    /// Empty, idle snapshot; in-flight results become stale.
    pub fn clear(&mut self) {
        self.reset();
    }

    /// Applies the outcome of `request`. Returns `false` when the request is
    /// stale and nothing changed.
    pub fn complete(&mut self, request: PageRequest, result: Result<Page<T>, FetchError>) -> bool {
        if !self.is_current(&request) {
            return false;
        }
        match result {
            Ok(page) => {
                self.items.extend(page.items);
                self.cursor = match page.next_token {
                    Some(token) => Cursor::Next(token),
                    None => Cursor::End,
                };
                self.loaded_pages += 1;
                self.load_states.set(request.direction, LoadState::NotLoading);
            }
            Err(err) => {
                self.failed = Some(request);
                self.load_states.set(request.direction, LoadState::Error(err));
            }
        }
        true
    }

    /// Forces a cancelled request's direction back to `NotLoading`, keeping
    /// whatever was loaded before.
    pub fn cancel(&mut self, request: PageRequest) -> bool {
        if !self.is_current(&request) {
            return false;
        }
        self.load_states.set(request.direction, LoadState::NotLoading);
        true
    }

    fn is_current(&self, request: &PageRequest) -> bool {
        request.generation == self.generation
            && self.load_states.get(request.direction).is_loading()
    }

    fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.items.clear();
        self.cursor = Cursor::Start;
        self.loaded_pages = 0;
        self.failed = None;
        self.load_states = LoadStates::default();
    }
}
