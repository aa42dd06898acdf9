use crate::RefreshStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollPosition {
    pub index: usize,
    pub offset: i32,
}

impl ScrollPosition {
    pub fn new(index: usize, offset: i32) -> Self {
        Self { index, offset }
    }
}

/// Scroll position kept across deactivation.
///
/// The position is saved when a screen goes away and replayed only once
/// the list behind it has settled after the screen comes back; replaying
/// earlier would scroll an empty or half-loaded list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    saved: Option<ScrollPosition>,
    pending_restore: bool,
}

impl ScrollState {
    pub fn saved(&self) -> Option<ScrollPosition> {
        self.saved
    }

    pub fn is_restore_pending(&self) -> bool {
        self.pending_restore
    }

    pub fn save(&mut self, position: ScrollPosition) {
        self.saved = Some(position);
        self.pending_restore = false;
    }

    /// Arms a replay of the saved position, if there is one.
    pub fn arm(&mut self) {
        self.pending_restore = self.saved.is_some();
    }

    /// Position to replay, returned at most once per `arm`.
    pub fn on_refresh(&mut self, status: &RefreshStatus) -> Option<ScrollPosition> {
        if !self.pending_restore || !matches!(status, RefreshStatus::Settled { .. }) {
            return None;
        }
        self.pending_restore = false;
        self.saved
    }
}
