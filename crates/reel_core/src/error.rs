use std::fmt;

/// Failure surfaced by any remote catalog call.
///
/// Page fetches and single-item lookups both report through this type; it
/// never escapes as a panic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Transport-level failures: connection, HTTP status, timeouts, size caps.
    pub fn is_network(&self) -> bool {
        matches!(
            self.kind,
            FailureKind::Network
                | FailureKind::HttpStatus(_)
                | FailureKind::Timeout
                | FailureKind::TooLarge { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    HttpStatus(u16),
    Timeout,
    Decode,
    NotFound,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    InvalidRequest,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network error"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::NotFound => write!(f, "not found"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidRequest => write!(f, "invalid request"),
        }
    }
}
