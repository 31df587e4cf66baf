use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
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

    /// True when the provider answered but the body carried no usable joke.
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, FailureKind::MalformedResponse)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedResponse,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Why an acquisition cycle ended without appending anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquireError {
    #[error("joke provider unavailable: {0}")]
    ProviderUnavailable(FetchError),
    #[error("joke provider returned a malformed response: {0}")]
    ProviderMalformedResponse(FetchError),
    #[error("joke provider exhausted after {attempts} attempts ({collected} of {target} unique jokes)")]
    ProviderExhausted {
        attempts: usize,
        collected: usize,
        target: usize,
    },
}

impl From<FetchError> for AcquireError {
    fn from(err: FetchError) -> Self {
        if err.is_malformed() {
            AcquireError::ProviderMalformedResponse(err)
        } else {
            AcquireError::ProviderUnavailable(err)
        }
    }
}

/// Outcome of a successful acquisition cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AcquireReport {
    /// New jokes appended to the collection.
    pub added: usize,
    /// Provider calls made, duplicates included.
    pub attempts: usize,
    pub duplicates: usize,
    /// False when the collection was updated in memory but the write failed.
    pub persisted: bool,
}
