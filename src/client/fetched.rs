//! Call results that record whether the backend actually answered.

use thiserror::Error;

/// Why a live response could not be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("backend returned HTTP {0}")]
    Status(u16),

    #[error("response did not match schema: {0}")]
    Decode(String),

    #[error("request could not be built: {0}")]
    InvalidRequest(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for Unavailable {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Unavailable::Timeout
        } else if e.is_connect() {
            Unavailable::Connect(e.to_string())
        } else if e.is_decode() {
            Unavailable::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            Unavailable::Status(status.as_u16())
        } else if e.is_builder() {
            Unavailable::InvalidRequest(e.to_string())
        } else {
            Unavailable::Transport(e.to_string())
        }
    }
}

/// Value returned by every client call.
///
/// Both variants carry a value of the same schema type; the variant tells
/// callers whether they are looking at live data or at the fallback dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Live(T),
    Fallback { value: T, reason: Unavailable },
}

impl<T> Fetched<T> {
    pub fn is_live(&self) -> bool {
        matches!(self, Fetched::Live(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Fetched::Fallback { .. })
    }

    pub fn value(&self) -> &T {
        match self {
            Fetched::Live(value) => value,
            Fetched::Fallback { value, .. } => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Fetched::Live(value) => value,
            Fetched::Fallback { value, .. } => value,
        }
    }

    /// Failure that caused the fallback, if any
    pub fn reason(&self) -> Option<&Unavailable> {
        match self {
            Fetched::Live(_) => None,
            Fetched::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Fetched<U> {
        match self {
            Fetched::Live(value) => Fetched::Live(f(value)),
            Fetched::Fallback { value, reason } => Fetched::Fallback {
                value: f(value),
                reason,
            },
        }
    }
}
