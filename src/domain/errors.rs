//! Domain errors. Used by ports, repositories and state holders.
//!
//! Adapters map infrastructure errors into these. Repositories fold everything
//! except [`StreamFault`] into the [`DataResult`](super::DataResult) envelope.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum DomainError {
    /// A stored record cannot be mapped to its domain model (or back).
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// The storage operation itself failed.
    #[error("Storage fault: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Caller-side contract violation, e.g. deleting an exercise without an id.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Failure of the subscription mechanism rather than of one emission.
    #[error(transparent)]
    Stream(#[from] StreamFault),
}

impl DomainError {
    /// Storage fault keeping the underlying driver error as its source.
    pub fn storage(message: impl Into<String>, err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(Box::new(err)),
        }
    }

    /// Storage fault without an underlying error (e.g. a missing row after insert).
    pub fn storage_msg(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }
}

/// Live-query subscription failure. Repositories pass these through untouched;
/// state holders catch them at the subscription point.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamFault {
    /// The change notifications for a live query can no longer be delivered.
    #[error("live query closed: {0}")]
    Closed(String),

    /// Anything else that broke the subscription.
    #[error("live query failed: {0}")]
    Broken(String),
}
