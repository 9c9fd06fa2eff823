//! The Success/Error envelope returned by every fallible repository operation.

use super::DomainError;
use std::fmt;
use std::sync::Arc;

/// Outcome of a repository operation.
///
/// There are deliberately no accessors or combinators: consumers must match
/// both variants. A match that forgets one does not compile:
///
/// ```compile_fail
/// use wellness_tracker::domain::DataResult;
///
/// fn render(result: DataResult<u32>) -> u32 {
///     match result {
///         DataResult::Success(n) => n,
///     }
/// }
/// ```
#[must_use = "a DataResult carries the only failure signal of the operation"]
#[derive(Debug, Clone, PartialEq)]
pub enum DataResult<T> {
    Success(T),
    Error(ErrorInfo),
}

/// Human-readable failure plus the fault that caused it.
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    message: String,
    cause: Option<Arc<DomainError>>,
}

impl ErrorInfo {
    /// Error with no underlying cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Error described by `message`, wrapping the original fault.
    pub fn caused(message: impl Into<String>, cause: DomainError) -> Self {
        Self {
            message: message.into(),
            cause: Some(Arc::new(cause)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&DomainError> {
        self.cause.as_deref()
    }
}

/// Uses the fault's own text as the message.
impl From<DomainError> for ErrorInfo {
    fn from(cause: DomainError) -> Self {
        Self::caused(cause.to_string(), cause)
    }
}

/// Two errors are equal when they carry the same message and the very same cause.
impl PartialEq for ErrorInfo {
    fn eq(&self, other: &Self) -> bool {
        let same_cause = match (&self.cause, &other.cause) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.message == other.message && same_cause
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ErrorInfo {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|c| c as &(dyn std::error::Error + 'static))
    }
}
