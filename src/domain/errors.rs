//! Domain errors.
//!
//! Every fallible domain operation returns [`DomainError`]. The four
//! variants mirror [`crate::domain::models::FailureKind`] so a
//! [`crate::domain::models::OperationResult::Failure`] can be built
//! straight from a caught error without re-classifying it.

use thiserror::Error;

/// Domain-level errors that can occur while planning or rescheduling tasks.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Input failed shape validation (bad time format, empty description,
    /// non-positive duration, start not before end).
    #[error("{0}")]
    Validation(String),

    /// The requested change conflicts with the current schedule and no
    /// confirmation was supplied to resolve it.
    #[error("{0}")]
    ConflictPolicy(String),

    /// A precondition the caller was supposed to have checked no longer
    /// holds (referenced task missing, stale confirmation plan, locked or
    /// completed task in the way).
    #[error("{0}")]
    Precondition(String),

    /// The operation would have had no effect.
    #[error("{0}")]
    NoOp(String),
}

impl DomainError {
    pub fn kind(&self) -> crate::domain::models::FailureKind {
        match self {
            DomainError::Validation(_) => crate::domain::models::FailureKind::Validation,
            DomainError::ConflictPolicy(_) => crate::domain::models::FailureKind::ConflictPolicy,
            DomainError::Precondition(_) => crate::domain::models::FailureKind::Precondition,
            DomainError::NoOp(_) => crate::domain::models::FailureKind::NoOp,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Precondition(format!("snapshot file error: {err}"))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Precondition(format!("snapshot serialization error: {err}"))
    }
}
