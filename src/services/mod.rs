//! Use-case layer. Normalizes repository and form failures into a single
//! error taxonomy consumed by the screens.

use thiserror::Error;

use crate::domain::intervention::InterventionStatus;
use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod clients;
pub mod contacts;
pub mod facilities;
pub mod interventions;
pub mod settings;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("invalid status transition from {current} to {requested}")]
    InvalidStatusTransition {
        current: InterventionStatus,
        requested: InterventionStatus,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ValidationError(msg) => ServiceError::Validation(msg),
            RepositoryError::ConstraintViolation(msg) => ServiceError::Conflict(msg),
            RepositoryError::DatabaseError(msg)
            | RepositoryError::ConnectionError(msg)
            | RepositoryError::Unexpected(msg) => ServiceError::Internal(msg),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

/// Per-item error inside a batch operation.
#[derive(Debug)]
pub struct BatchItemError {
    pub id: i32,
    pub error: ServiceError,
}

/// Summary of a batch operation. Items are attempted independently; a batch
/// counts as an overall failure only when every item failed.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub success_count: usize,
    pub failure_count: usize,
    pub errors: Vec<BatchItemError>,
}

impl BatchOutcome {
    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub fn record_failure(&mut self, id: i32, error: ServiceError) {
        self.failure_count += 1;
        self.errors.push(BatchItemError { id, error });
    }

    /// True only when every attempted item failed.
    #[must_use]
    pub fn is_total_failure(&self) -> bool {
        self.success_count == 0 && self.failure_count > 0
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_outcome_classification() {
        let mut outcome = BatchOutcome::default();
        assert!(!outcome.is_total_failure());

        outcome.record_failure(1, ServiceError::NotFound);
        assert!(outcome.is_total_failure());

        outcome.record_success();
        assert!(!outcome.is_total_failure());
        assert_eq!(outcome.total(), 2);
    }

    #[test]
    fn repository_errors_map_into_the_taxonomy() {
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::ConstraintViolation("dup".into())),
            ServiceError::Conflict(_)
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::DatabaseError("io".into())),
            ServiceError::Internal(_)
        ));
    }
}
