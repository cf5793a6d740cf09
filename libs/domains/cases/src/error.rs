use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CaseError {
    #[error("Case not found: {0}")]
    NotFound(Uuid),

    #[error("Hearing not found: {0}")]
    HearingNotFound(Uuid),

    #[error("Case number '{0}' already exists")]
    DuplicateCaseNumber(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CaseResult<T> = Result<T, CaseError>;
