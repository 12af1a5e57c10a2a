// oversight-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OversightError {
    // --- ERREURS DU DOMAINE (Workflow, Validation, Rating) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, Parsing, Backend) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- ERREURS GÉNÉRIQUES / APPLICATIVES ---
    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl OversightError {
    /// Only backend unavailability is worth retrying. Validation, authorization
    /// and lookup failures give the same answer on every attempt.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            OversightError::Infrastructure(InfrastructureError::Unavailable(_))
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            OversightError::Domain(
                DomainError::ProjectNotFound(_)
                    | DomainError::ReportNotFound(_)
                    | DomainError::FindingNotFound { .. }
            )
        )
    }
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for OversightError {
    fn from(err: std::io::Error) -> Self {
        OversightError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<validator::ValidationErrors> for OversightError {
    fn from(errors: validator::ValidationErrors) -> Self {
        OversightError::Domain(DomainError::from(errors))
    }
}
