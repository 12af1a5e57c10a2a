// oversight-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, PartialEq)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    #[diagnostic(
        code(oversight::domain::validation),
        help("Correct the highlighted fields and try again.")
    )]
    Validation(String),

    #[error("Not authorized: {0}")]
    #[diagnostic(
        code(oversight::domain::unauthorized),
        help("Sign in with a role allowed to perform this action.")
    )]
    Unauthorized(String),

    #[error("Project '{0}' not found")]
    #[diagnostic(code(oversight::domain::project_not_found))]
    ProjectNotFound(String),

    #[error("Report '{0}' not found")]
    #[diagnostic(code(oversight::domain::report_not_found))]
    ReportNotFound(String),

    #[error("Finding '{finding_id}' not found in report '{report_id}'")]
    #[diagnostic(code(oversight::domain::finding_not_found))]
    FindingNotFound {
        report_id: String,
        finding_id: String,
    },

    #[error("Invalid transition for {entity}: {from} -> {to}")]
    #[diagnostic(
        code(oversight::domain::transition),
        help("Reports move Draft -> Submitted -> Approved; changes requested return to Submitted.")
    )]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },

    #[error("Report '{report_id}' is locked while {status}")]
    #[diagnostic(
        code(oversight::domain::locked),
        help("Content can only change while the report is a draft or has changes requested.")
    )]
    ReportLocked { report_id: String, status: String },

    #[error("Contract amount must be greater than zero")]
    #[diagnostic(code(oversight::domain::zero_contract))]
    ZeroContractAmount,

    #[error("Score level {0} is out of range (expected 1..=3)")]
    #[diagnostic(code(oversight::domain::score))]
    InvalidScore(u8),

    #[error("Unknown rating: {0}")]
    #[diagnostic(
        code(oversight::domain::rating),
        help("Expected one of: on-track, at-risk, critical.")
    )]
    InvalidRating(String),

    #[error("Invalid reporting period: {0}")]
    #[diagnostic(code(oversight::domain::period), help("Use the YYYY-MM format."))]
    InvalidPeriod(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::Validation(errors.to_string())
    }
}
