// oversight-core/src/ports/repository.rs

// What the application needs from the data service, without knowing whether it
// is a YAML fixture, an in-memory map or a remote API.

use crate::domain::project::Project;
use crate::domain::report::{Report, ReportStatus};
use crate::error::OversightError;
use async_trait::async_trait;

/// Filter for report listings. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportQuery {
    pub project_id: Option<String>,
    pub status: Option<ReportStatus>,
}

impl ReportQuery {
    pub fn for_project(project_id: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            status: None,
        }
    }

    pub fn with_status(mut self, status: ReportStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, report: &Report) -> bool {
        self.project_id
            .as_ref()
            .is_none_or(|p| *p == report.project_id)
            && self.status.is_none_or(|s| s == report.status)
    }
}

#[async_trait]
pub trait OversightRepository: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>, OversightError>;

    /// Fails with `DomainError::ProjectNotFound` for unknown ids.
    async fn get_project(&self, id: &str) -> Result<Project, OversightError>;

    /// Insert or replace. Saving the same value twice leaves the store unchanged.
    async fn save_project(&self, project: &Project) -> Result<(), OversightError>;

    async fn list_reports(&self, query: &ReportQuery) -> Result<Vec<Report>, OversightError>;

    /// Fails with `DomainError::ReportNotFound` for unknown ids.
    async fn get_report(&self, id: &str) -> Result<Report, OversightError>;

    /// Insert or replace, findings and review log included.
    async fn save_report(&self, report: &Report) -> Result<(), OversightError>;
}
