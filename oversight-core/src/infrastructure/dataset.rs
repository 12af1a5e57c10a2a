// oversight-core/src/infrastructure/dataset.rs

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, instrument};

use anyhow::Context;

use crate::domain::error::DomainError;
use crate::domain::project::Project;
use crate::domain::report::Report;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

/// On-disk shape of a dataset: the whole Project -> Report -> Finding tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub reports: Vec<Report>,
}

impl Dataset {
    /// Replaces the project with the same id, or appends it.
    pub fn upsert_project(&mut self, project: Project) {
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(slot) => *slot = project,
            None => self.projects.push(project),
        }
    }

    /// Replaces the report with the same id, or appends it.
    pub fn upsert_report(&mut self, report: Report) {
        match self.reports.iter_mut().find(|r| r.id == report.id) {
            Some(slot) => *slot = report,
            None => self.reports.push(report),
        }
    }

    /// Structural checks: unique ids, every report hangs off a known project,
    /// every finding points back at its own report and project.
    pub fn check(&self) -> Result<(), DomainError> {
        let mut project_ids = HashSet::new();
        for project in &self.projects {
            project.check()?;
            if !project_ids.insert(project.id.as_str()) {
                return Err(DomainError::Validation(format!(
                    "duplicate project id '{}'",
                    project.id
                )));
            }
        }

        let mut report_ids = HashSet::new();
        for report in &self.reports {
            if !report_ids.insert(report.id.as_str()) {
                return Err(DomainError::Validation(format!(
                    "duplicate report id '{}'",
                    report.id
                )));
            }
            if !project_ids.contains(report.project_id.as_str()) {
                return Err(DomainError::ProjectNotFound(report.project_id.clone()));
            }
            let mut finding_ids = HashSet::new();
            for finding in &report.findings {
                if finding.report_id != report.id || finding.project_id != report.project_id {
                    return Err(DomainError::Validation(format!(
                        "finding '{}' does not belong to report '{}'",
                        finding.id, report.id
                    )));
                }
                if !finding_ids.insert(finding.id.as_str()) {
                    return Err(DomainError::Validation(format!(
                        "duplicate finding id '{}' in report '{}'",
                        finding.id, report.id
                    )));
                }
            }
        }
        Ok(())
    }
}

#[instrument]
pub fn load_dataset(path: &Path) -> Result<Dataset, InfrastructureError> {
    let content = std::fs::read_to_string(path)
        .with_context(|| {
            format!("Failed to read dataset at {:?} (run 'oversight seed' first?)", path)
        })?;
    let dataset: Dataset = serde_yaml::from_str(&content)?;
    debug!(
        projects = dataset.projects.len(),
        reports = dataset.reports.len(),
        "Dataset parsed"
    );
    Ok(dataset)
}

pub fn save_dataset(path: &Path, dataset: &Dataset) -> Result<(), InfrastructureError> {
    let yaml = serde_yaml::to_string(dataset)?;
    atomic_write(path, yaml)
}
