// oversight-core/src/infrastructure/adapters/memory.rs

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::error::DomainError;
use crate::domain::project::Project;
use crate::domain::report::Report;
use crate::error::OversightError;
use crate::infrastructure::dataset::Dataset;
use crate::ports::repository::{OversightRepository, ReportQuery};

/// Working set of projects and reports, keyed by id. Guards are never held
/// across an `.await`.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    projects: RwLock<ProjectMap>,
    reports: RwLock<ReportMap>,
}

type ProjectMap = BTreeMap<String, Project>;
type ReportMap = BTreeMap<String, Report>;

fn poisoned(what: &str) -> OversightError {
    OversightError::InternalError(format!("{} lock poisoned", what))
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dataset(dataset: Dataset) -> Result<Self, OversightError> {
        dataset.check()?;
        let projects = dataset
            .projects
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        let reports = dataset
            .reports
            .into_iter()
            .map(|r| (r.id.clone(), r))
            .collect();
        Ok(Self {
            projects: RwLock::new(projects),
            reports: RwLock::new(reports),
        })
    }

    pub fn snapshot(&self) -> Result<Dataset, OversightError> {
        Ok(Dataset {
            projects: self.read_projects()?.values().cloned().collect(),
            reports: self.read_reports()?.values().cloned().collect(),
        })
    }

    fn read_projects(&self) -> Result<RwLockReadGuard<'_, ProjectMap>, OversightError> {
        self.projects.read().map_err(|_| poisoned("projects"))
    }

    fn write_projects(&self) -> Result<RwLockWriteGuard<'_, ProjectMap>, OversightError> {
        self.projects.write().map_err(|_| poisoned("projects"))
    }

    fn read_reports(&self) -> Result<RwLockReadGuard<'_, ReportMap>, OversightError> {
        self.reports.read().map_err(|_| poisoned("reports"))
    }

    fn write_reports(&self) -> Result<RwLockWriteGuard<'_, ReportMap>, OversightError> {
        self.reports.write().map_err(|_| poisoned("reports"))
    }
}

#[async_trait]
impl OversightRepository for InMemoryRepository {
    async fn list_projects(&self) -> Result<Vec<Project>, OversightError> {
        Ok(self.read_projects()?.values().cloned().collect())
    }

    async fn get_project(&self, id: &str) -> Result<Project, OversightError> {
        self.read_projects()?
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::ProjectNotFound(id.to_string()).into())
    }

    async fn save_project(&self, project: &Project) -> Result<(), OversightError> {
        project.check()?;
        self.write_projects()?.insert(project.id.clone(), project.clone());
        Ok(())
    }

    async fn list_reports(&self, query: &ReportQuery) -> Result<Vec<Report>, OversightError> {
        let mut reports: Vec<Report> = self
            .read_reports()?
            .values()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();
        reports.sort_by(|a, b| {
            a.project_id
                .cmp(&b.project_id)
                .then_with(|| b.period.cmp(&a.period))
        });
        Ok(reports)
    }

    async fn get_report(&self, id: &str) -> Result<Report, OversightError> {
        self.read_reports()?
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::ReportNotFound(id.to_string()).into())
    }

    async fn save_report(&self, report: &Report) -> Result<(), OversightError> {
        if !self.read_projects()?.contains_key(&report.project_id) {
            return Err(DomainError::ProjectNotFound(report.project_id.clone()).into());
        }
        self.write_reports()?.insert(report.id.clone(), report.clone());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::report::{ReportStatus, ReportingPeriod};
    use crate::infrastructure::seed::demo_dataset;

    #[tokio::test]
    async fn test_lookup_and_not_found() -> anyhow::Result<()> {
        let repo = InMemoryRepository::from_dataset(demo_dataset()?)?;
        let projects = repo.list_projects().await?;
        assert!(!projects.is_empty());

        let first = repo.get_project(&projects[0].id).await?;
        assert_eq!(first, projects[0]);

        let err = repo.get_project("missing").await.unwrap_err();
        assert!(err.is_not_found());
        let err = repo.get_report("missing").await.unwrap_err();
        assert!(err.is_not_found());
        Ok(())
    }

    #[tokio::test]
    async fn test_report_query_filters_and_orders() -> anyhow::Result<()> {
        let repo = InMemoryRepository::from_dataset(demo_dataset()?)?;
        let approved = repo
            .list_reports(&ReportQuery::default().with_status(ReportStatus::Approved))
            .await?;
        assert!(approved.iter().all(|r| r.status == ReportStatus::Approved));

        let for_p1 = repo.list_reports(&ReportQuery::for_project("p-001")).await?;
        assert!(for_p1.iter().all(|r| r.project_id == "p-001"));
        assert!(for_p1.windows(2).all(|w| w[0].period >= w[1].period));
        Ok(())
    }

    #[tokio::test]
    async fn test_save_report_requires_known_project() -> anyhow::Result<()> {
        let repo = InMemoryRepository::new();
        let orphan = Report::draft("r-x", "p-none", ReportingPeriod::new(2025, 1)?);
        let err = repo.save_report(&orphan).await.unwrap_err();
        assert!(err.is_not_found());
        Ok(())
    }

    #[tokio::test]
    async fn test_snapshot_round_trips_dataset() -> anyhow::Result<()> {
        let dataset = demo_dataset()?;
        let repo = InMemoryRepository::from_dataset(dataset.clone())?;
        let snap = repo.snapshot()?;
        assert_eq!(snap.projects.len(), dataset.projects.len());
        assert_eq!(snap.reports.len(), dataset.reports.len());
        Ok(())
    }
}
