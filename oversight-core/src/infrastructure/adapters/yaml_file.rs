// oversight-core/src/infrastructure/adapters/yaml_file.rs

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::domain::project::Project;
use crate::domain::report::Report;
use crate::error::OversightError;
use crate::infrastructure::adapters::memory::InMemoryRepository;
use crate::infrastructure::dataset::{Dataset, load_dataset, save_dataset};
use crate::ports::repository::{OversightRepository, ReportQuery};

/// Local fixture store: the dataset file is read once and rewritten
/// atomically after every save.
pub struct YamlFileRepository {
    path: PathBuf,
    inner: InMemoryRepository,
    flush: Mutex<()>,
}

impl YamlFileRepository {
    #[instrument]
    pub fn open(path: &Path) -> Result<Self, OversightError> {
        let dataset = load_dataset(path)?;
        let inner = InMemoryRepository::from_dataset(dataset)?;
        info!(path = ?path, "Dataset loaded");
        Ok(Self {
            path: path.to_path_buf(),
            inner,
            flush: Mutex::new(()),
        })
    }

    /// Writes the dataset as it will be after `change`. The caller commits to
    /// the working set only once this returned `Ok`, so a failed write leaves
    /// memory and file identical.
    fn write_next(&self, change: impl FnOnce(&mut Dataset)) -> Result<(), OversightError> {
        let mut next = self.inner.snapshot()?;
        change(&mut next);
        next.check()?;
        save_dataset(&self.path, &next)?;
        debug!(path = ?self.path, "Dataset flushed");
        Ok(())
    }
}

#[async_trait]
impl OversightRepository for YamlFileRepository {
    async fn list_projects(&self) -> Result<Vec<Project>, OversightError> {
        self.inner.list_projects().await
    }

    async fn get_project(&self, id: &str) -> Result<Project, OversightError> {
        self.inner.get_project(id).await
    }

    async fn save_project(&self, project: &Project) -> Result<(), OversightError> {
        let _guard = self.flush.lock().await;
        self.write_next(|next| next.upsert_project(project.clone()))?;
        self.inner.save_project(project).await
    }

    async fn list_reports(&self, query: &ReportQuery) -> Result<Vec<Report>, OversightError> {
        self.inner.list_reports(query).await
    }

    async fn get_report(&self, id: &str) -> Result<Report, OversightError> {
        self.inner.get_report(id).await
    }

    async fn save_report(&self, report: &Report) -> Result<(), OversightError> {
        let _guard = self.flush.lock().await;
        self.write_next(|next| next.upsert_report(report.clone()))?;
        self.inner.save_report(report).await
    }
}
