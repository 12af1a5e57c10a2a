// oversight-core/src/application/catalog.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, instrument};

use crate::application::views::{ProjectView, RatingView};
use crate::domain::configuration::CatalogConfig;
use crate::domain::rating::Rating;
use crate::domain::report::{Report, ReportStatus};
use crate::error::OversightError;
use crate::ports::repository::{OversightRepository, ReportQuery};

// --- DTOs ---
// What the public catalog page displays.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicCatalog {
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<CatalogEntry>,
    pub stats: CatalogStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_projects: usize,
    pub on_track: usize,
    pub at_risk: usize,
    pub critical: usize,
    /// Projects whose stored rating could not be read.
    pub unknown: usize,
    pub published_reports: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub project: ProjectView,
    pub latest_report: Option<PublishedReportSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedReportSummary {
    pub id: String,
    pub period: String,
    pub period_label: String,
    pub overall_rating: Option<RatingView>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl From<&Report> for PublishedReportSummary {
    fn from(r: &Report) -> Self {
        Self {
            id: r.id.clone(),
            period: r.period.to_string(),
            period_label: r.period.label(),
            overall_rating: r.overall_rating.map(RatingView::from),
            approved_at: r.approved_at,
        }
    }
}

// --- GENERATOR SERVICE ---

pub struct CatalogGenerator;

impl CatalogGenerator {
    /// Only approved reports are visible here; drafts and reports under review
    /// never leak into the public catalog.
    #[instrument(skip(repo))]
    pub async fn build(
        repo: &dyn OversightRepository,
        config: &CatalogConfig,
    ) -> Result<PublicCatalog, OversightError> {
        let published_query = ReportQuery::default().with_status(ReportStatus::Approved);
        let (projects, published) = futures::try_join!(
            repo.list_projects(),
            repo.list_reports(&published_query)
        )?;

        let mut latest: HashMap<&str, &Report> = HashMap::new();
        for report in &published {
            latest
                .entry(report.project_id.as_str())
                .and_modify(|current| {
                    if report.period > current.period {
                        *current = report;
                    }
                })
                .or_insert(report);
        }

        let mut entries: Vec<CatalogEntry> = projects
            .iter()
            .filter(|p| config.include_inactive || p.is_active())
            .map(|p| CatalogEntry {
                project: ProjectView::from(p),
                latest_report: latest
                    .get(p.id.as_str())
                    .map(|r| PublishedReportSummary::from(*r)),
            })
            .collect();

        // Worst rating first, then by name.
        entries.sort_by(|a, b| {
            b.project
                .rating
                .value
                .cmp(&a.project.rating.value)
                .then_with(|| a.project.project_name.cmp(&b.project.project_name))
        });

        let count = |rating| {
            entries
                .iter()
                .filter(|e| e.project.rating.value == rating)
                .count()
        };
        let stats = CatalogStats {
            total_projects: entries.len(),
            on_track: count(Rating::OnTrack),
            at_risk: count(Rating::AtRisk),
            critical: count(Rating::Critical),
            unknown: count(Rating::Unknown),
            published_reports: published
                .iter()
                .filter(|r| entries.iter().any(|e| e.project.id == r.project_id))
                .count(),
        };

        info!(projects = stats.total_projects, "Public catalog built");

        Ok(PublicCatalog {
            generated_at: Utc::now(),
            entries,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::InMemoryRepository;
    use crate::infrastructure::seed::demo_dataset;
    use anyhow::Result;

    #[tokio::test]
    async fn test_catalog_lists_active_projects_worst_first() -> Result<()> {
        let repo = InMemoryRepository::from_dataset(demo_dataset()?)?;
        let catalog = CatalogGenerator::build(&repo, &CatalogConfig::default()).await?;

        assert_eq!(catalog.stats.total_projects, 3);
        // r-006 belongs to the inactive p-004.
        assert_eq!(catalog.stats.published_reports, 2);
        assert_eq!(catalog.entries[0].project.rating.value, Rating::Critical);
        assert!(catalog.entries.iter().all(|e| e.project.id != "p-004"));
        Ok(())
    }

    #[tokio::test]
    async fn test_catalog_only_shows_published_reports() -> Result<()> {
        let repo = InMemoryRepository::from_dataset(demo_dataset()?)?;
        let catalog = CatalogGenerator::build(&repo, &CatalogConfig::default()).await?;

        let ui = catalog
            .entries
            .iter()
            .find(|e| e.project.id == "p-001")
            .ok_or_else(|| anyhow::anyhow!("p-001 missing"))?;
        // r-002 (September) is still under review; August is the latest public one.
        assert_eq!(ui.latest_report.as_ref().map(|r| r.id.as_str()), Some("r-001"));

        let dmv = catalog
            .entries
            .iter()
            .find(|e| e.project.id == "p-003")
            .ok_or_else(|| anyhow::anyhow!("p-003 missing"))?;
        assert!(dmv.latest_report.is_none());
        assert!(dmv.project.over_budget);
        Ok(())
    }

    #[tokio::test]
    async fn test_include_inactive() -> Result<()> {
        let repo = InMemoryRepository::from_dataset(demo_dataset()?)?;
        let config = CatalogConfig {
            include_inactive: true,
        };
        let catalog = CatalogGenerator::build(&repo, &config).await?;
        assert_eq!(catalog.stats.total_projects, 4);
        assert_eq!(catalog.stats.published_reports, 3);
        Ok(())
    }
}
