// oversight-core/src/application/dashboard.rs

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use crate::application::service::OversightService;
use crate::application::views::ProjectView;
use crate::domain::error::DomainError;
use crate::domain::rating::Rating;
use crate::domain::report::{Report, ReportStatus};
use crate::domain::risk::{SeverityBand, SeverityPolicy};
use crate::domain::variance::budget_used_percent;
use crate::error::OversightError;
use crate::ports::repository::ReportQuery;

#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingDistribution {
    pub on_track: usize,
    pub at_risk: usize,
    pub critical: usize,
    pub unknown: usize,
}

impl RatingDistribution {
    fn record(&mut self, rating: Rating) {
        match rating {
            Rating::OnTrack => self.on_track += 1,
            Rating::AtRisk => self.at_risk += 1,
            Rating::Critical => self.critical += 1,
            Rating::Unknown => self.unknown += 1,
        }
    }
}

#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    fn from_reports<'a>(
        reports: impl IntoIterator<Item = &'a Report>,
        policy: &SeverityPolicy,
    ) -> Self {
        let mut counts = Self::default();
        for finding in reports.into_iter().flat_map(|r| r.open_findings()) {
            match finding.severity(policy) {
                SeverityBand::High => counts.high += 1,
                SeverityBand::Medium => counts.medium += 1,
                SeverityBand::Low => counts.low += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioBudget {
    pub contract_total: u64,
    pub paid_total: u64,
    /// `None` when the portfolio has no contract value at all.
    pub budget_used_percent: Option<u32>,
    pub over_budget_projects: Vec<String>,
    pub behind_schedule_projects: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQueueItem {
    pub report_id: String,
    pub project_id: String,
    pub period: String,
    pub status: ReportStatus,
}

impl From<&Report> for ReviewQueueItem {
    fn from(r: &Report) -> Self {
        Self {
            report_id: r.id.clone(),
            project_id: r.project_id.clone(),
            period: r.period.to_string(),
            status: r.status,
        }
    }
}

/// Reviewer landing page: the whole active portfolio.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub total_projects: usize,
    pub active_projects: usize,
    pub ratings: RatingDistribution,
    pub awaiting_review: Vec<ReviewQueueItem>,
    pub open_findings: SeverityCounts,
    pub budget: PortfolioBudget,
}

/// Vendor landing page: only the vendor's assigned projects.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorDashboard {
    pub vendor: String,
    pub projects: Vec<ProjectView>,
    pub reports_by_status: BTreeMap<ReportStatus, usize>,
    pub changes_requested: Vec<ReviewQueueItem>,
    pub drafts: Vec<ReviewQueueItem>,
    pub open_findings: SeverityCounts,
}

fn portfolio_total(mut amounts: impl Iterator<Item = u64>, what: &str) -> Result<u64, DomainError> {
    amounts
        .try_fold(0u64, |acc, amount| acc.checked_add(amount))
        .ok_or_else(|| DomainError::Validation(format!("portfolio {} total overflows", what)))
}

#[instrument(skip(service))]
pub async fn admin_dashboard(service: &OversightService) -> Result<AdminDashboard, OversightError> {
    service.current_actor().await?.require_admin("view admin dashboard")?;

    let repo = service.repository();
    let query = ReportQuery::default();
    let (projects, reports) = futures::try_join!(repo.list_projects(), repo.list_reports(&query))?;

    let active: Vec<_> = projects.iter().filter(|p| p.is_active()).collect();
    let mut ratings = RatingDistribution::default();
    for project in &active {
        ratings.record(project.overall_project_status);
    }

    let contract_total = portfolio_total(active.iter().map(|p| p.contract_amount), "contract")?;
    let paid_total = portfolio_total(active.iter().map(|p| p.amount_paid), "paid")?;
    let budget = PortfolioBudget {
        contract_total,
        paid_total,
        budget_used_percent: budget_used_percent(paid_total, contract_total).ok(),
        over_budget_projects: active
            .iter()
            .filter(|p| p.is_over_budget())
            .map(|p| p.id.clone())
            .collect(),
        behind_schedule_projects: active
            .iter()
            .filter(|p| p.schedule_status().is_behind())
            .map(|p| p.id.clone())
            .collect(),
    };

    let awaiting_review = reports
        .iter()
        .filter(|r| r.status == ReportStatus::Submitted)
        .map(ReviewQueueItem::from)
        .collect();

    let active_ids: Vec<&str> = active.iter().map(|p| p.id.as_str()).collect();
    let open_findings = SeverityCounts::from_reports(
        reports.iter().filter(|r| active_ids.contains(&r.project_id.as_str())),
        service.severity_policy(),
    );

    debug!(projects = projects.len(), reports = reports.len(), "Admin dashboard computed");

    Ok(AdminDashboard {
        total_projects: projects.len(),
        active_projects: active.len(),
        ratings,
        awaiting_review,
        open_findings,
        budget,
    })
}

#[instrument(skip(service))]
pub async fn vendor_dashboard(
    service: &OversightService,
) -> Result<VendorDashboard, OversightError> {
    let actor = service.current_actor().await?;
    let vendor = match (&actor.vendor, actor.is_admin()) {
        (Some(vendor), false) => vendor.clone(),
        _ => {
            return Err(DomainError::Unauthorized(format!(
                "'{}' is not an IV&V vendor user",
                actor.user
            ))
            .into());
        }
    };

    let query = ReportQuery::default();
    let (projects, reports) =
        futures::try_join!(service.get_projects(), service.list_reports(&query))?;

    let projects: Vec<ProjectView> = projects
        .iter()
        .filter(|p| actor.require_vendor_of(&p.ivv_vendor_name, "view").is_ok())
        .map(ProjectView::from)
        .collect();

    let mut reports_by_status = BTreeMap::new();
    for report in &reports {
        *reports_by_status.entry(report.status).or_insert(0) += 1;
    }

    let pick = |status: ReportStatus| -> Vec<ReviewQueueItem> {
        reports
            .iter()
            .filter(|r| r.status == status)
            .map(ReviewQueueItem::from)
            .collect()
    };

    Ok(VendorDashboard {
        vendor,
        projects,
        reports_by_status,
        changes_requested: pick(ReportStatus::ChangesRequested),
        drafts: pick(ReportStatus::Draft),
        open_findings: SeverityCounts::from_reports(&reports, service.severity_policy()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::actor::Actor;
    use crate::domain::configuration::OversightConfig;
    use crate::infrastructure::adapters::{InMemoryRepository, StaticIdentity};
    use crate::infrastructure::dataset::Dataset;
    use crate::infrastructure::seed::{KEYSTONE, NORTHBRIDGE, demo_dataset};
    use anyhow::Result;
    use std::sync::Arc;

    fn service(actor: Actor) -> Result<OversightService> {
        service_over(actor, demo_dataset()?)
    }

    fn service_over(actor: Actor, dataset: Dataset) -> Result<OversightService> {
        let repo = Arc::new(InMemoryRepository::from_dataset(dataset)?);
        Ok(OversightService::new(
            repo,
            Arc::new(StaticIdentity::new(actor)),
            &OversightConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_admin_dashboard_counts_active_portfolio() -> Result<()> {
        let dash = admin_dashboard(&service(Actor::admin("lee.park@ets.example"))?).await?;

        assert_eq!(dash.total_projects, 4);
        assert_eq!(dash.active_projects, 3);
        assert_eq!(
            dash.ratings,
            RatingDistribution {
                on_track: 1,
                at_risk: 1,
                critical: 1,
                unknown: 0
            }
        );
        assert_eq!(dash.awaiting_review.len(), 1);
        assert_eq!(dash.awaiting_review[0].report_id, "r-002");

        // r-001: 3x2 (high) and 2x2 (medium); r-004: 3x3 (high).
        assert_eq!(
            dash.open_findings,
            SeverityCounts {
                high: 2,
                medium: 1,
                low: 0
            }
        );
        assert_eq!(dash.budget.over_budget_projects, vec!["p-003".to_string()]);
        assert!(dash.budget.behind_schedule_projects.contains(&"p-001".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn test_admin_dashboard_rejects_overflowing_totals() -> Result<()> {
        let mut dataset = demo_dataset()?;
        for project in dataset.projects.iter_mut().filter(|p| p.is_active()) {
            project.contract_amount = u64::MAX / 2;
        }
        let service = service_over(Actor::admin("lee.park@ets.example"), dataset)?;
        let err = admin_dashboard(&service)
            .await
            .err()
            .ok_or_else(|| anyhow::anyhow!("overflowing totals were summed"))?;
        assert!(matches!(err, OversightError::Domain(DomainError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_admin_dashboard_requires_reviewer() -> Result<()> {
        let err = admin_dashboard(&service(Actor::vendor("ana", NORTHBRIDGE))?)
            .await
            .err()
            .ok_or_else(|| anyhow::anyhow!("vendor reached admin dashboard"))?;
        assert!(matches!(err, OversightError::Domain(DomainError::Unauthorized(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_vendor_dashboard_is_scoped() -> Result<()> {
        let dash = vendor_dashboard(&service(Actor::vendor("sam", KEYSTONE))?).await?;

        assert_eq!(dash.vendor, KEYSTONE);
        let ids: Vec<&str> = dash.projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p-002", "p-004"]);
        assert_eq!(dash.drafts.len(), 1);
        assert_eq!(dash.reports_by_status.get(&ReportStatus::Approved), Some(&2));
        assert!(dash.changes_requested.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_vendor_dashboard_shows_changes_requested() -> Result<()> {
        let dash = vendor_dashboard(&service(Actor::vendor("ana", NORTHBRIDGE))?).await?;
        assert_eq!(dash.changes_requested.len(), 1);
        assert_eq!(dash.changes_requested[0].report_id, "r-004");
        assert_eq!(dash.open_findings.total(), 3);
        Ok(())
    }
}
