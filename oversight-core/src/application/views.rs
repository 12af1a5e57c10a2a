// oversight-core/src/application/views.rs

// --- DTOs (Data Transfer Objects) ---
// What a page (or the CLI) renders. Derived values are computed here, once,
// from the domain model; they never flow back into storage.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::project::{Project, ProjectStatus};
use crate::domain::rating::{DimensionRatings, Rating, RatingDisplay};
use crate::domain::report::{
    Finding, FindingKind, FindingStatus, Report, ReportStatus, ReviewEvent,
};
use crate::domain::risk::{SeverityBand, SeverityPolicy};
use crate::domain::variance::ScheduleStatus;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingView {
    pub value: Rating,
    #[serde(flatten)]
    pub display: RatingDisplay,
}

impl From<Rating> for RatingView {
    fn from(value: Rating) -> Self {
        Self {
            value,
            display: value.display(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub id: String,
    pub project_name: String,
    pub sponsoring_agency: String,
    pub ivv_vendor_name: String,
    pub status: ProjectStatus,
    pub rating: RatingView,
    pub contract_amount: u64,
    pub amount_paid: u64,
    /// `None` only for stored projects that violate the non-zero contract rule.
    pub budget_used_percent: Option<u32>,
    pub over_budget: bool,
    pub planned_end_date: NaiveDate,
    pub projected_end_date: NaiveDate,
    pub schedule_delay_days: i64,
    pub schedule: ScheduleStatus,
}

impl From<&Project> for ProjectView {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id.clone(),
            project_name: p.project_name.clone(),
            sponsoring_agency: p.sponsoring_agency.clone(),
            ivv_vendor_name: p.ivv_vendor_name.clone(),
            status: p.status,
            rating: p.overall_project_status.into(),
            contract_amount: p.contract_amount,
            amount_paid: p.amount_paid,
            budget_used_percent: p.budget_used_percent().ok(),
            over_budget: p.is_over_budget(),
            planned_end_date: p.planned_end_date,
            projected_end_date: p.projected_end_date,
            schedule_delay_days: p.schedule_delay_days(),
            schedule: p.schedule_status(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingView {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub description: String,
    pub impact: u8,
    pub likelihood: u8,
    pub calculated_risk_rating: u8,
    pub severity: SeverityBand,
    pub status: FindingStatus,
    pub recommendation: String,
    pub raised_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_on: Option<NaiveDate>,
}

impl FindingView {
    pub fn new(f: &Finding, policy: &SeverityPolicy) -> Self {
        Self {
            id: f.id.clone(),
            kind: f.kind,
            description: f.description.clone(),
            impact: f.impact.value(),
            likelihood: f.likelihood.value(),
            calculated_risk_rating: f.risk_rating().value(),
            severity: f.severity(policy),
            status: f.status,
            recommendation: f.recommendation.clone(),
            raised_on: f.raised_on,
            closed_on: f.closed_on,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub id: String,
    pub project_id: String,
    pub period: String,
    pub period_label: String,
    pub status: ReportStatus,
    pub status_label: &'static str,
    pub overall_rating: Option<RatingView>,
    pub dimensions: DimensionRatings,
    pub summary: String,
    pub achievements: Vec<String>,
    pub challenges: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    pub findings: Vec<FindingView>,
    /// Empty in public views.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub review_log: Vec<ReviewEvent>,
}

impl ReportView {
    pub fn new(r: &Report, policy: &SeverityPolicy) -> Self {
        Self {
            id: r.id.clone(),
            project_id: r.project_id.clone(),
            period: r.period.to_string(),
            period_label: r.period.label(),
            status: r.status,
            status_label: r.status.label(),
            overall_rating: r.overall_rating.map(RatingView::from),
            dimensions: r.dimensions,
            summary: r.summary.clone(),
            achievements: r.achievements.clone(),
            challenges: r.challenges.clone(),
            submitted_at: r.submitted_at,
            submitted_by: r.submitted_by.clone(),
            approved_at: r.approved_at,
            findings: r
                .findings
                .iter()
                .map(|f| FindingView::new(f, policy))
                .collect(),
            review_log: r.review_log.clone(),
        }
    }

    /// Published rendering: no reviewer discussion, no author identity.
    pub fn public(r: &Report, policy: &SeverityPolicy) -> Self {
        let mut view = Self::new(r, policy);
        view.review_log.clear();
        view.submitted_by = None;
        view
    }
}
