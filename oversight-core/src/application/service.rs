// oversight-core/src/application/service.rs

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::application::retry::with_retry;
use crate::domain::actor::{Actor, Role};
use crate::domain::configuration::{OversightConfig, RetryPolicy};
use crate::domain::error::DomainError;
use crate::domain::project::{Project, ProjectInput, ProjectStatus};
use crate::domain::report::{
    DraftInput, Finding, FindingInput, FindingStatus, Report, ReportingPeriod, ReviewComment,
};
use crate::domain::risk::SeverityPolicy;
use crate::error::OversightError;
use crate::ports::identity::IdentityProvider;
use crate::ports::repository::{OversightRepository, ReportQuery};

/// Use cases of the three roles, over the repository and identity ports.
/// Role and vendor checks happen here; state rules live on the domain types.
pub struct OversightService {
    repo: Arc<dyn OversightRepository>,
    identity: Arc<dyn IdentityProvider>,
    severity: SeverityPolicy,
    retry: RetryPolicy,
}

impl OversightService {
    pub fn new(
        repo: Arc<dyn OversightRepository>,
        identity: Arc<dyn IdentityProvider>,
        config: &OversightConfig,
    ) -> Self {
        Self {
            repo,
            identity,
            severity: config.severity,
            retry: config.retry.clone(),
        }
    }

    pub fn severity_policy(&self) -> &SeverityPolicy {
        &self.severity
    }

    pub fn repository(&self) -> &Arc<dyn OversightRepository> {
        &self.repo
    }

    pub async fn current_actor(&self) -> Result<Actor, OversightError> {
        self.identity.current_actor().await
    }

    // --- READS ---

    pub async fn get_projects(&self) -> Result<Vec<Project>, OversightError> {
        self.repo.list_projects().await
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, OversightError> {
        self.repo.get_project(id).await
    }

    /// Reports visible to the signed-in user: everything for reviewers, the
    /// assigned projects' reports for vendors.
    pub async fn list_reports(&self, query: &ReportQuery) -> Result<Vec<Report>, OversightError> {
        let actor = self.current_actor().await?;
        let reports = self.repo.list_reports(query).await?;
        if actor.is_admin() {
            return Ok(reports);
        }
        let projects = self.repo.list_projects().await?;
        let own: Vec<&str> = projects
            .iter()
            .filter(|p| actor.require_vendor_of(&p.ivv_vendor_name, "list").is_ok())
            .map(|p| p.id.as_str())
            .collect();
        Ok(reports
            .into_iter()
            .filter(|r| own.contains(&r.project_id.as_str()))
            .collect())
    }

    pub async fn get_report(&self, id: &str) -> Result<Report, OversightError> {
        let actor = self.current_actor().await?;
        let report = self.repo.get_report(id).await?;
        if actor.role == Role::IvvVendor {
            let project = self.repo.get_project(&report.project_id).await?;
            actor.require_vendor_of(&project.ivv_vendor_name, "view report")?;
        }
        Ok(report)
    }

    /// Public view. Unpublished reports answer "not found", not "forbidden".
    pub async fn get_public_report(&self, id: &str) -> Result<Report, OversightError> {
        let report = self.repo.get_report(id).await?;
        if !report.is_public() {
            return Err(DomainError::ReportNotFound(id.to_string()).into());
        }
        Ok(report)
    }

    // --- VENDOR ACTIONS ---

    #[instrument(skip(self))]
    pub async fn create_draft(
        &self,
        project_id: &str,
        period: ReportingPeriod,
    ) -> Result<Report, OversightError> {
        let actor = self.current_actor().await?;
        let project = self.repo.get_project(project_id).await?;
        actor.require_vendor_of(&project.ivv_vendor_name, "create report")?;

        let existing = self
            .repo
            .list_reports(&ReportQuery::for_project(project_id))
            .await?;
        if existing.iter().any(|r| r.period == period) {
            return Err(DomainError::Validation(format!(
                "a report for {} already exists for project '{}'",
                period, project_id
            ))
            .into());
        }

        let report = Report::draft(format!("{}-{}", project_id, period), project_id, period);
        self.save_report(&report).await?;
        info!(report = %report.id, "Draft created");
        Ok(report)
    }

    #[instrument(skip(self, input))]
    pub async fn update_draft(
        &self,
        report_id: &str,
        input: DraftInput,
    ) -> Result<Report, OversightError> {
        let (_, mut report) = self.vendor_report(report_id, "edit report").await?;
        report.apply_draft(input)?;
        self.save_report(&report).await?;
        Ok(report)
    }

    #[instrument(skip(self))]
    pub async fn submit_report(&self, report_id: &str) -> Result<Report, OversightError> {
        let (actor, mut report) = self.vendor_report(report_id, "submit report").await?;
        report.submit(&actor, Utc::now())?;
        self.save_report(&report).await?;
        info!(report = %report.id, by = %actor.user, "Report submitted");
        Ok(report)
    }

    #[instrument(skip(self, input))]
    pub async fn add_finding(
        &self,
        report_id: &str,
        input: FindingInput,
    ) -> Result<Finding, OversightError> {
        let (_, mut report) = self.vendor_report(report_id, "add finding").await?;
        let finding = report.add_finding(input, Utc::now().date_naive())?.clone();
        self.save_report(&report).await?;
        info!(
            report = %report.id,
            finding = %finding.id,
            risk = finding.risk_rating().value(),
            "Finding added"
        );
        Ok(finding)
    }

    #[instrument(skip(self))]
    pub async fn remove_finding(
        &self,
        report_id: &str,
        finding_id: &str,
    ) -> Result<Finding, OversightError> {
        let (_, mut report) = self.vendor_report(report_id, "remove finding").await?;
        let removed = report.remove_finding(finding_id)?;
        self.save_report(&report).await?;
        Ok(removed)
    }

    // --- REVIEWER ACTIONS ---

    #[instrument(skip(self, comment))]
    pub async fn approve_report(
        &self,
        report_id: &str,
        comment: Option<String>,
    ) -> Result<Report, OversightError> {
        let actor = self.current_actor().await?;
        actor.require_admin("approve report")?;
        let mut report = self.repo.get_report(report_id).await?;
        report.approve(&actor, comment.map(ReviewComment::new), Utc::now())?;
        self.save_report(&report).await?;
        info!(report = %report.id, by = %actor.user, "Report approved and published");
        Ok(report)
    }

    #[instrument(skip(self, comment))]
    pub async fn request_changes(
        &self,
        report_id: &str,
        comment: &str,
    ) -> Result<Report, OversightError> {
        let actor = self.current_actor().await?;
        actor.require_admin("request changes")?;
        let mut report = self.repo.get_report(report_id).await?;
        report.request_changes(&actor, ReviewComment::new(comment), Utc::now())?;
        self.save_report(&report).await?;
        info!(report = %report.id, by = %actor.user, "Changes requested");
        Ok(report)
    }

    #[instrument(skip(self))]
    pub async fn set_project_status(
        &self,
        project_id: &str,
        status: ProjectStatus,
    ) -> Result<Project, OversightError> {
        let actor = self.current_actor().await?;
        actor.require_admin("change project status")?;
        let mut project = self.repo.get_project(project_id).await?;
        project.set_status(status)?;
        self.save_project(&project).await?;
        Ok(project)
    }

    #[instrument(skip(self, input), fields(project = %input.id))]
    pub async fn create_project(&self, input: ProjectInput) -> Result<Project, OversightError> {
        let actor = self.current_actor().await?;
        actor.require_admin("create project")?;
        match self.repo.get_project(&input.id).await {
            Ok(_) => {
                return Err(DomainError::Validation(format!(
                    "project '{}' already exists",
                    input.id
                ))
                .into());
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }
        let project = Project::new(input)?;
        self.save_project(&project).await?;
        info!(project = %project.id, "Project registered");
        Ok(project)
    }

    // --- SHARED ACTIONS ---

    /// Reviewers comment on any report past draft; vendors on their own.
    #[instrument(skip(self, comment))]
    pub async fn add_comment(
        &self,
        report_id: &str,
        comment: &str,
    ) -> Result<Report, OversightError> {
        let actor = self.current_actor().await?;
        let mut report = self.repo.get_report(report_id).await?;
        if !actor.is_admin() {
            let project = self.repo.get_project(&report.project_id).await?;
            actor.require_vendor_of(&project.ivv_vendor_name, "comment")?;
        }
        report.add_comment(&actor, ReviewComment::new(comment), Utc::now())?;
        self.save_report(&report).await?;
        Ok(report)
    }

    #[instrument(skip(self))]
    pub async fn update_finding_status(
        &self,
        report_id: &str,
        finding_id: &str,
        status: FindingStatus,
    ) -> Result<Finding, OversightError> {
        let actor = self.current_actor().await?;
        let mut report = self.repo.get_report(report_id).await?;
        if !actor.is_admin() {
            let project = self.repo.get_project(&report.project_id).await?;
            actor.require_vendor_of(&project.ivv_vendor_name, "update finding")?;
        }
        let finding = report
            .update_finding_status(finding_id, status, Utc::now().date_naive())?
            .clone();
        self.save_report(&report).await?;
        Ok(finding)
    }

    // --- HELPERS ---

    async fn vendor_report(
        &self,
        report_id: &str,
        action: &str,
    ) -> Result<(Actor, Report), OversightError> {
        let actor = self.current_actor().await?;
        let report = self.repo.get_report(report_id).await?;
        let project = self.repo.get_project(&report.project_id).await?;
        actor.require_vendor_of(&project.ivv_vendor_name, action)?;
        Ok((actor, report))
    }

    async fn save_report(&self, report: &Report) -> Result<(), OversightError> {
        with_retry(&self.retry, "save_report", || self.repo.save_report(report)).await
    }

    async fn save_project(&self, project: &Project) -> Result<(), OversightError> {
        with_retry(&self.retry, "save_project", || self.repo.save_project(project)).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::rating::Rating;
    use crate::domain::report::{FindingKind, ReportStatus};
    use crate::infrastructure::adapters::{InMemoryRepository, StaticIdentity};
    use crate::infrastructure::error::InfrastructureError;
    use crate::infrastructure::seed::{KEYSTONE, NORTHBRIDGE, demo_dataset};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    // --- FLAKY REPOSITORY ---
    // Fails the first `failures` saves with a transient error.
    struct FlakyRepository {
        inner: InMemoryRepository,
        failures: AtomicU32,
        save_calls: AtomicU32,
    }

    impl FlakyRepository {
        fn fail_next(&self) -> Result<(), OversightError> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            let left = self.failures.load(Ordering::SeqCst);
            if left > 0 {
                self.failures.store(left - 1, Ordering::SeqCst);
                return Err(InfrastructureError::Unavailable("503 from data service".into()).into());
            }
            Ok(())
        }
    }

    #[async_trait]
    impl OversightRepository for FlakyRepository {
        async fn list_projects(&self) -> Result<Vec<Project>, OversightError> {
            self.inner.list_projects().await
        }
        async fn get_project(&self, id: &str) -> Result<Project, OversightError> {
            self.inner.get_project(id).await
        }
        async fn save_project(&self, project: &Project) -> Result<(), OversightError> {
            self.fail_next()?;
            self.inner.save_project(project).await
        }
        async fn list_reports(&self, query: &ReportQuery) -> Result<Vec<Report>, OversightError> {
            self.inner.list_reports(query).await
        }
        async fn get_report(&self, id: &str) -> Result<Report, OversightError> {
            self.inner.get_report(id).await
        }
        async fn save_report(&self, report: &Report) -> Result<(), OversightError> {
            self.fail_next()?;
            self.inner.save_report(report).await
        }
    }

    fn config() -> OversightConfig {
        OversightConfig {
            retry: RetryPolicy {
                max_attempts: 3,
                initial_delay_ms: 1,
                max_delay_ms: 1,
                multiplier: 1.0,
            },
            ..OversightConfig::default()
        }
    }

    fn service_with(repo: Arc<dyn OversightRepository>, actor: Actor) -> OversightService {
        OversightService::new(repo, Arc::new(StaticIdentity::new(actor)), &config())
    }

    fn northbridge() -> Actor {
        Actor::vendor("ana.reyes@northbridge.example", NORTHBRIDGE)
    }

    fn keystone() -> Actor {
        Actor::vendor("sam.oduya@keystone.example", KEYSTONE)
    }

    fn reviewer() -> Actor {
        Actor::admin("lee.park@ets.example")
    }

    fn complete() -> DraftInput {
        DraftInput {
            summary: Some("Integration testing recovered two weeks.".into()),
            overall_rating: Some(Rating::AtRisk),
            people: Some(Rating::OnTrack),
            process: Some(Rating::AtRisk),
            technology: Some(Rating::AtRisk),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_vendor_to_reviewer_workflow() -> anyhow::Result<()> {
        let repo: Arc<dyn OversightRepository> =
            Arc::new(InMemoryRepository::from_dataset(demo_dataset()?)?);
        let vendor = service_with(repo.clone(), northbridge());
        let admin = service_with(repo.clone(), reviewer());

        let period = ReportingPeriod::new(2025, 10)?;
        let draft = vendor.create_draft("p-001", period).await?;
        assert_eq!(draft.id, "p-001-2025-10");
        assert_eq!(draft.status, ReportStatus::Draft);

        vendor.update_draft(&draft.id, complete()).await?;
        let finding = vendor
            .add_finding(
                &draft.id,
                FindingInput {
                    kind: FindingKind::Risk,
                    description: "Cutover window overlaps benefit payment run".into(),
                    impact: 3,
                    likelihood: 3,
                    recommendation: "Move cutover to a weekend".into(),
                },
            )
            .await?;
        assert_eq!(finding.risk_rating().value(), 9);

        // Re-read: the calculated rating still follows impact x likelihood.
        let stored = repo.get_report(&draft.id).await?;
        let f = stored.finding(&finding.id).unwrap();
        assert_eq!(f.risk_rating().value(), f.impact.value() * f.likelihood.value());

        // Public cannot see it yet.
        assert!(admin.get_public_report(&draft.id).await.unwrap_err().is_not_found());

        vendor.submit_report(&draft.id).await?;
        let approved = admin.approve_report(&draft.id, Some("Accepted".into())).await?;
        assert_eq!(approved.status, ReportStatus::Approved);
        assert!(admin.get_public_report(&draft.id).await.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_period_is_rejected() -> anyhow::Result<()> {
        let repo: Arc<dyn OversightRepository> =
            Arc::new(InMemoryRepository::from_dataset(demo_dataset()?)?);
        let vendor = service_with(repo, northbridge());
        let err = vendor
            .create_draft("p-001", ReportingPeriod::new(2025, 9)?)
            .await
            .unwrap_err();
        assert!(matches!(err, OversightError::Domain(DomainError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_role_and_vendor_gating() -> anyhow::Result<()> {
        let repo: Arc<dyn OversightRepository> =
            Arc::new(InMemoryRepository::from_dataset(demo_dataset()?)?);
        let other_vendor = service_with(repo.clone(), keystone());
        let admin = service_with(repo.clone(), reviewer());
        let vendor = service_with(repo.clone(), northbridge());

        // r-002 belongs to a Northbridge project.
        let err = other_vendor.get_report("r-002").await.unwrap_err();
        assert!(matches!(err, OversightError::Domain(DomainError::Unauthorized(_))));
        let err = admin.submit_report("r-005").await.unwrap_err();
        assert!(matches!(err, OversightError::Domain(DomainError::Unauthorized(_))));
        let err = vendor.approve_report("r-002", None).await.unwrap_err();
        assert!(matches!(err, OversightError::Domain(DomainError::Unauthorized(_))));

        let visible = other_vendor.list_reports(&ReportQuery::default()).await?;
        assert!(!visible.is_empty());
        assert!(visible.iter().all(|r| r.project_id == "p-002" || r.project_id == "p-004"));
        Ok(())
    }

    #[tokio::test]
    async fn test_draft_cannot_be_approved_directly() -> anyhow::Result<()> {
        let repo: Arc<dyn OversightRepository> =
            Arc::new(InMemoryRepository::from_dataset(demo_dataset()?)?);
        let admin = service_with(repo.clone(), reviewer());
        let err = admin.approve_report("r-005", None).await.unwrap_err();
        assert!(matches!(
            err,
            OversightError::Domain(DomainError::InvalidTransition { .. })
        ));
        assert_eq!(repo.get_report("r-005").await?.status, ReportStatus::Draft);
        Ok(())
    }

    #[tokio::test]
    async fn test_changes_requested_then_resubmitted() -> anyhow::Result<()> {
        let repo: Arc<dyn OversightRepository> =
            Arc::new(InMemoryRepository::from_dataset(demo_dataset()?)?);
        let vendor = service_with(repo.clone(), northbridge());
        let admin = service_with(repo.clone(), reviewer());

        // r-004 was sent back in the demo data.
        vendor
            .update_draft(
                "r-004",
                DraftInput {
                    summary: Some("Overrun is $150,000; amendment due 2025-11-15.".into()),
                    ..Default::default()
                },
            )
            .await?;
        let resubmitted = vendor.submit_report("r-004").await?;
        assert_eq!(resubmitted.status, ReportStatus::Submitted);

        let sent_back = admin.request_changes("r-004", "Attach the amendment").await?;
        assert_eq!(sent_back.status, ReportStatus::ChangesRequested);
        Ok(())
    }

    #[tokio::test]
    async fn test_transient_save_failures_are_retried() -> anyhow::Result<()> {
        let flaky = Arc::new(FlakyRepository {
            inner: InMemoryRepository::from_dataset(demo_dataset()?)?,
            failures: AtomicU32::new(2),
            save_calls: AtomicU32::new(0),
        });
        let admin = service_with(flaky.clone(), reviewer());

        let approved = admin.approve_report("r-002", None).await?;
        assert_eq!(approved.status, ReportStatus::Approved);
        assert_eq!(flaky.save_calls.load(Ordering::SeqCst), 3);
        assert!(flaky.inner.get_report("r-002").await?.is_public());
        Ok(())
    }

    #[tokio::test]
    async fn test_retry_budget_exhausted_surfaces_transient_error() -> anyhow::Result<()> {
        let flaky = Arc::new(FlakyRepository {
            inner: InMemoryRepository::from_dataset(demo_dataset()?)?,
            failures: AtomicU32::new(10),
            save_calls: AtomicU32::new(0),
        });
        let admin = service_with(flaky.clone(), reviewer());
        let err = admin.approve_report("r-002", None).await.unwrap_err();
        assert!(err.is_transient());
        assert_eq!(flaky.save_calls.load(Ordering::SeqCst), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_admin_project_management() -> anyhow::Result<()> {
        let repo: Arc<dyn OversightRepository> =
            Arc::new(InMemoryRepository::from_dataset(demo_dataset()?)?);
        let admin = service_with(repo.clone(), reviewer());
        let vendor = service_with(repo.clone(), northbridge());

        let inactive = admin.set_project_status("p-001", ProjectStatus::Inactive).await?;
        assert!(!inactive.is_active());
        assert!(vendor
            .set_project_status("p-001", ProjectStatus::Active)
            .await
            .is_err());

        let input = ProjectInput {
            id: "p-001".into(),
            project_name: "Duplicate".into(),
            sponsoring_agency: "Agency".into(),
            ivv_vendor_name: KEYSTONE.into(),
            contract_amount: 10,
            amount_paid: 0,
            start_date: chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            planned_end_date: chrono::NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            projected_end_date: None,
            overall_project_status: Rating::OnTrack,
            description: None,
        };
        assert!(admin.create_project(input.clone()).await.is_err());

        let created = admin
            .create_project(ProjectInput {
                id: "p-010".into(),
                ..input
            })
            .await?;
        assert_eq!(repo.get_project("p-010").await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn test_finding_status_by_reviewer_after_publication() -> anyhow::Result<()> {
        let repo: Arc<dyn OversightRepository> =
            Arc::new(InMemoryRepository::from_dataset(demo_dataset()?)?);
        let admin = service_with(repo.clone(), reviewer());
        let closed = admin
            .update_finding_status("r-001", "r-001-f1", FindingStatus::Closed)
            .await?;
        assert_eq!(closed.status, FindingStatus::Closed);
        assert!(closed.closed_on.is_some());

        let vendor = service_with(repo, northbridge());
        let err = vendor.remove_finding("r-001", "r-001-f2").await.unwrap_err();
        assert!(matches!(err, OversightError::Domain(DomainError::ReportLocked { .. })));
        Ok(())
    }
}
