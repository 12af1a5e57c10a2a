// oversight-core/src/infrastructure/seed.rs

// Demo portfolio used by `oversight seed` and by tests. Reports are driven
// through the real workflow so review logs and timestamps are consistent.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::domain::actor::Actor;
use crate::domain::error::DomainError;
use crate::domain::project::{Project, ProjectStatus};
use crate::domain::rating::Rating;
use crate::domain::report::{
    DraftInput, FindingInput, FindingKind, FindingStatus, Report, ReportingPeriod, ReviewComment,
};
use crate::infrastructure::dataset::Dataset;

pub const NORTHBRIDGE: &str = "Northbridge Assurance";
pub const KEYSTONE: &str = "Keystone IV&V";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    date(y, m, d).and_time(NaiveTime::MIN).and_utc()
}

#[allow(clippy::too_many_arguments)]
fn project(
    id: &str,
    name: &str,
    agency: &str,
    vendor: &str,
    contract: u64,
    paid: u64,
    dates: (NaiveDate, NaiveDate, NaiveDate),
    rating: Rating,
    status: ProjectStatus,
) -> Project {
    Project {
        id: id.to_string(),
        project_name: name.to_string(),
        sponsoring_agency: agency.to_string(),
        ivv_vendor_name: vendor.to_string(),
        contract_amount: contract,
        amount_paid: paid,
        start_date: dates.0,
        planned_end_date: dates.1,
        projected_end_date: dates.2,
        overall_project_status: rating,
        status,
        description: None,
    }
}

fn content(summary: &str, overall: Rating, dims: [Rating; 3]) -> DraftInput {
    DraftInput {
        summary: Some(summary.to_string()),
        overall_rating: Some(overall),
        people: Some(dims[0]),
        process: Some(dims[1]),
        technology: Some(dims[2]),
        achievements: None,
        challenges: None,
    }
}

fn finding(
    kind: FindingKind,
    description: &str,
    impact: u8,
    likelihood: u8,
    recommendation: &str,
) -> FindingInput {
    FindingInput {
        kind,
        description: description.to_string(),
        impact,
        likelihood,
        recommendation: recommendation.to_string(),
    }
}

pub fn demo_projects() -> Vec<Project> {
    vec![
        project(
            "p-001",
            "Unemployment Insurance Modernization",
            "Department of Labor",
            NORTHBRIDGE,
            2_450_000,
            1_592_500,
            (date(2024, 1, 15), date(2025, 9, 22), date(2025, 11, 11)),
            Rating::AtRisk,
            ProjectStatus::Active,
        ),
        project(
            "p-002",
            "Statewide Case Management System",
            "Department of Human Services",
            KEYSTONE,
            5_800_000,
            2_030_000,
            (date(2024, 6, 1), date(2026, 6, 30), date(2026, 6, 30)),
            Rating::OnTrack,
            ProjectStatus::Active,
        ),
        project(
            "p-003",
            "Driver Licensing Platform Replacement",
            "Department of Motor Vehicles",
            NORTHBRIDGE,
            3_200_000,
            3_350_000,
            (date(2023, 3, 1), date(2025, 3, 31), date(2025, 12, 15)),
            Rating::Critical,
            ProjectStatus::Active,
        ),
        project(
            "p-004",
            "Tax Filing Portal Upgrade",
            "Department of Taxation",
            KEYSTONE,
            900_000,
            900_000,
            (date(2023, 1, 9), date(2024, 6, 30), date(2024, 6, 14)),
            Rating::OnTrack,
            ProjectStatus::Inactive,
        ),
    ]
}

pub fn demo_reports() -> Result<Vec<Report>, DomainError> {
    let northbridge = Actor::vendor("ana.reyes@northbridge.example", NORTHBRIDGE);
    let keystone = Actor::vendor("sam.oduya@keystone.example", KEYSTONE);
    let reviewer = Actor::admin("lee.park@ets.example");

    // p-001, August: published with two findings.
    let mut r1 = Report::draft("r-001", "p-001", ReportingPeriod::containing(date(2025, 8, 1)));
    r1.apply_draft(DraftInput {
        achievements: Some(vec!["Claims intake module accepted".into()]),
        challenges: Some(vec!["Interface testing behind plan".into()]),
        ..content(
            "Build is progressing but integration testing is slipping against the vendor plan.",
            Rating::AtRisk,
            [Rating::OnTrack, Rating::AtRisk, Rating::AtRisk],
        )
    })?;
    r1.add_finding(
        finding(
            FindingKind::Risk,
            "Data conversion has not been rehearsed at production volume",
            3,
            2,
            "Schedule a full-volume mock conversion before UAT",
        ),
        date(2025, 8, 28),
    )?;
    r1.add_finding(
        finding(
            FindingKind::Issue,
            "Test environment unavailable for 9 business days",
            2,
            2,
            "Add environment uptime to the weekly status report",
        ),
        date(2025, 8, 28),
    )?;
    r1.submit(&northbridge, at(2025, 9, 3))?;
    r1.approve(&reviewer, None, at(2025, 9, 8))?;
    r1.update_finding_status("r-001-f2", FindingStatus::InProgress, date(2025, 9, 10))?;

    // p-001, September: awaiting review.
    let mut r2 = Report::draft("r-002", "p-001", ReportingPeriod::containing(date(2025, 9, 1)));
    r2.apply_draft(content(
        "Go-live moved to November; vendor recovery plan under review.",
        Rating::AtRisk,
        [Rating::AtRisk, Rating::AtRisk, Rating::AtRisk],
    ))?;
    r2.submit(&northbridge, at(2025, 10, 2))?;

    // p-002, September: published, no findings.
    let mut r3 = Report::draft("r-003", "p-002", ReportingPeriod::containing(date(2025, 9, 1)));
    r3.apply_draft(content(
        "Design sprints completed on schedule; staffing stable.",
        Rating::OnTrack,
        [Rating::OnTrack, Rating::OnTrack, Rating::OnTrack],
    ))?;
    r3.submit(&keystone, at(2025, 10, 1))?;
    r3.approve(&reviewer, Some(ReviewComment::new("Thorough report.")), at(2025, 10, 3))?;

    // p-003, September: sent back to the vendor.
    let mut r4 = Report::draft("r-004", "p-003", ReportingPeriod::containing(date(2025, 9, 1)));
    r4.apply_draft(content(
        "Contract value exceeded; scope reduction being negotiated.",
        Rating::Critical,
        [Rating::AtRisk, Rating::Critical, Rating::Critical],
    ))?;
    r4.add_finding(
        finding(
            FindingKind::Issue,
            "Payments exceed contract ceiling without an approved amendment",
            3,
            3,
            "Freeze invoices pending a contract amendment",
        ),
        date(2025, 9, 25),
    )?;
    r4.submit(&northbridge, at(2025, 10, 1))?;
    r4.request_changes(
        &reviewer,
        ReviewComment::new("Quantify the overrun and attach the amendment timeline."),
        at(2025, 10, 4),
    )?;

    // p-002, October: vendor draft in progress.
    let mut r5 = Report::draft("r-005", "p-002", ReportingPeriod::containing(date(2025, 10, 1)));
    r5.apply_draft(DraftInput {
        summary: Some("Build phase kickoff.".into()),
        ..Default::default()
    })?;

    // p-004, final report of a closed-out project.
    let mut r6 = Report::draft("r-006", "p-004", ReportingPeriod::containing(date(2024, 6, 1)));
    r6.apply_draft(content(
        "Portal delivered two weeks early and within budget.",
        Rating::OnTrack,
        [Rating::OnTrack, Rating::OnTrack, Rating::OnTrack],
    ))?;
    r6.submit(&keystone, at(2024, 7, 2))?;
    r6.approve(&reviewer, None, at(2024, 7, 5))?;

    Ok(vec![r1, r2, r3, r4, r5, r6])
}

pub fn demo_dataset() -> Result<Dataset, DomainError> {
    let dataset = Dataset {
        projects: demo_projects(),
        reports: demo_reports()?,
    };
    dataset.check()?;
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::ReportStatus;

    #[test]
    fn test_demo_dataset_is_consistent() -> anyhow::Result<()> {
        let dataset = demo_dataset()?;
        assert_eq!(dataset.projects.len(), 4);
        assert_eq!(dataset.reports.len(), 6);

        let status_of = |id: &str| {
            dataset
                .reports
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.status)
        };
        assert_eq!(status_of("r-001"), Some(ReportStatus::Approved));
        assert_eq!(status_of("r-002"), Some(ReportStatus::Submitted));
        assert_eq!(status_of("r-004"), Some(ReportStatus::ChangesRequested));
        assert_eq!(status_of("r-005"), Some(ReportStatus::Draft));
        Ok(())
    }

    #[test]
    fn test_reference_project_variance() -> anyhow::Result<()> {
        let projects = demo_projects();
        let ui = &projects[0];
        assert_eq!(ui.budget_used_percent()?, 65);
        assert_eq!(ui.schedule_delay_days(), 50);
        Ok(())
    }
}
