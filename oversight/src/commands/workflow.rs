// oversight/src/commands/workflow.rs
//
// USE CASES: Draft -> Submitted -> Approved, with changes requested in between.

use anyhow::Result;

use oversight_core::application::{OversightService, ReportView};
use oversight_core::domain::{DraftInput, Report, ReportingPeriod};

use crate::cli::ContentArgs;

use super::context::Session;
use super::output::print_json;

impl ContentArgs {
    fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.overall.is_none()
            && self.people.is_none()
            && self.process.is_none()
            && self.technology.is_none()
            && self.achievements.is_empty()
            && self.challenges.is_empty()
    }

    fn into_input(self) -> DraftInput {
        let list = |items: Vec<String>| (!items.is_empty()).then_some(items);
        DraftInput {
            summary: self.summary,
            overall_rating: self.overall,
            people: self.people,
            process: self.process,
            technology: self.technology,
            achievements: list(self.achievements),
            challenges: list(self.challenges),
        }
    }
}

fn report_out(
    session: &Session,
    service: &OversightService,
    report: &Report,
    message: String,
) -> Result<()> {
    if session.json() {
        return print_json(&ReportView::new(report, service.severity_policy()));
    }
    println!("{}", message);
    Ok(())
}

pub async fn draft_new(
    session: &Session,
    project: &str,
    period: ReportingPeriod,
    content: ContentArgs,
) -> Result<()> {
    let service = session.service()?;
    let mut report = service.create_draft(project, period).await?;
    if !content.is_empty() {
        report = service.update_draft(&report.id, content.into_input()).await?;
    }
    let missing = report.missing_for_submission();
    let hint = if missing.is_empty() {
        "ready to submit".to_string()
    } else {
        format!("still missing: {}", missing.join(", "))
    };
    report_out(
        session,
        &service,
        &report,
        format!("✏️  Draft {} created for {} ({})", report.id, report.period.label(), hint),
    )
}

pub async fn draft_edit(session: &Session, id: &str, content: ContentArgs) -> Result<()> {
    let service = session.service()?;
    let report = service.update_draft(id, content.into_input()).await?;
    report_out(session, &service, &report, format!("✏️  Report {} updated", report.id))
}

pub async fn submit(session: &Session, id: &str) -> Result<()> {
    let service = session.service()?;
    let report = service.submit_report(id).await?;
    let msg = format!("📤 Report {} submitted for review", report.id);
    report_out(session, &service, &report, msg)
}

pub async fn approve(session: &Session, id: &str, comment: Option<String>) -> Result<()> {
    let service = session.service()?;
    let report = service.approve_report(id, comment).await?;
    let msg = format!("✅ Report {} approved and published", report.id);
    report_out(session, &service, &report, msg)
}

pub async fn request_changes(session: &Session, id: &str, comment: &str) -> Result<()> {
    let service = session.service()?;
    let report = service.request_changes(id, comment).await?;
    report_out(
        session,
        &service,
        &report,
        format!("↩️  Changes requested on report {}", report.id),
    )
}

pub async fn comment(session: &Session, id: &str, text: &str) -> Result<()> {
    let service = session.service()?;
    let report = service.add_comment(id, text).await?;
    let msg = format!(
        "💬 Comment added to report {} ({} log entries)",
        report.id,
        report.review_log.len()
    );
    report_out(session, &service, &report, msg)
}
