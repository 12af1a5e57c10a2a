// oversight/src/commands/finding.rs
//
// USE CASES: Record, progress and remove findings.

use anyhow::Result;

use oversight_core::application::FindingView;
use oversight_core::domain::{FindingInput, FindingKind, FindingStatus};

use super::context::Session;
use super::output::print_json;

pub struct NewFinding {
    pub kind: FindingKind,
    pub description: String,
    pub impact: u8,
    pub likelihood: u8,
    pub recommendation: String,
}

pub async fn add(session: &Session, report_id: &str, new: NewFinding) -> Result<()> {
    let service = session.service()?;
    let finding = service
        .add_finding(
            report_id,
            FindingInput {
                kind: new.kind,
                description: new.description,
                impact: new.impact,
                likelihood: new.likelihood,
                recommendation: new.recommendation,
            },
        )
        .await?;
    let view = FindingView::new(&finding, service.severity_policy());

    if session.json() {
        return print_json(&view);
    }
    println!(
        "⚠️  Finding {} recorded: {} x {} = {} ({})",
        view.id,
        view.impact,
        view.likelihood,
        view.calculated_risk_rating,
        view.severity.label()
    );
    Ok(())
}

pub async fn set_status(
    session: &Session,
    report_id: &str,
    finding_id: &str,
    status: FindingStatus,
) -> Result<()> {
    let service = session.service()?;
    let finding = service
        .update_finding_status(report_id, finding_id, status)
        .await?;

    if session.json() {
        return print_json(&FindingView::new(&finding, service.severity_policy()));
    }
    println!("🔁 Finding {} is now {}", finding.id, finding.status.as_str());
    Ok(())
}

pub async fn remove(session: &Session, report_id: &str, finding_id: &str) -> Result<()> {
    let service = session.service()?;
    let removed = service.remove_finding(report_id, finding_id).await?;
    println!("🗑️  Finding {} removed from report {}", removed.id, report_id);
    Ok(())
}
