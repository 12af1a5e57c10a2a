// oversight/src/commands/reports.rs
//
// USE CASES: Report listing and detail.

use anyhow::Result;
use comfy_table::Cell;

use oversight_core::application::ReportView;
use oversight_core::domain::{Rating, ReportStatus};
use oversight_core::ports::ReportQuery;

use super::context::Session;
use super::output::{optional_rating_cell, print_json, severity_cell, status_cell, table};

pub async fn list(
    session: &Session,
    project: Option<String>,
    status: Option<ReportStatus>,
) -> Result<()> {
    let service = session.service()?;
    let query = ReportQuery {
        project_id: project,
        status,
    };
    let reports = service.list_reports(&query).await?;

    if session.json() {
        let policy = service.severity_policy();
        let views: Vec<ReportView> = reports.iter().map(|r| ReportView::new(r, policy)).collect();
        return print_json(&views);
    }

    let mut t = table(vec!["Report", "Project", "Period", "Status", "Overall", "Findings"]);
    for r in &reports {
        t.add_row(vec![
            Cell::new(&r.id),
            Cell::new(&r.project_id),
            Cell::new(r.period),
            status_cell(r.status),
            optional_rating_cell(r.overall_rating),
            Cell::new(r.findings.len()),
        ]);
    }
    println!("{}", t);
    println!("{} report(s)", reports.len());
    Ok(())
}

pub async fn show(session: &Session, id: &str, public: bool) -> Result<()> {
    let service = session.service()?;
    let policy = *service.severity_policy();
    let view = if public {
        ReportView::public(&service.get_public_report(id).await?, &policy)
    } else {
        ReportView::new(&service.get_report(id).await?, &policy)
    };

    if session.json() {
        return print_json(&view);
    }
    render(&view);
    Ok(())
}

pub fn render(view: &ReportView) {
    println!(
        "📄 {} | {} | {} | {}",
        view.id, view.project_id, view.period_label, view.status_label
    );
    if let Some(rating) = &view.overall_rating {
        println!("   Overall:    {}", rating.display.label);
    }
    let dim = |r: Option<Rating>| {
        r.map(|r| r.display().label).unwrap_or("-")
    };
    println!(
        "   People: {}  Process: {}  Technology: {}",
        dim(view.dimensions.people),
        dim(view.dimensions.process),
        dim(view.dimensions.technology)
    );
    if !view.summary.is_empty() {
        println!("   Summary:    {}", view.summary);
    }
    for a in &view.achievements {
        println!("   ✔ {}", a);
    }
    for c in &view.challenges {
        println!("   ✖ {}", c);
    }

    if !view.findings.is_empty() {
        let mut t = table(vec![
            "Finding",
            "Type",
            "Description",
            "I",
            "L",
            "Risk",
            "Severity",
            "Status",
        ]);
        for f in &view.findings {
            t.add_row(vec![
                Cell::new(&f.id),
                Cell::new(f.kind),
                Cell::new(&f.description),
                Cell::new(f.impact),
                Cell::new(f.likelihood),
                Cell::new(f.calculated_risk_rating),
                severity_cell(f.severity),
                Cell::new(f.status.as_str()),
            ]);
        }
        println!("\n{}", t);
    }

    if !view.review_log.is_empty() {
        println!("\n   Review log:");
        for e in &view.review_log {
            match &e.comment {
                Some(c) => println!(
                    "   {} {} ({}): {}",
                    e.at.format("%Y-%m-%d"),
                    e.action,
                    e.actor,
                    c
                ),
                None => println!("   {} {} ({})", e.at.format("%Y-%m-%d"), e.action, e.actor),
            }
        }
    }
}
