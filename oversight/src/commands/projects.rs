// oversight/src/commands/projects.rs
//
// USE CASES: Project listing, detail, registration and lifecycle (admin).

use anyhow::Result;
use comfy_table::Cell;

use oversight_core::application::{ProjectView, ReportView};
use oversight_core::domain::{ProjectInput, ProjectStatus};
use oversight_core::ports::ReportQuery;

use crate::cli::RegisterArgs;

use super::context::Session;
use super::output::{
    money, optional_rating_cell, percent, print_json, rating_cell, status_cell, table,
};

pub async fn list(session: &Session) -> Result<()> {
    let service = session.service()?;
    let views: Vec<ProjectView> = service
        .get_projects()
        .await?
        .iter()
        .map(ProjectView::from)
        .collect();

    if session.json() {
        return print_json(&views);
    }

    let mut t = table(vec![
        "ID",
        "Project",
        "IV&V vendor",
        "Status",
        "Rating",
        "Paid",
        "Contract",
        "Used",
        "Delay (days)",
    ]);
    for p in &views {
        t.add_row(vec![
            Cell::new(&p.id),
            Cell::new(&p.project_name),
            Cell::new(&p.ivv_vendor_name),
            Cell::new(p.status.as_str()),
            rating_cell(p.rating.value),
            Cell::new(money(p.amount_paid)),
            Cell::new(money(p.contract_amount)),
            Cell::new(percent(p.budget_used_percent)),
            Cell::new(p.schedule_delay_days),
        ]);
    }
    println!("{}", t);
    Ok(())
}

pub async fn show(session: &Session, id: &str) -> Result<()> {
    let service = session.service()?;
    let project = service.get_project(id).await?;
    let reports = service.list_reports(&ReportQuery::for_project(id)).await?;
    let view = ProjectView::from(&project);

    if session.json() {
        let policy = service.severity_policy();
        let reports: Vec<ReportView> = reports.iter().map(|r| ReportView::new(r, policy)).collect();
        return print_json(&serde_json::json!({ "project": view, "reports": reports }));
    }

    let display = view.rating.display;
    println!("🔎 {} ({})", view.project_name, view.id);
    println!("   Agency:        {}", view.sponsoring_agency);
    println!("   IV&V vendor:   {}", view.ivv_vendor_name);
    println!("   Lifecycle:     {}", view.status.as_str());
    println!("   Rating:        {} [{}]", display.label, display.icon);
    println!(
        "   Budget:        {} of {} paid ({}){}",
        money(view.amount_paid),
        money(view.contract_amount),
        percent(view.budget_used_percent),
        if view.over_budget { " ⚠️ over contract" } else { "" }
    );
    println!(
        "   Schedule:      planned {}, projected {} ({})",
        view.planned_end_date, view.projected_end_date, view.schedule
    );
    if let Some(description) = &project.description {
        println!("   {}", description);
    }

    if reports.is_empty() {
        println!("\n   No reports visible.");
        return Ok(());
    }
    let mut t = table(vec!["Report", "Period", "Status", "Overall", "Open findings"]);
    for r in &reports {
        t.add_row(vec![
            Cell::new(&r.id),
            Cell::new(r.period.label()),
            status_cell(r.status),
            optional_rating_cell(r.overall_rating),
            Cell::new(r.open_findings().count()),
        ]);
    }
    println!("\n{}", t);
    Ok(())
}

pub async fn register(session: &Session, args: RegisterArgs) -> Result<()> {
    let service = session.service()?;
    let project = service
        .create_project(ProjectInput {
            id: args.id,
            project_name: args.name,
            sponsoring_agency: args.agency,
            ivv_vendor_name: args.ivv_vendor,
            contract_amount: args.contract,
            amount_paid: args.paid,
            start_date: args.start,
            planned_end_date: args.planned_end,
            projected_end_date: args.projected_end,
            overall_project_status: args.rating,
            description: args.description,
        })
        .await?;

    if session.json() {
        return print_json(&ProjectView::from(&project));
    }
    println!("🆕 Registered {} ({})", project.project_name, project.id);
    Ok(())
}

pub async fn set_status(session: &Session, id: &str, status: ProjectStatus) -> Result<()> {
    let service = session.service()?;
    let project = service.set_project_status(id, status).await?;
    println!("🔁 {} is now {}", project.id, project.status.as_str());
    Ok(())
}
