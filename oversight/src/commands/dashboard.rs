// oversight/src/commands/dashboard.rs
//
// USE CASE: Role landing pages.

use anyhow::Result;
use comfy_table::Cell;

use oversight_core::application::{admin_dashboard, vendor_dashboard};

use super::context::Session;
use super::output::{money, percent, print_json, rating_cell, status_cell, table};

pub async fn admin(session: &Session) -> Result<()> {
    let service = session.service()?;
    let dash = admin_dashboard(&service).await?;

    if session.json() {
        return print_json(&dash);
    }

    println!(
        "🧭 Portfolio: {} projects ({} active)",
        dash.total_projects, dash.active_projects
    );
    println!(
        "   Ratings:  {} on track, {} at risk, {} critical",
        dash.ratings.on_track, dash.ratings.at_risk, dash.ratings.critical
    );
    println!(
        "   Budget:   {} of {} paid ({})",
        money(dash.budget.paid_total),
        money(dash.budget.contract_total),
        percent(dash.budget.budget_used_percent)
    );
    if !dash.budget.over_budget_projects.is_empty() {
        println!("   ⚠️  Over contract: {}", dash.budget.over_budget_projects.join(", "));
    }
    if !dash.budget.behind_schedule_projects.is_empty() {
        println!("   ⏳ Behind schedule: {}", dash.budget.behind_schedule_projects.join(", "));
    }
    println!(
        "   Open findings: {} high, {} medium, {} low",
        dash.open_findings.high, dash.open_findings.medium, dash.open_findings.low
    );

    if dash.awaiting_review.is_empty() {
        println!("\n✅ No reports awaiting review.");
    } else {
        let mut t = table(vec!["Awaiting review", "Project", "Period"]);
        for item in &dash.awaiting_review {
            t.add_row(vec![
                Cell::new(&item.report_id),
                Cell::new(&item.project_id),
                Cell::new(&item.period),
            ]);
        }
        println!("\n{}", t);
    }
    Ok(())
}

pub async fn vendor(session: &Session) -> Result<()> {
    let service = session.service()?;
    let dash = vendor_dashboard(&service).await?;

    if session.json() {
        return print_json(&dash);
    }

    println!("🧭 {}: {} assigned project(s)", dash.vendor, dash.projects.len());
    let mut t = table(vec!["Project", "Rating", "Budget used", "Schedule"]);
    for p in &dash.projects {
        t.add_row(vec![
            Cell::new(&p.project_name),
            rating_cell(p.rating.value),
            Cell::new(percent(p.budget_used_percent)),
            Cell::new(p.schedule.to_string()),
        ]);
    }
    println!("{}", t);

    let mut by_status = table(vec!["Status", "Reports"]);
    for (status, count) in &dash.reports_by_status {
        by_status.add_row(vec![status_cell(*status), Cell::new(count)]);
    }
    println!("\n{}", by_status);

    for item in &dash.changes_requested {
        println!("↩️  Changes requested on {} ({})", item.report_id, item.period);
    }
    for item in &dash.drafts {
        println!("✏️  Draft in progress: {} ({})", item.report_id, item.period);
    }
    println!("   Open findings: {}", dash.open_findings.total());
    Ok(())
}
