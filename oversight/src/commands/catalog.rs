// oversight/src/commands/catalog.rs
//
// USE CASE: Public catalog (what an anonymous visitor sees).

use anyhow::Result;
use comfy_table::Cell;

use oversight_core::application::CatalogGenerator;

use super::context::Session;
use super::output::{money, percent, print_json, rating_cell, table};

pub async fn execute(session: &Session) -> Result<()> {
    let config = session.config()?;
    let service = session.service()?;
    let catalog = CatalogGenerator::build(service.repository().as_ref(), &config.catalog).await?;

    if session.json() {
        return print_json(&catalog);
    }

    println!("📚 {}: public project catalog\n", config.name);
    let mut t = table(vec![
        "Project",
        "Agency",
        "Status",
        "Budget used",
        "Contract",
        "Schedule",
        "Latest report",
    ]);
    for entry in &catalog.entries {
        let p = &entry.project;
        t.add_row(vec![
            Cell::new(&p.project_name),
            Cell::new(&p.sponsoring_agency),
            rating_cell(p.rating.value),
            Cell::new(percent(p.budget_used_percent)),
            Cell::new(money(p.contract_amount)),
            Cell::new(p.schedule.to_string()),
            Cell::new(
                entry
                    .latest_report
                    .as_ref()
                    .map(|r| r.period_label.clone())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }
    println!("{}", t);

    let s = &catalog.stats;
    let unknown = match s.unknown {
        0 => String::new(),
        n => format!(", {} unknown", n),
    };
    println!(
        "\n📊 {} projects: {} on track, {} at risk, {} critical{} ({} published reports)",
        s.total_projects, s.on_track, s.at_risk, s.critical, unknown, s.published_reports
    );
    Ok(())
}
