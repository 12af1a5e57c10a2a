// oversight/src/commands/seed.rs
//
// USE CASE: Write the demo portfolio so the other commands have data.

use anyhow::{Result, bail};

use oversight_core::infrastructure::dataset::save_dataset;
use oversight_core::infrastructure::seed::demo_dataset;

use super::context::Session;

pub fn execute(session: &Session, force: bool) -> Result<()> {
    let config = session.config()?;
    let path = session.dataset_path(&config);

    if path.exists() && !force {
        bail!(
            "Dataset already exists at {}\n👉 Use --force to overwrite it.",
            path.display()
        );
    }

    let dataset = demo_dataset()?;
    save_dataset(&path, &dataset)?;

    println!(
        "🌱 Wrote demo dataset ({} projects, {} reports) to {}",
        dataset.projects.len(),
        dataset.reports.len(),
        path.display()
    );
    Ok(())
}
