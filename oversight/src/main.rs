// oversight/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

use oversight_core::OversightError;
use oversight_core::domain::DomainError;
use oversight_core::infrastructure::error::InfrastructureError;

use cli::{Cli, Commands, DashboardCommand, DraftCommand, FindingCommand};
use commands::context::Session;
use commands::finding::NewFinding;

#[tokio::main]
async fn main() {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug oversight approve r-002 to see the details.
    // Logs go to stderr so `--format json` stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("❌ {:#}", e);
        if let Some((code, help)) = diagnostic_of(&e) {
            match help {
                Some(help) => eprintln!("   [{}] 👉 {}", code, help),
                None => eprintln!("   [{}]", code),
            }
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let session = Session::from_cli(&cli)?;

    match cli.command {
        Commands::Seed { force } => commands::seed::execute(&session, force),
        Commands::Catalog => commands::catalog::execute(&session).await,
        Commands::Projects => commands::projects::list(&session).await,
        Commands::Project { id } => commands::projects::show(&session, &id).await,
        Commands::Register(args) => commands::projects::register(&session, args).await,
        Commands::ProjectStatus { id, status } => {
            commands::projects::set_status(&session, &id, status).await
        }
        Commands::Reports { project, status } => {
            commands::reports::list(&session, project, status).await
        }
        Commands::Report { id, public } => commands::reports::show(&session, &id, public).await,
        Commands::Draft(DraftCommand::New {
            project,
            period,
            content,
        }) => commands::workflow::draft_new(&session, &project, period, content).await,
        Commands::Draft(DraftCommand::Edit { id, content }) => {
            commands::workflow::draft_edit(&session, &id, content).await
        }
        Commands::Submit { id } => commands::workflow::submit(&session, &id).await,
        Commands::Approve { id, comment } => {
            commands::workflow::approve(&session, &id, comment).await
        }
        Commands::RequestChanges { id, comment } => {
            commands::workflow::request_changes(&session, &id, &comment).await
        }
        Commands::Comment { id, text } => commands::workflow::comment(&session, &id, &text).await,
        Commands::Finding(FindingCommand::Add {
            report,
            kind,
            description,
            impact,
            likelihood,
            recommendation,
        }) => {
            let new = NewFinding {
                kind,
                description,
                impact,
                likelihood,
                recommendation,
            };
            commands::finding::add(&session, &report, new).await
        }
        Commands::Finding(FindingCommand::Status {
            report,
            finding,
            status,
        }) => commands::finding::set_status(&session, &report, &finding, status).await,
        Commands::Finding(FindingCommand::Remove { report, finding }) => {
            commands::finding::remove(&session, &report, &finding).await
        }
        Commands::Score { impact, likelihood } => {
            commands::score::score(&session, impact, likelihood)
        }
        Commands::Variance(args) => commands::score::variance(&session, args).await,
        Commands::Dashboard(DashboardCommand::Admin) => commands::dashboard::admin(&session).await,
        Commands::Dashboard(DashboardCommand::Vendor) => {
            commands::dashboard::vendor(&session).await
        }
    }
}

/// Code and help of the first domain or infrastructure error in the chain.
fn diagnostic_of(err: &anyhow::Error) -> Option<(String, Option<String>)> {
    err.chain().find_map(|cause| {
        let diagnostic: &dyn Diagnostic = if let Some(e) = cause.downcast_ref::<OversightError>() {
            match e {
                OversightError::Domain(inner) => inner,
                OversightError::Infrastructure(inner) => inner,
                OversightError::InternalError(_) => return None,
            }
        } else if let Some(e) = cause.downcast_ref::<DomainError>() {
            e
        } else if let Some(e) = cause.downcast_ref::<InfrastructureError>() {
            e
        } else {
            return None;
        };
        let code = diagnostic.code()?.to_string();
        Some((code, diagnostic.help().map(|h| h.to_string())))
    })
}
