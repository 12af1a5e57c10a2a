// oversight/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use oversight_core::domain::{
    FindingKind, FindingStatus, ProjectStatus, Rating, ReportStatus, ReportingPeriod, Role,
};

#[derive(Parser)]
#[command(name = "oversight")]
#[command(
    about = "IT project oversight: ratings, risk scoring and the report review workflow",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Project directory (holds oversight.yaml and the dataset)
    #[arg(long, global = true, default_value = ".", env = "OVERSIGHT_PROJECT_DIR")]
    pub project_dir: PathBuf,

    /// Acting role: admin (ETS reviewer) or vendor (IV&V)
    #[arg(long, global = true, default_value = "admin", env = "OVERSIGHT_ROLE")]
    pub role: Role,

    /// Vendor organisation, required with --role vendor
    #[arg(long, global = true, env = "OVERSIGHT_VENDOR")]
    pub vendor: Option<String>,

    /// Acting user (recorded in the review log)
    #[arg(long, global = true, default_value = "reviewer@ets.example", env = "OVERSIGHT_USER")]
    pub user: String,

    /// Output format for listings
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🌱 Writes the demo portfolio to the dataset file
    Seed {
        /// Overwrite an existing dataset
        #[arg(long)]
        force: bool,
    },

    /// 📚 Public catalog: active projects and their latest published report
    Catalog,

    /// 📋 Lists all projects with budget and schedule variance
    Projects,

    /// 🔎 Shows one project and its reports
    Project { id: String },

    /// 🆕 Registers a new project (admin)
    Register(RegisterArgs),

    /// 🔁 Marks a project active or inactive (admin)
    ProjectStatus { id: String, status: ProjectStatus },

    /// 🗂️ Lists reports visible to the acting user
    Reports {
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        status: Option<ReportStatus>,
    },

    /// 📄 Shows a report with its findings
    Report {
        id: String,
        /// Render the published view (fails for unpublished reports)
        #[arg(long)]
        public: bool,
    },

    /// ✏️ Creates or edits a draft report (vendor)
    #[command(subcommand)]
    Draft(DraftCommand),

    /// 📤 Submits a report for review (vendor)
    Submit { id: String },

    /// ✅ Approves and publishes a submitted report (admin)
    Approve {
        id: String,
        #[arg(long)]
        comment: Option<String>,
    },

    /// ↩️ Sends a submitted report back to the vendor (admin)
    RequestChanges {
        id: String,
        #[arg(long)]
        comment: String,
    },

    /// 💬 Adds a comment to a report's review log
    Comment { id: String, text: String },

    /// ⚠️ Manages findings on a report
    #[command(subcommand)]
    Finding(FindingCommand),

    /// 🎯 Scores impact x likelihood and names the severity band
    Score { impact: u8, likelihood: u8 },

    /// 📊 Computes budget used and schedule delay
    Variance(VarianceArgs),

    /// 🧭 Role landing pages
    #[command(subcommand)]
    Dashboard(DashboardCommand),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ContentArgs {
    #[arg(long)]
    pub summary: Option<String>,
    #[arg(long)]
    pub overall: Option<Rating>,
    #[arg(long)]
    pub people: Option<Rating>,
    #[arg(long)]
    pub process: Option<Rating>,
    #[arg(long)]
    pub technology: Option<Rating>,
    /// Repeatable; replaces the list when given
    #[arg(long = "achievement")]
    pub achievements: Vec<String>,
    /// Repeatable; replaces the list when given
    #[arg(long = "challenge")]
    pub challenges: Vec<String>,
}

#[derive(Subcommand)]
pub enum DraftCommand {
    /// Starts the draft for a project and reporting month
    New {
        #[arg(long)]
        project: String,
        /// Reporting month, YYYY-MM
        #[arg(long)]
        period: ReportingPeriod,
        #[command(flatten)]
        content: ContentArgs,
    },
    /// Updates the content of a draft (or a report sent back for changes)
    Edit {
        id: String,
        #[command(flatten)]
        content: ContentArgs,
    },
}

#[derive(Subcommand)]
pub enum FindingCommand {
    /// Records a risk or issue
    Add {
        report: String,
        #[arg(long = "type", default_value = "risk")]
        kind: FindingKind,
        #[arg(long)]
        description: String,
        #[arg(long)]
        impact: u8,
        #[arg(long)]
        likelihood: u8,
        #[arg(long, default_value = "")]
        recommendation: String,
    },
    /// Moves a finding through open, in-progress, closed
    Status {
        report: String,
        finding: String,
        status: FindingStatus,
    },
    /// Deletes a finding from an editable report
    Remove { report: String, finding: String },
}

#[derive(Subcommand)]
pub enum DashboardCommand {
    /// Reviewer portfolio overview
    Admin,
    /// Vendor overview of assigned projects
    Vendor,
}

#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub agency: String,
    #[arg(long = "ivv-vendor")]
    pub ivv_vendor: String,
    #[arg(long)]
    pub contract: u64,
    #[arg(long, default_value_t = 0)]
    pub paid: u64,
    #[arg(long)]
    pub start: NaiveDate,
    #[arg(long)]
    pub planned_end: NaiveDate,
    #[arg(long)]
    pub projected_end: Option<NaiveDate>,
    #[arg(long, default_value = "on-track")]
    pub rating: Rating,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct VarianceArgs {
    /// Use a stored project's figures
    #[arg(long, conflicts_with_all = ["paid", "contract", "planned", "projected"])]
    pub project: Option<String>,
    #[arg(long, requires = "contract")]
    pub paid: Option<u64>,
    #[arg(long, requires = "paid")]
    pub contract: Option<u64>,
    #[arg(long, requires = "projected")]
    pub planned: Option<NaiveDate>,
    #[arg(long, requires = "planned")]
    pub projected: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_defaults() -> Result<()> {
        let args = Cli::try_parse_from(["oversight", "catalog"])?;
        assert_eq!(args.project_dir.to_string_lossy(), ".");
        assert_eq!(args.role, Role::EtsAdmin);
        assert_eq!(args.format, OutputFormat::Table);
        assert!(matches!(args.command, Commands::Catalog));
        Ok(())
    }

    #[test]
    fn test_cli_parse_vendor_globals_after_subcommand() -> Result<()> {
        let args = Cli::try_parse_from([
            "oversight",
            "submit",
            "r-005",
            "--role",
            "vendor",
            "--vendor",
            "Keystone IV&V",
            "--format",
            "json",
        ])?;
        assert_eq!(args.role, Role::IvvVendor);
        assert_eq!(args.vendor.as_deref(), Some("Keystone IV&V"));
        assert_eq!(args.format, OutputFormat::Json);
        match args.command {
            Commands::Submit { id } => {
                assert_eq!(id, "r-005");
                Ok(())
            }
            _ => bail!("Expected Submit command"),
        }
    }

    #[test]
    fn test_cli_parse_draft_new() -> Result<()> {
        let args = Cli::try_parse_from([
            "oversight",
            "draft",
            "new",
            "--project",
            "p-001",
            "--period",
            "2025-10",
            "--overall",
            "at-risk",
            "--achievement",
            "UAT started",
            "--achievement",
            "Training plan signed",
        ])?;
        match args.command {
            Commands::Draft(DraftCommand::New {
                project,
                period,
                content,
            }) => {
                assert_eq!(project, "p-001");
                assert_eq!(period.to_string(), "2025-10");
                assert_eq!(content.overall, Some(Rating::AtRisk));
                assert_eq!(content.achievements.len(), 2);
                Ok(())
            }
            _ => bail!("Expected Draft New command"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_period_and_rating() {
        let bad_period = [
            "oversight",
            "draft",
            "new",
            "--project",
            "p",
            "--period",
            "2025-13",
        ];
        assert!(Cli::try_parse_from(bad_period).is_err());
        let bad_rating = ["oversight", "draft", "edit", "r-1", "--overall", "amber"];
        assert!(Cli::try_parse_from(bad_rating).is_err());
    }

    #[test]
    fn test_cli_parse_finding_add() -> Result<()> {
        let args = Cli::try_parse_from([
            "oversight",
            "finding",
            "add",
            "r-005",
            "--type",
            "issue",
            "--description",
            "Vendor staffing gap",
            "--impact",
            "2",
            "--likelihood",
            "3",
        ])?;
        match args.command {
            Commands::Finding(FindingCommand::Add {
                kind,
                impact,
                likelihood,
                recommendation,
                ..
            }) => {
                assert_eq!(kind, FindingKind::Issue);
                assert_eq!((impact, likelihood), (2, 3));
                assert!(recommendation.is_empty());
                Ok(())
            }
            _ => bail!("Expected Finding Add command"),
        }
    }

    #[test]
    fn test_cli_variance_requires_pairs() {
        assert!(Cli::try_parse_from(["oversight", "variance", "--paid", "10"]).is_err());
        let mixed = [
            "oversight",
            "variance",
            "--project",
            "p-001",
            "--paid",
            "1",
            "--contract",
            "2",
        ];
        assert!(Cli::try_parse_from(mixed).is_err());
        let explicit = ["oversight", "variance", "--paid", "1", "--contract", "2"];
        assert!(Cli::try_parse_from(explicit).is_ok());
    }
}
