// oversight/src/commands/context.rs
//
// Wiring shared by every command: config, dataset adapter, acting user.

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use oversight_core::application::OversightService;
use oversight_core::domain::{Actor, OversightConfig, Role};
use oversight_core::infrastructure::adapters::{StaticIdentity, YamlFileRepository};
use oversight_core::infrastructure::config::{dataset_path, load_config};

use crate::cli::{Cli, OutputFormat};

pub struct Session {
    pub project_dir: PathBuf,
    pub actor: Actor,
    pub format: OutputFormat,
}

impl Session {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let actor = match (cli.role, &cli.vendor) {
            (Role::EtsAdmin, _) => Actor::admin(&cli.user),
            (Role::IvvVendor, Some(vendor)) => Actor::vendor(&cli.user, vendor),
            (Role::IvvVendor, None) => bail!("--role vendor requires --vendor <organisation>"),
        };
        Ok(Self {
            project_dir: cli.project_dir.clone(),
            actor,
            format: cli.format,
        })
    }

    pub fn config(&self) -> Result<OversightConfig> {
        load_config(&self.project_dir).with_context(|| {
            format!("Invalid configuration in {}", self.project_dir.display())
        })
    }

    pub fn dataset_path(&self, config: &OversightConfig) -> PathBuf {
        dataset_path(&self.project_dir, config)
    }

    /// Opens the dataset and binds the service to the acting user.
    pub fn service(&self) -> Result<OversightService> {
        let config = self.config()?;
        let path = self.dataset_path(&config);
        debug!(
            dataset = ?path,
            user = %self.actor.user,
            role = %self.actor.role,
            "Opening dataset"
        );
        let repo = YamlFileRepository::open(&path)
            .with_context(|| format!("Cannot open dataset {}", path.display()))?;
        Ok(OversightService::new(
            Arc::new(repo),
            Arc::new(StaticIdentity::new(self.actor.clone())),
            &config,
        ))
    }

    pub fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}
