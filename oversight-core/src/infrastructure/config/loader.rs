// oversight-core/src/infrastructure/config/loader.rs

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::configuration::OversightConfig;
use crate::infrastructure::error::InfrastructureError;

const CANDIDATES: [&str; 2] = ["oversight.yaml", "oversight_project_conf.yaml"];

#[instrument(skip(project_dir))]
pub fn load_config(project_dir: &Path) -> Result<OversightConfig, InfrastructureError> {
    // 1. Config file is optional; defaults apply without one
    let mut config: OversightConfig = match find_main_config(project_dir) {
        Some(config_path) => {
            info!(path = ?config_path, "Loading oversight configuration");
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config at {:?}", config_path))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config YAML at {:?}", config_path))?
        }
        None => {
            info!(dir = ?project_dir, "No configuration file found, using defaults");
            OversightConfig::default()
        }
    };

    // 2. Environment overrides take precedence over the file
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    // 3. An invalid policy never reaches the use cases
    config
        .validate()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;

    Ok(config)
}

pub fn find_main_config(root: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|filename| root.join(filename))
        .find(|p| p.exists())
}

/// Absolute location of the dataset file for a project directory.
pub fn dataset_path(project_dir: &Path, config: &OversightConfig) -> PathBuf {
    let path = Path::new(&config.dataset_path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}

fn apply_env_overrides<F>(
    config: &mut OversightConfig,
    lookup: F,
) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("OVERSIGHT_DATASET_PATH") {
        info!(old = ?config.dataset_path, new = ?val, "Overriding dataset path via ENV");
        config.dataset_path = val;
    }
    if let Some(val) = lookup("OVERSIGHT_RETRY_MAX_ATTEMPTS") {
        let attempts = val.parse::<u32>().map_err(|_| {
            InfrastructureError::ConfigError(format!(
                "OVERSIGHT_RETRY_MAX_ATTEMPTS must be a number, got '{}'",
                val
            ))
        })?;
        info!(old = config.retry.max_attempts, new = attempts, "Overriding retry attempts via ENV");
        config.retry.max_attempts = attempts;
    }
    Ok(())
}
