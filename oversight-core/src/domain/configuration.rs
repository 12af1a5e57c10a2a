// oversight-core/src/domain/configuration.rs

use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

use crate::domain::risk::SeverityPolicy;

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct OversightConfig {
    #[serde(default = "default_name")]
    #[validate(length(min = 1))]
    pub name: String,

    /// Dataset file, relative to the project directory.
    #[serde(rename = "dataset-path", default = "default_dataset_path")]
    #[validate(length(min = 1))]
    pub dataset_path: String,

    #[serde(default)]
    #[validate(nested)]
    pub severity: SeverityPolicy,

    #[serde(default)]
    #[validate(nested)]
    pub retry: RetryPolicy,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl Default for OversightConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            dataset_path: default_dataset_path(),
            severity: SeverityPolicy::default(),
            retry: RetryPolicy::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

fn default_name() -> String {
    "oversight".to_string()
}

fn default_dataset_path() -> String {
    "data/dataset.yaml".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CatalogConfig {
    /// List inactive projects in the public catalog.
    #[serde(default)]
    pub include_inactive: bool,
}

/// Backoff for retrying idempotent saves against the data service.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[validate(schema(function = "validate_delays"))]
pub struct RetryPolicy {
    #[serde(default = "default_max_attempts")]
    #[validate(range(min = 1, max = 10))]
    pub max_attempts: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_multiplier")]
    #[validate(range(min = 1.0, max = 10.0))]
    pub multiplier: f64,
}

fn default_max_attempts() -> u32 {
    3
}
fn default_initial_delay_ms() -> u64 {
    100
}
fn default_max_delay_ms() -> u64 {
    2000
}
fn default_multiplier() -> f64 {
    2.0
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            multiplier: default_multiplier(),
        }
    }
}

fn validate_delays(policy: &RetryPolicy) -> Result<(), validator::ValidationError> {
    if policy.max_delay_ms < policy.initial_delay_ms {
        let mut err = validator::ValidationError::new("delay_order");
        err.message = Some("max_delay_ms must be >= initial_delay_ms".into());
        return Err(err);
    }
    Ok(())
}

impl RetryPolicy {
    /// No waiting, a single attempt. Used by tests and one-shot commands.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_delay_ms: 0,
            max_delay_ms: 0,
            multiplier: 1.0,
        }
    }

    /// Delay before retry number `attempt` (0-based), capped at `max_delay_ms`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let delay = self.initial_delay_ms as f64 * self.multiplier.powi(exponent);
        let capped = delay.min(self.max_delay_ms as f64);
        Duration::from_millis(capped as u64)
    }
}
