// oversight-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(oversight::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / DATASET ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(oversight::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(oversight::infra::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(oversight::infra::config))]
    ConfigError(String),

    // --- BACKEND ---
    #[error("Backend unavailable: {0}")]
    #[diagnostic(
        code(oversight::infra::unavailable),
        help("The data service did not answer. The action can be retried safely.")
    )]
    Unavailable(String),
}

// Loaders attach context with anyhow; keep the chain in the message.
impl From<anyhow::Error> for InfrastructureError {
    fn from(err: anyhow::Error) -> Self {
        InfrastructureError::ConfigError(format!("{:#}", err))
    }
}
