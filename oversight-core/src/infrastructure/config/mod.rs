// oversight-core/src/infrastructure/config/mod.rs

pub mod loader;

pub use crate::domain::configuration::OversightConfig;
pub use loader::{dataset_path, find_main_config, load_config};
