// oversight-core/src/ports/mod.rs

pub mod identity;
pub mod repository;

pub use identity::IdentityProvider;
pub use repository::{OversightRepository, ReportQuery};
