// oversight-core/src/application/mod.rs

pub mod catalog;
pub mod dashboard;
pub mod retry;
pub mod service;
pub mod views;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI write `use oversight_core::application::{OversightService, CatalogGenerator};`
// without knowing the file layout.

pub use catalog::{CatalogGenerator, PublicCatalog};
pub use dashboard::{AdminDashboard, VendorDashboard, admin_dashboard, vendor_dashboard};
pub use retry::with_retry;
pub use service::OversightService;
pub use views::{FindingView, ProjectView, RatingView, ReportView};
