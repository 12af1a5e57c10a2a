// oversight-core/src/domain/mod.rs

pub mod actor;
pub mod configuration;
pub mod error;
pub mod project;
pub mod rating;
pub mod report;
pub mod risk;
pub mod variance;

// Convenience re-exports
pub use actor::{Actor, Role};
pub use configuration::{CatalogConfig, OversightConfig, RetryPolicy};
pub use error::DomainError;
pub use project::{Project, ProjectInput, ProjectStatus};
pub use rating::{DimensionRatings, Rating, RatingDisplay};
pub use report::{
    DraftInput, Finding, FindingInput, FindingKind, FindingStatus, Report, ReportStatus,
    ReportingPeriod, ReviewAction, ReviewComment, ReviewEvent,
};
pub use risk::{RiskScore, ScoreLevel, SeverityBand, SeverityPolicy};
pub use variance::{ScheduleStatus, budget_used_percent, schedule_delay_days};
