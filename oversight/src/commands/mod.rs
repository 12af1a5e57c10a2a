// oversight/src/commands/mod.rs

pub mod catalog;
pub mod context;
pub mod dashboard;
pub mod finding;
pub mod output;
pub mod projects;
pub mod reports;
pub mod score;
pub mod seed;
pub mod workflow;
