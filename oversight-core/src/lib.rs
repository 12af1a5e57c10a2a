// oversight-core/src/lib.rs

// 1. Documentation is not enforced yet
#![allow(missing_docs)]
// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (interfaces / traits)
// Repository and identity contracts.
pub mod ports;

// 2. Domain (business core)
// Ratings, risk scoring, variance, the report workflow.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (adapters)
// Config files, dataset storage, demo seed data.
// Depends on the domain and the ports.
pub mod infrastructure;

// 4. Application (use cases)
// Role-gated service, public catalog, dashboards.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::OversightError;
