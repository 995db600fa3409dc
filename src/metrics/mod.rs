//! Cohort and match-log statistics for operational reporting.
//!
//! - [`MetricsEngine`]: Individual metrics over a cohort snapshot and the store
//! - [`MetricsReport`]: All metrics gathered into one serializable snapshot
//!
//! Gene identifiers are normalized through the injected
//! [`GeneResolver`](crate::catalog::GeneResolver) wherever genes from different
//! submissions are compared.

pub mod engine;
pub mod report;

pub use engine::MetricsEngine;
pub use report::MetricsReport;
