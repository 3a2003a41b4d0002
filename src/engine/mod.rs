//! Validation engine module.
//!
//! Provides rule orchestration and result aggregation.

pub mod orchestrator;
pub mod result;
