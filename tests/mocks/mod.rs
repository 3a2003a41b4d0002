//! Mock implementations for testing without a live validator.
//!
//! Provides a scripted `ConformanceValidator` and the reference documents
//! used across the integration tests.

pub mod documents;

pub use documents::*;
pub use validator::*;
