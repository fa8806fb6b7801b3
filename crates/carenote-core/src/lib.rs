//! carenote-core
//!
//! Pure domain types for the care-assessment workflow: the assessment
//! catalog, the face sheet, the care plan, extraction results, and the
//! reducers that apply AI output to a case. No network, no async.

pub mod catalog;
pub mod error;
pub mod merge;
pub mod models;
pub mod session;
