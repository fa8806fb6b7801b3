//! carenote-genai
//!
//! Gemini invocation for the care-assessment workflow: multi-modal request
//! assembly, schema-constrained generation with rate-limit retry, and
//! structured output parsing.

pub mod assistant;
pub mod care_plan;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod mime;
pub mod request;
pub mod retry;
pub mod schema;
pub mod tokens;
pub mod transaction;
pub mod transport;

pub use assistant::CaseAssistant;
