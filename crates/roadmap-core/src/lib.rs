//! roadmap-core
//!
//! Shared vocabulary of the roadmap engine: client demographics, raw and
//! canonical lab values, questionnaire responses, and diagnostics.
//! Pure data; rule and template logic live elsewhere.

pub mod error;
pub mod ids;
pub mod models;
