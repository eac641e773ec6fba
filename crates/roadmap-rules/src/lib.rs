//! roadmap-rules
//!
//! The fact store, the declarative rule catalog with its predicate
//! language, the rule engine that evaluates it, and the six-axis risk
//! aggregator.

pub mod body;
pub mod builtin;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod facts;
pub mod format;
pub mod metric;
pub mod predicate;
pub mod risk;

pub use catalog::{RuleCatalog, RuleDefinition};
pub use engine::{RuleEngine, RuleOutcome};
pub use facts::FactStore;
pub use risk::{RiskAxis, RiskProfile, RiskWeights};
