use thiserror::Error;

use crate::risk::RiskAxis;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("duplicate rule id: {0}")]
    DuplicateRule(String),

    #[error("rule at position {0} has an empty id")]
    EmptyRuleId(usize),

    #[error("weight for '{key}' on the {axis} axis must be finite and non-negative, got {value}")]
    InvalidWeight {
        key: String,
        axis: RiskAxis,
        value: f64,
    },

    #[error("duplicate weight entry for '{0}' after key normalisation")]
    DuplicateWeight(String),
}
