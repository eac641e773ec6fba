use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("duplicate lab definition: {0}")]
    DuplicateDefinition(String),

    #[error("{table} maps '{name}' to unknown canonical id '{id}'")]
    UnknownTarget {
        table: &'static str,
        name: String,
        id: String,
    },

    #[error("invalid unit conversion for '{id}' from '{from}': factor {factor}")]
    InvalidConversion { id: String, from: String, factor: f64 },
}
