use thiserror::Error;

#[derive(Debug, Error)]
pub enum MuniError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure or non-2xx response from the vendor API.
    #[error("Network error: {0}")]
    Network(String),

    /// A vendor record is missing a required numeric field.
    #[error("Malformed record for {entity}: {reason}")]
    MalformedRecord { entity: String, reason: String },

    /// The rankings fed to the stacked chart do not cover the same entities.
    #[error("Inconsistent key set: {0}")]
    InconsistentKeySet(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl MuniError {
    pub fn malformed(entity: &str, reason: impl Into<String>) -> Self {
        MuniError::MalformedRecord {
            entity: entity.to_string(),
            reason: reason.into(),
        }
    }
}
