use super::types::MuniError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    /// True when the failure belongs to a single entity and the batch may
    /// continue without it under the skip policy.
    pub entity_scoped: bool,
}

impl MuniError {
    /// Classify this error to determine its type and whether it can be
    /// isolated to the entity that produced it.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Entity-scoped errors
            MuniError::Network(_) => ErrorClassification {
                error_type: "NetworkError",
                entity_scoped: true,
            },
            MuniError::MalformedRecord { .. } => ErrorClassification {
                error_type: "MalformedRecord",
                entity_scoped: true,
            },

            // Run-fatal errors
            MuniError::InconsistentKeySet(_) => ErrorClassification {
                error_type: "InconsistentKeySet",
                entity_scoped: false,
            },
            MuniError::NotFound(_) => ErrorClassification {
                error_type: "NotFound",
                entity_scoped: false,
            },
            MuniError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                entity_scoped: false,
            },
            MuniError::Database(_) => ErrorClassification {
                error_type: "DatabaseError",
                entity_scoped: false,
            },
            MuniError::Io(_) => ErrorClassification {
                error_type: "IoError",
                entity_scoped: false,
            },
            MuniError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                entity_scoped: false,
            },
            MuniError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                entity_scoped: false,
            },
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            MuniError::Config(_) => 2,
            MuniError::Network(_) => 3,
            MuniError::MalformedRecord { .. } => 4,
            MuniError::InconsistentKeySet(_) => 5,
            _ => 1,
        }
    }
}
