use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use regex::Regex;
use crate::errors::MuniError;
use super::types::AppConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

static HOSTNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]{0,62}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,62}[A-Za-z0-9])?)+$")
        .expect("hostname pattern is valid")
});

/// True for a bare hostname such as `salemma.gov`: no scheme, path or port.
pub fn is_valid_hostname(host: &str) -> bool {
    HOSTNAME_RE.is_match(host)
}

pub async fn parse_config(path: &Path) -> Result<AppConfig, MuniError> {
    if !path.exists() {
        return Err(MuniError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(MuniError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<AppConfig, MuniError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    validate_schema(&yaml)?;

    let config: AppConfig = serde_yaml::from_value(yaml)?;

    validate_semantics(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), MuniError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| MuniError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| MuniError::Config(format!("Schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(&json_value) {
        // Advisory: serde decides what is actually accepted.
        for e in errors {
            warn!(validation_error = %e, path = %e.instance_path, "Config schema warning");
        }
    }

    Ok(())
}

/// Checks serde cannot express: unique entity names, bare hostnames and
/// non-zero analysis sizes.
fn validate_semantics(config: &AppConfig) -> Result<(), MuniError> {
    if let Some(entities) = &config.entities {
        if entities.is_empty() {
            return Err(MuniError::Config("entities list is empty".into()));
        }
        let mut seen = HashSet::new();
        for entity in entities {
            if !seen.insert(entity.name.as_str()) {
                return Err(MuniError::Config(format!("Duplicate entity name: {}", entity.name)));
            }
            if !is_valid_hostname(&entity.domain) {
                return Err(MuniError::Config(format!(
                    "Entity {} has invalid domain '{}': expected a bare hostname",
                    entity.name, entity.domain
                )));
            }
        }
    }

    if let Some(analysis) = &config.analysis {
        let sizes = [
            ("top_k_file", analysis.top_k_file),
            ("top_k_chart", analysis.top_k_chart),
            ("histogram_bins", analysis.histogram_bins),
            ("label_width", analysis.label_width),
        ];
        for (field, value) in sizes {
            if value == Some(0) {
                return Err(MuniError::Config(format!("analysis.{} must be at least 1", field)));
            }
        }
    }

    if let Some(vendor) = &config.vendor {
        if vendor.api_key.as_deref().map_or(false, str::is_empty) {
            warn!("vendor.api_key is set but empty");
        }
    }

    Ok(())
}
