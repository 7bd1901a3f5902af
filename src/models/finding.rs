use serde::{Deserialize, Serialize};

/// A named security issue the vendor reported for one entity.
///
/// Two findings with the same `description` are the same logical finding
/// for frequency counting, whichever entity they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub description: String,
    pub severity: String,
    /// Why the vendor considers this risky.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_reason: Option<String>,
    /// Long-form vendor explanation, present for risk findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default)]
    pub hostnames: Vec<String>,
}

impl Finding {
    pub fn new(description: &str, severity: &str) -> Self {
        Self {
            description: description.to_string(),
            severity: severity.to_string(),
            risk_reason: None,
            detail: None,
            hostnames: Vec::new(),
        }
    }

    /// First affected host, if the vendor listed any.
    pub fn primary_host(&self) -> Option<&str> {
        self.hostnames.first().map(String::as_str)
    }
}
