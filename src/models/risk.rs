use serde::{Deserialize, Serialize};

/// One dated risk observation, used for the risk-over-time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RiskEvent {
    pub risk: String,
    /// First-detected date as `MM-DD-YYYY`.
    pub date: String,
    pub severity: String,
    pub category: String,
    pub name: String,
}
