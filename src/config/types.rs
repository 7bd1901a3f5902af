use serde::{Deserialize, Serialize};
use crate::models::Entity;

pub const DEFAULT_BASE_URL: &str = "https://cyber-risk.upguard.com/api/public";
pub const API_KEY_ENV: &str = "UPGUARD_API_KEY";
pub const DEFAULT_STORE_PATH: &str = "./data/muniscore.db";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    pub vendor: Option<VendorConfig>,
    pub store: Option<StoreConfig>,
    pub output: Option<OutputConfig>,
    pub analysis: Option<AnalysisConfig>,
    pub risks: Option<RisksConfig>,
    pub failure_policy: Option<FailurePolicy>,
    pub entities: Option<Vec<Entity>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct VendorConfig {
    /// Literal key or `$VAR` reference.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StoreConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OutputConfig {
    pub data_dir: Option<String>,
    pub graph_dir: Option<String>,
    pub remediation_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    pub rank_mode: Option<RankMode>,
    pub top_k_file: Option<usize>,
    pub top_k_chart: Option<usize>,
    pub histogram_bins: Option<usize>,
    pub label_width: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rank_mode: Some(RankMode::Stable),
            top_k_file: Some(15),
            top_k_chart: Some(5),
            histogram_bins: Some(30),
            label_width: Some(40),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RisksConfig {
    /// Risks first detected in these years are left out of the time series.
    pub exclude_years: Option<Vec<i32>>,
}

impl Default for RisksConfig {
    fn default() -> Self {
        Self {
            exclude_years: Some(vec![2021]),
        }
    }
}

/// How the ranker pairs names with sorted values.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RankMode {
    /// Stable sort of (name, value) pairs by value.
    #[default]
    Stable,
    /// Sort values on their own and re-pair them with names in original
    /// iteration order. Matches outputs saved by earlier tooling.
    LegacyZip,
}

impl RankMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::LegacyZip => "legacy-zip",
        }
    }
}

impl std::fmt::Display for RankMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a per-entity failure does to the batch.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    #[default]
    Abort,
    Skip,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Skip => "skip",
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
