use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use crate::config::{
    default_entities, AnalysisConfig, AppConfig, FailurePolicy, RankMode, RisksConfig,
};
use crate::db::PersistStats;
use crate::errors::MuniError;
use crate::models::Entity;

pub const SCORES_FILE: &str = "municipalities.ndjson";
pub const FREQUENCY_FILE: &str = "top_vulnerabilities.csv";

/// Knobs for the ranking and chart stage.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub rank_mode: RankMode,
    pub top_k_file: usize,
    pub top_k_chart: usize,
    pub histogram_bins: usize,
    pub label_width: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl AnalysisSettings {
    pub fn from_config(analysis: &AnalysisConfig) -> Self {
        let defaults = AnalysisConfig::default();
        Self {
            rank_mode: analysis.rank_mode.or(defaults.rank_mode).unwrap_or_default(),
            top_k_file: analysis.top_k_file.or(defaults.top_k_file).unwrap_or(15),
            top_k_chart: analysis.top_k_chart.or(defaults.top_k_chart).unwrap_or(5),
            histogram_bins: analysis.histogram_bins.or(defaults.histogram_bins).unwrap_or(30),
            label_width: analysis.label_width.or(defaults.label_width).unwrap_or(40),
        }
    }
}

/// Everything one batch run needs, resolved once from the config file and
/// CLI flags and then passed by value.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub run_id: String,
    pub entities: Vec<Entity>,
    pub data_dir: PathBuf,
    pub graph_dir: PathBuf,
    pub remediation_dir: PathBuf,
    pub analysis: AnalysisSettings,
    pub exclude_years: Vec<i32>,
    pub failure_policy: FailurePolicy,
    pub show_progress: bool,
}

impl PipelineConfig {
    pub fn from_app_config(app: &AppConfig) -> Result<Self, MuniError> {
        let output = app.output.clone().unwrap_or_default();
        let analysis = app.analysis.clone().unwrap_or_default();
        let risks = app.risks.clone().unwrap_or_default();

        let entities = app.entities.clone().unwrap_or_else(default_entities);
        if entities.is_empty() {
            return Err(MuniError::Config("No entities to score".into()));
        }

        Ok(Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            entities,
            data_dir: PathBuf::from(output.data_dir.as_deref().unwrap_or("./data")),
            graph_dir: PathBuf::from(output.graph_dir.as_deref().unwrap_or("./graphs")),
            remediation_dir: PathBuf::from(output.remediation_dir.as_deref().unwrap_or("./remediation")),
            analysis: AnalysisSettings::from_config(&analysis),
            exclude_years: risks
                .exclude_years
                .or(RisksConfig::default().exclude_years)
                .unwrap_or_default(),
            failure_policy: app.failure_policy.unwrap_or_default(),
            show_progress: true,
        })
    }

    pub fn scores_file(&self) -> PathBuf {
        self.data_dir.join(SCORES_FILE)
    }

    pub fn frequency_file(&self) -> PathBuf {
        self.graph_dir.join(FREQUENCY_FILE)
    }
}

/// An entity dropped from the run under the skip policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityFailure {
    pub entity: String,
    pub stage: String,
    pub error_type: String,
    pub message: String,
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub run_id: String,
    pub entities_total: usize,
    pub scored: usize,
    pub with_findings: usize,
    pub distinct_findings: usize,
    pub total_findings: usize,
    pub failures: Vec<EntityFailure>,
    /// Insert/skip tallies keyed by collection name.
    pub persisted: BTreeMap<String, PersistStats>,
    pub outputs: Vec<PathBuf>,
}

impl BatchReport {
    pub fn new(run_id: &str, entities_total: usize) -> Self {
        Self {
            run_id: run_id.to_string(),
            entities_total,
            ..Default::default()
        }
    }

    pub fn record_persist(&mut self, collection: &str, stats: PersistStats) {
        let entry = self.persisted.entry(collection.to_string()).or_default();
        entry.inserted += stats.inserted;
        entry.skipped += stats.skipped;
    }

    pub fn inserted_total(&self) -> usize {
        self.persisted.values().map(|s| s.inserted).sum()
    }

    pub fn skipped_total(&self) -> usize {
        self.persisted.values().map(|s| s.skipped).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
