pub mod aggregator;
pub mod analysis;
pub mod extractor;
pub mod orchestrator;
pub mod progress;
pub mod ranker;
pub mod remediation;
pub mod state;
pub mod timeseries;

pub use analysis::analyze_offline;
pub use orchestrator::PipelineOrchestrator;
pub use state::{AnalysisSettings, BatchReport, EntityFailure, PipelineConfig};
