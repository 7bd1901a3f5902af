use std::collections::HashSet;
use std::sync::Arc;
use crate::db::{Collection, Database, RecordStore};
use crate::errors::MuniError;
use crate::config::FailurePolicy;
use crate::models::{Entity, Finding, ScoreRecord};
use crate::reporting::writer;
use crate::vendor::VendorApi;
use super::aggregator::aggregate;
use super::analysis::write_outputs;
use super::extractor::extract_scores;
use super::progress::BatchProgress;
use super::state::*;
use super::timeseries::risk_events;
use tracing::{info, warn, error};

/// Drives one batch over the configured entities: fetch, extract, persist,
/// analyse and write outputs. Calls are made one entity at a time.
pub struct PipelineOrchestrator {
    pub(super) config: PipelineConfig,
    pub(super) vendor: Arc<dyn VendorApi>,
    pub(super) db: Database,
    pub(super) progress: BatchProgress,
}

impl PipelineOrchestrator {
    pub fn new(config: PipelineConfig, vendor: Arc<dyn VendorApi>, db: Database) -> Self {
        let progress = BatchProgress::new(config.show_progress);
        Self { config, vendor, db, progress }
    }

    /// Full batch: scores, findings, persistence and every derived output.
    pub async fn run(&self) -> Result<BatchReport, MuniError> {
        let mut report = BatchReport::new(&self.config.run_id, self.config.entities.len());
        info!(
            run_id = %self.config.run_id,
            entities = self.config.entities.len(),
            rank_mode = %self.config.analysis.rank_mode,
            "Starting batch run"
        );

        let records = self.fetch_scores(&mut report).await?;
        let scores_path = self.config.scores_file();
        writer::write_score_records(&scores_path, &records).await?;
        report.outputs.push(scores_path);
        self.persist_scores(&records, &mut report)?;

        let population = self.fetch_findings(&records, &mut report).await?;
        self.persist_findings(&population, &mut report)?;
        let table = aggregate(&population);
        report.distinct_findings = table.len();
        report.total_findings = table.total();

        write_outputs(&self.config, &records, &table, &mut report).await?;

        info!(
            run_id = %self.config.run_id,
            scored = report.scored,
            failures = report.failures.len(),
            inserted = report.inserted_total(),
            skipped = report.skipped_total(),
            "Batch run complete"
        );
        Ok(report)
    }

    /// Fetch the risk time series for every entity and replace the `risks`
    /// collection with it, one document per entity. When an entity was
    /// skipped, only the fetched entities' documents are replaced and the
    /// skipped ones keep their stored series.
    pub async fn run_risks(&self) -> Result<BatchReport, MuniError> {
        let entities = &self.config.entities;
        let mut report = BatchReport::new(&self.config.run_id, entities.len());
        let mut documents = Vec::with_capacity(entities.len());

        self.progress.start_stage("risks", entities.len());
        for entity in entities {
            self.progress.entity(&entity.name);
            match self.vendor.risks(entity).await {
                Ok(raw) => {
                    let events = risk_events(&entity.name, &raw, &self.config.exclude_years);
                    info!(entity = %entity.name, fetched = raw.len(), kept = events.len(), "Risks fetched");
                    report.total_findings += events.len();
                    documents.push((entity.name.clone(), events));
                }
                Err(e) => self.handle_failure(&mut report, entity, "risks", e)?,
            }
            self.progress.advance();
        }
        self.progress.finish();

        let store = RecordStore::new(&self.db, Collection::Risks);
        let stats = if report.is_clean() {
            store.refresh(&documents)?
        } else {
            store.replace(&documents)?
        };
        report.record_persist(Collection::Risks.as_str(), stats);
        report.scored = documents.len();
        Ok(report)
    }

    /// Query `/vendor` for every entity and report the ones that fail.
    /// Always visits every entity; the caller decides what a failure means.
    pub async fn check(&self) -> BatchReport {
        let entities = &self.config.entities;
        let mut report = BatchReport::new(&self.config.run_id, entities.len());

        self.progress.start_stage("check", entities.len());
        for entity in entities {
            self.progress.entity(&entity.name);
            match self.vendor.vendor_score(entity).await {
                Ok(_) => report.scored += 1,
                Err(e) => {
                    warn!(entity = %entity.name, domain = %entity.domain, error = %e, "Vendor lookup failed");
                    report.failures.push(failure(entity, "check", &e));
                }
            }
            self.progress.advance();
        }
        self.progress.finish();
        report
    }

    async fn fetch_scores(&self, report: &mut BatchReport) -> Result<Vec<ScoreRecord>, MuniError> {
        let entities = &self.config.entities;
        let mut records = Vec::with_capacity(entities.len());

        self.progress.start_stage("scores", entities.len());
        for entity in entities {
            self.progress.entity(&entity.name);
            let result = match self.vendor.vendor_score(entity).await {
                Ok(raw) => extract_scores(&entity.name, &raw),
                Err(e) => Err(e),
            };
            match result {
                Ok(record) => {
                    info!(entity = %entity.name, score = record.overall_score, "Score fetched");
                    records.push(record);
                }
                Err(e) => self.handle_failure(report, entity, "scores", e)?,
            }
            self.progress.advance();
        }
        self.progress.finish();

        report.scored = records.len();
        Ok(records)
    }

    /// Findings for the entities that were scored. Entities dropped at the
    /// scores stage are not queried again.
    async fn fetch_findings(
        &self,
        scored: &[ScoreRecord],
        report: &mut BatchReport,
    ) -> Result<Vec<(Entity, Vec<Finding>)>, MuniError> {
        let names: HashSet<&str> = scored.iter().map(|r| r.name.as_str()).collect();
        let entities: Vec<&Entity> = self
            .config
            .entities
            .iter()
            .filter(|e| names.contains(e.name.as_str()))
            .collect();
        let mut population = Vec::with_capacity(entities.len());

        self.progress.start_stage("findings", entities.len());
        for entity in entities {
            self.progress.entity(&entity.name);
            match self.vendor.vulnerabilities(entity).await {
                Ok(findings) => {
                    info!(entity = %entity.name, count = findings.len(), "Findings fetched");
                    if !findings.is_empty() {
                        report.with_findings += 1;
                    }
                    population.push(((*entity).clone(), findings));
                }
                Err(e) => self.handle_failure(report, entity, "findings", e)?,
            }
            self.progress.advance();
        }
        self.progress.finish();
        Ok(population)
    }

    fn persist_scores(&self, records: &[ScoreRecord], report: &mut BatchReport) -> Result<(), MuniError> {
        let documents: Vec<(String, &ScoreRecord)> =
            records.iter().map(|r| (r.name.clone(), r)).collect();
        let stats = RecordStore::new(&self.db, Collection::Scores).insert_all(&documents)?;
        report.record_persist(Collection::Scores.as_str(), stats);
        Ok(())
    }

    fn persist_findings(&self, population: &[(Entity, Vec<Finding>)], report: &mut BatchReport) -> Result<(), MuniError> {
        let documents: Vec<(String, &Vec<Finding>)> =
            population.iter().map(|(e, f)| (e.name.clone(), f)).collect();
        let stats = RecordStore::new(&self.db, Collection::Vulnerabilities).insert_all(&documents)?;
        report.record_persist(Collection::Vulnerabilities.as_str(), stats);
        Ok(())
    }

    /// Record an entity failure under `skip`, or stop the run under `abort`
    /// and for any error that is not scoped to one entity.
    pub(super) fn handle_failure(
        &self,
        report: &mut BatchReport,
        entity: &Entity,
        stage: &str,
        err: MuniError,
    ) -> Result<(), MuniError> {
        let classification = err.classify();
        if self.config.failure_policy == FailurePolicy::Skip && classification.entity_scoped {
            warn!(
                entity = %entity.name,
                stage = stage,
                error_type = classification.error_type,
                error = %err,
                "Skipping entity"
            );
            report.failures.push(failure(entity, stage, &err));
            return Ok(());
        }
        self.progress.finish();
        error!(entity = %entity.name, stage = stage, error = %err, "Batch run aborted");
        Err(err)
    }
}

pub(super) fn failure(entity: &Entity, stage: &str, err: &MuniError) -> EntityFailure {
    EntityFailure {
        entity: entity.name.clone(),
        stage: stage.to_string(),
        error_type: err.classify().error_type.to_string(),
        message: err.to_string(),
    }
}
