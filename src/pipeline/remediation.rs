use crate::config::is_valid_hostname;
use crate::db::{Collection, InsertOutcome, PersistStats, RecordStore};
use crate::errors::MuniError;
use crate::models::{report_title, Entity, RemediationDocument};
use crate::reporting::writer;
use super::extractor::extract_scores;
use super::orchestrator::PipelineOrchestrator;
use super::state::BatchReport;
use tracing::info;

impl PipelineOrchestrator {
    /// Build a remediation report for each host.
    ///
    /// The document is inserted only if the host has none stored yet, and
    /// the report is always rendered from what the store holds, so a host
    /// keeps the report of its first run until the collection is cleared.
    pub async fn remediate(&self, hosts: &[String]) -> Result<BatchReport, MuniError> {
        if let Some(bad) = hosts.iter().find(|h| !is_valid_hostname(h.as_str())) {
            return Err(MuniError::Config(format!("Invalid host '{}': expected a bare hostname", bad)));
        }

        let mut report = BatchReport::new(&self.config.run_id, hosts.len());
        let store = RecordStore::new(&self.db, Collection::Remediation);
        let date = chrono::Local::now().format("%m-%d-%Y").to_string();
        let mut stats = PersistStats::default();

        self.progress.start_stage("remediation", hosts.len());
        for host in hosts {
            let entity = Entity::new(&report_title(host), host);
            self.progress.entity(&entity.name);

            let doc = match self.build_document(&entity).await {
                Ok(doc) => doc,
                Err(e) => {
                    self.handle_failure(&mut report, &entity, "remediation", e)?;
                    self.progress.advance();
                    continue;
                }
            };

            let outcome = store.insert_if_absent(host, &doc)?;
            if outcome == InsertOutcome::AlreadyExists {
                info!(host = %host, "Remediation document already stored, rendering stored copy");
            }
            stats.record(outcome);

            let stored: RemediationDocument = store.get(host)?;
            report.total_findings += stored.issues.len();
            if !stored.issues.is_empty() {
                report.with_findings += 1;
            }
            let written = writer::write_remediation(&self.config.remediation_dir, &stored, &date).await?;
            report.outputs.extend(written);
            report.scored += 1;
            self.progress.advance();
        }
        self.progress.finish();
        report.record_persist(Collection::Remediation.as_str(), stats);
        Ok(report)
    }

    async fn build_document(&self, entity: &Entity) -> Result<RemediationDocument, MuniError> {
        let raw = self.vendor.vendor_score(entity).await?;
        let scores = extract_scores(&entity.name, &raw)?;
        let risks = self.vendor.vendor_risks(entity).await?;
        let issues = risks.iter().filter_map(|r| r.to_finding()).collect::<Vec<_>>();
        info!(host = %entity.domain, issues = issues.len(), "Remediation findings fetched");

        Ok(RemediationDocument {
            hostname: entity.domain.clone(),
            title: entity.name.clone(),
            scores,
            issues,
        })
    }
}
