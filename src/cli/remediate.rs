use std::path::PathBuf;
use crate::cli::commands::RemediateArgs;
use crate::errors::MuniError;
use crate::pipeline::PipelineOrchestrator;
use super::setup::{build_pipeline_config, build_vendor_client, load_config, open_database, print_report};

pub async fn handle_remediate(args: RemediateArgs, quiet: bool) -> Result<(), MuniError> {
    let app = load_config(&args.run.store).await?;
    let mut config = build_pipeline_config(&args.run, &app, quiet)?;
    if let Some(dir) = &args.output {
        config.remediation_dir = PathBuf::from(dir);
    }
    let vendor = build_vendor_client(&args.run, &app)?;
    let db = open_database(&args.run.store, &app)?;

    let orchestrator = PipelineOrchestrator::new(config, vendor, db);
    let report = orchestrator.remediate(&args.hosts).await?;
    print_report("Remediate", &report, args.run.json)
}
