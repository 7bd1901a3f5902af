use crate::cli::commands::RunArgs;
use crate::errors::MuniError;
use super::setup::{build_orchestrator, print_report};
use tracing::info;

pub async fn handle_fetch(args: RunArgs, quiet: bool) -> Result<(), MuniError> {
    let orchestrator = build_orchestrator(&args, quiet).await?;
    let report = orchestrator.run().await?;

    info!(
        scored = report.scored,
        distinct_findings = report.distinct_findings,
        inserted = report.inserted_total(),
        skipped = report.skipped_total(),
        "Fetch completed"
    );
    print_report("Fetch", &report, args.json)
}
