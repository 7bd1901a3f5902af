use crate::cli::commands::RunArgs;
use crate::errors::MuniError;
use super::setup::{build_orchestrator, print_report};

pub async fn handle_risks(args: RunArgs, quiet: bool) -> Result<(), MuniError> {
    let orchestrator = build_orchestrator(&args, quiet).await?;
    let report = orchestrator.run_risks().await?;
    print_report("Risks", &report, args.json)
}
