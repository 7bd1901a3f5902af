use console::style;
use crate::cli::commands::RunArgs;
use crate::errors::MuniError;
use super::setup::{build_orchestrator, print_report};

pub async fn handle_check(args: RunArgs, quiet: bool) -> Result<(), MuniError> {
    let orchestrator = build_orchestrator(&args, quiet).await?;
    let report = orchestrator.check().await;
    print_report("Check", &report, args.json)?;

    if report.is_clean() {
        if !args.json {
            println!("  {}", style("Vendor reachable for every entity").green());
        }
        Ok(())
    } else {
        Err(MuniError::Network(format!(
            "{} of {} entities failed the vendor check",
            report.failures.len(),
            report.entities_total
        )))
    }
}
