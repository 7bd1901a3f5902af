use crate::cli::commands::RunArgs;
use crate::errors::MuniError;
use crate::pipeline::analyze_offline;
use super::setup::{build_pipeline_config, load_config, open_database, print_report};

pub async fn handle_analyze(args: RunArgs, quiet: bool) -> Result<(), MuniError> {
    let app = load_config(&args.store).await?;
    let config = build_pipeline_config(&args, &app, quiet)?;
    let db = open_database(&args.store, &app)?;

    let report = analyze_offline(&config, &db).await?;
    print_report("Analyze", &report, args.json)
}
