use std::path::PathBuf;
use std::sync::Arc;
use console::style;
use crate::cli::commands::{RunArgs, StoreArgs};
use crate::config::credentials::resolve_credential;
use crate::config::{self, AppConfig, FailurePolicy, RankMode, API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_STORE_PATH};
use crate::db::Database;
use crate::errors::MuniError;
use crate::pipeline::{BatchReport, PipelineConfig, PipelineOrchestrator};
use crate::vendor::{UpGuardClient, VendorApi};

pub async fn load_config(store: &StoreArgs) -> Result<AppConfig, MuniError> {
    match &store.config {
        Some(path) => config::parse_config(&PathBuf::from(path)).await,
        None => Ok(AppConfig::default()),
    }
}

pub fn open_database(store: &StoreArgs, app: &AppConfig) -> Result<Database, MuniError> {
    let path = store
        .db
        .clone()
        .or_else(|| app.store.as_ref()?.path.clone())
        .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string());
    Database::new(&path)
}

pub fn parse_rank_mode(value: &str) -> Result<RankMode, MuniError> {
    match value {
        "stable" => Ok(RankMode::Stable),
        "legacy-zip" => Ok(RankMode::LegacyZip),
        other => Err(MuniError::Config(format!("Invalid rank mode: {}", other))),
    }
}

/// Merge CLI flags over the file config. Flags win.
pub fn build_pipeline_config(args: &RunArgs, app: &AppConfig, quiet: bool) -> Result<PipelineConfig, MuniError> {
    let mut config = PipelineConfig::from_app_config(app)?;
    if let Some(dir) = &args.data_dir {
        config.data_dir = PathBuf::from(dir);
    }
    if let Some(dir) = &args.graph_dir {
        config.graph_dir = PathBuf::from(dir);
    }
    if let Some(mode) = &args.rank_mode {
        config.analysis.rank_mode = parse_rank_mode(mode)?;
    }
    if args.skip_failures {
        config.failure_policy = FailurePolicy::Skip;
    }
    config.show_progress = !quiet && !args.json;
    Ok(config)
}

/// API key from the flag, then `vendor.api_key`, then the environment.
pub fn resolve_api_key(args: &RunArgs, app: &AppConfig) -> Result<String, MuniError> {
    args.api_key
        .clone()
        .or_else(|| {
            let configured = app.vendor.as_ref()?.api_key.as_deref()?;
            resolve_credential(configured)
        })
        .or_else(|| std::env::var(API_KEY_ENV).ok())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| MuniError::Config(format!(
            "No vendor API key: pass --api-key, set vendor.api_key or export {}",
            API_KEY_ENV
        )))
}

pub fn build_vendor_client(args: &RunArgs, app: &AppConfig) -> Result<Arc<dyn VendorApi>, MuniError> {
    let api_key = resolve_api_key(args, app)?;
    let base_url = args
        .base_url
        .clone()
        .or_else(|| app.vendor.as_ref()?.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    Ok(Arc::new(UpGuardClient::new(&api_key, &base_url)))
}

/// Everything a network-backed command needs, resolved from flags and file.
pub async fn build_orchestrator(args: &RunArgs, quiet: bool) -> Result<PipelineOrchestrator, MuniError> {
    let app = load_config(&args.store).await?;
    let config = build_pipeline_config(args, &app, quiet)?;
    let vendor = build_vendor_client(args, &app)?;
    let db = open_database(&args.store, &app)?;
    Ok(PipelineOrchestrator::new(config, vendor, db))
}

pub fn print_report(title: &str, report: &BatchReport, json: bool) -> Result<(), MuniError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style(title).bold(), style(&report.run_id).dim());
    println!("  Entities:   {}/{}", report.scored, report.entities_total);
    if report.total_findings > 0 {
        println!(
            "  Findings:   {} ({} distinct, {} entities)",
            report.total_findings, report.distinct_findings, report.with_findings
        );
    }
    for (collection, stats) in &report.persisted {
        println!(
            "  Stored:     {} {} inserted, {} already present",
            style(collection).cyan(),
            stats.inserted,
            stats.skipped
        );
    }
    for path in &report.outputs {
        println!("  Wrote:      {}", path.display());
    }
    if !report.failures.is_empty() {
        println!("  {}", style(format!("Failures:   {}", report.failures.len())).red());
        for failure in &report.failures {
            println!(
                "    {} [{}] {}: {}",
                style(&failure.entity).yellow(),
                failure.stage,
                failure.error_type,
                failure.message
            );
        }
    }
    Ok(())
}
