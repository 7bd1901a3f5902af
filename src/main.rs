use clap::Parser;
use muniscore::{cli, config, errors};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match (cli.quiet, cli.verbose) {
        (true, 0) => "warn",
        (_, 0) => "info",
        (_, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let quiet = cli.quiet;
    let result = match cli.command {
        cli::Commands::Fetch(args) => cli::fetch::handle_fetch(args, quiet).await,
        cli::Commands::Analyze(args) => cli::analyze::handle_analyze(args, quiet).await,
        cli::Commands::Risks(args) => cli::risks::handle_risks(args, quiet).await,
        cli::Commands::Remediate(args) => cli::remediate::handle_remediate(args, quiet).await,
        cli::Commands::Check(args) => cli::check::handle_check(args, quiet).await,
        cli::Commands::Clear(args) => cli::store::handle_clear(args).await,
        cli::Commands::Query(args) => cli::store::handle_query(args).await,
        cli::Commands::Validate(args) => handle_validate(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), errors::MuniError> {
    let path = std::path::PathBuf::from(&args.config);
    let app = config::parse_config(&path).await?;
    let entities = app.entities.map_or(config::entities::DEFAULT_ENTITIES.len(), |e| e.len());
    println!("Configuration is valid: {} ({} entities)", args.config, entities);
    Ok(())
}
