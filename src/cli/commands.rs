use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "muniscore", version, about = "Municipal security-posture scoring from vendor risk data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch scores and findings for every entity, persist them and write rankings
    Fetch(RunArgs),
    /// Rebuild rankings and charts from the last score file, without network calls
    Analyze(RunArgs),
    /// Fetch the risk time series and refresh the risks collection
    Risks(RunArgs),
    /// Build remediation reports for individual hosts
    Remediate(RemediateArgs),
    /// Check that the vendor answers for every configured entity
    Check(RunArgs),
    /// Delete every document in a collection
    Clear(ClearArgs),
    /// Print a stored document
    Query(QueryArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Options shared by every command that touches the config or the store.
#[derive(Args, Clone, Default)]
pub struct StoreArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// SQLite document store path
    #[arg(long)]
    pub db: Option<String>,
}

#[derive(Args, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Vendor API key (or `vendor.api_key` in the config, or UPGUARD_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Vendor API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Directory for the score file
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Directory for chart specs and the frequency file
    #[arg(long)]
    pub graph_dir: Option<String>,

    /// Ranking mode: stable, legacy-zip
    #[arg(long)]
    pub rank_mode: Option<String>,

    /// Record failing entities and continue instead of aborting
    #[arg(long)]
    pub skip_failures: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct RemediateArgs {
    /// Hostnames to build reports for, e.g. danversma.gov
    #[arg(required = true)]
    pub hosts: Vec<String>,

    /// Output directory for reports
    #[arg(short, long)]
    pub output: Option<String>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args, Clone)]
pub struct ClearArgs {
    /// Collection: scores, vulnerabilities, risks, remediation
    #[arg(long)]
    pub collection: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args, Clone)]
pub struct QueryArgs {
    /// Collection: scores, vulnerabilities, risks, remediation
    #[arg(long)]
    pub collection: String,

    /// Document key; omit to list keys
    pub name: Option<String>,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
