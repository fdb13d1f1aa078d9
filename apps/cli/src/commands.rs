//! CLI command definitions, routing, and tracing setup.

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use dinodir_core::{Directory, EnrichmentProgress};
use dinodir_server::{AppState, run as serve_http};
use dinodir_shared::{AppConfig, ReferenceList, init_config, load_config};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::net::TcpListener;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// dinodir: the dinosaur directory as JSON.
#[derive(Parser)]
#[command(
    name = "dinodir",
    version,
    about = "Scrape the dinosaur directory and serve it as JSON.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Start the HTTP API.
    Serve {
        /// Port to listen on (overrides PORT and the config file).
        #[arg(short, long)]
        port: Option<u16>,

        /// Interface to bind (overrides the config file).
        #[arg(long)]
        host: Option<String>,
    },

    /// Print the directory listing as JSON.
    List,

    /// Print one dinosaur's detail record as JSON.
    Show {
        /// Dinosaur name, e.g. "Triceratops".
        name: String,
    },

    /// List the directory and fetch every detail page.
    Enrich {
        /// Maximum detail fetches in flight (overrides the config file).
        #[arg(long)]
        max_in_flight: Option<usize>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "dinodir=info,tower_http=info",
        1 => "dinodir=debug,tower_http=debug",
        _ => "dinodir=trace,tower_http=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve { port, host } => cmd_serve(port, host).await,
        Command::List => cmd_list().await,
        Command::Show { name } => cmd_show(&name).await,
        Command::Enrich { max_in_flight } => cmd_enrich(max_in_flight).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

async fn cmd_serve(port: Option<u16>, host: Option<String>) -> Result<()> {
    let mut config = load_config()?;
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(host) = host {
        config.server.host = host;
    }

    let directory = Directory::from_config(&config)?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("failed to bind {addr}"))?;

    info!(%addr, base_url = %config.source.base_url, "starting server");
    serve_http(listener, AppState::new(directory)).await?;
    Ok(())
}

async fn cmd_list() -> Result<()> {
    let directory = Directory::from_config(&load_config()?)?;
    let references = directory.list().await?;
    print_json(&ReferenceList::from(references))
}

async fn cmd_show(name: &str) -> Result<()> {
    let directory = Directory::from_config(&load_config()?)?;
    let record = directory.detail(name).await?;
    print_json(&record)
}

async fn cmd_enrich(max_in_flight: Option<usize>) -> Result<()> {
    let mut config = load_config()?;
    if let Some(n) = max_in_flight {
        config.enrichment.max_in_flight = n;
    }

    let directory = Directory::from_config(&config)?;
    let reporter = CliProgress::new();
    let result = directory.list_with_details(&reporter).await;
    reporter.finish();

    let aggregate = result?;
    info!(
        results = aggregate.count,
        no_data = aggregate.no_data_count,
        "directory enriched"
    );
    print_json(&aggregate)
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl EnrichmentProgress for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn item_done(&self, done: usize, total: usize) {
        self.spinner
            .set_message(format!("Fetching details [{done}/{total}]"));
    }
}
