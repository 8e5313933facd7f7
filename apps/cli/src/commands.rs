//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use interwiki_client::{ClientOptions, ExtractClient};
use interwiki_shared::{AppConfig, EnglishMessages, init_config, load_config, load_config_from};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// InterwikiExtracts — embed excerpts of articles from other wikis.
#[derive(Parser)]
#[command(
    name = "interwiki",
    version,
    about = "Fetch rendered excerpts (text, HTML, or wikitext) from remote wiki APIs.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file path (defaults to ~/.interwiki-extracts/interwiki.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

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
    /// Fetch one extract and print it.
    Get {
        /// Title of the remote page.
        title: String,

        /// Raw invocation parameters: `key=value` pairs or bare flags,
        /// e.g. `format=text`, `wiki=somewiki`, `paragraphs=2`, `intro`.
        params: Vec<String>,
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
        0 => "interwiki=info",
        1 => "interwiki=debug",
        _ => "interwiki=trace",
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
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    match cli.command {
        Command::Get { title, params } => cmd_get(&config, &title, params).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(&config).await,
        },
    }
}

async fn cmd_get(config: &AppConfig, title: &str, params: Vec<String>) -> Result<()> {
    // The configured default format goes first so an explicit format token
    // from the command line overwrites it (the parameter parser is
    // last-wins).
    let mut tokens = vec![format!("format={}", config.defaults.format)];
    tokens.extend(params);

    info!(title, param_count = tokens.len(), "fetching extract");

    let opts = ClientOptions {
        timeout_secs: config.defaults.timeout_secs,
        ..ClientOptions::default()
    };
    let client = ExtractClient::new(&opts)
        .map_err(|e| color_eyre::eyre::eyre!("failed to set up HTTP client: {e}"))?;

    match client.extract(title, &tokens, config).await {
        Ok(extract) => {
            println!("{}", extract.body);
            Ok(())
        }
        Err(err) => {
            // Print the host-facing marker, but fail the process so
            // scripts can tell the invocation did not succeed.
            println!("{}", interwiki_shared::error_marker(&err, &EnglishMessages));
            std::process::exit(1);
        }
    }
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}
