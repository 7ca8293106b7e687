mod commands;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::auth::Credentials;
use crate::client::SearchConsoleClient;
use crate::config::Config;
use crate::format::OutputFormat;

pub use commands::mcp::McpArgs;
pub use commands::report::{RangeArgs, ReportCommand};

#[derive(Parser, Debug)]
#[command(name = "gsc")]
#[command(author, version, about = "Google Search Console reports", long_about = None)]
pub struct Cli {
    /// Service account JSON key (default: GSC_CREDENTIALS_PATH env)
    #[arg(long, global = true)]
    pub credentials: Option<PathBuf>,

    /// Default property, e.g. sc-domain:example.com (default: GSC_SITE_URL env)
    #[arg(long, global = true)]
    pub site_url: Option<String>,

    /// Override the API URL (default: GSC_API_URL env or https://searchconsole.googleapis.com)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommand),
    /// Serve every report as an MCP tool
    Mcp(McpArgs),
}

/// Default log filter for a `-v` count, used when RUST_LOG is unset.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "search_console=warn",
        1 => "search_console=info",
        2 => "search_console=debug,tower_http=debug",
        _ => "search_console=trace,tower_http=trace,rmcp=debug",
    }
}

/// Initialize tracing subscriber with env filter
///
/// Logs go to stderr; stdout carries report output and the MCP stdio stream.
fn init_tracing(verbose: u8) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose).into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // reqwest is built without a bundled crypto provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    let config = Config::resolve(cli.credentials, cli.site_url, cli.api_url);
    debug!(api_url = %config.api_url, site_url = ?config.site_url, "resolved configuration");

    let http = reqwest::Client::new();
    let credentials = Credentials::from_config(&config, http.clone())?;
    let client = SearchConsoleClient::new(config.api_url.clone(), http, credentials);

    match cli.command {
        Commands::Report(command) => {
            let output =
                commands::report::execute(&client, config.site_url.as_deref(), command, cli.output)
                    .await?;
            println!("{}", output);
        }
        Commands::Mcp(args) => commands::mcp::execute(client, config.site_url, args).await?,
    }

    Ok(())
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod cli_test;
