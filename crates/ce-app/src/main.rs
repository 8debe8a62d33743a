//! Countries Explorer
//!
//! Terminal front end: search the country list, open a country's details
//! and compare two countries side by side.

use anyhow::{Context, Result};
use ce_api::{CountrySource, RestCountriesClient};
use ce_app::{spawn_panel_reporter, Command, CommandError, ListPage, Outcome, Session};
use ce_comparison::ComparisonPanel;
use ce_config::ExplorerConfig;
use ce_event_bus::EventBus;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(
    name = "countries-explorer",
    version,
    about = "Search, inspect and compare countries"
)]
struct Cli {
    #[arg(long, short, help = "YAML configuration file")]
    config: Option<PathBuf>,
    #[arg(long, help = "REST Countries base URL")]
    base_url: Option<String>,
    #[arg(long, help = "Delay in milliseconds between closing the comparison and clearing it")]
    close_delay_ms: Option<u64>,
    #[arg(long, env = "RUST_LOG", default_value = "info", help = "Log filter directive")]
    log_level: String,
}

fn init_tracing(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("invalid log filter '{directive}'"))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// File, then environment, then command line
fn load_config(cli: &Cli) -> Result<ExplorerConfig> {
    let mut config = match &cli.config {
        Some(path) => ExplorerConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => ExplorerConfig::default(),
    };
    config
        .apply_env()
        .context("invalid environment override")?;

    if let Some(url) = &cli.base_url {
        config.api_base_url = url.clone();
    }
    if let Some(ms) = cli.close_delay_ms {
        config.close_delay_ms = ms;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;
    let config = load_config(&cli)?;

    info!(
        api = %config.api_base_url,
        close_delay_ms = config.close_delay_ms,
        "Starting countries explorer"
    );

    let source: Arc<dyn CountrySource> = Arc::new(
        RestCountriesClient::new(
            &config.api_base_url,
            config.request_timeout(),
            config.list_fields.clone(),
        )
        .context("failed to build HTTP client")?,
    );
    let bus = Arc::new(EventBus::new());
    let panel = ComparisonPanel::new(bus.clone(), config.close_delay());
    let list = ListPage::new(source.clone(), panel, bus.clone(), config.compare_control);
    let reporter = spawn_panel_reporter(&bus, |line| println!("{line}"));

    let mut session = Session::new(list, source);
    println!("{}", session.start().await);
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match line.parse::<Command>() {
                    Ok(command) => match session.execute(command).await {
                        Outcome::Print(output) => println!("{output}"),
                        Outcome::Quit => break,
                    },
                    Err(CommandError::Empty) => {}
                    Err(e) => println!("{e}"),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    reporter.abort();
    info!("Shutting down");
    Ok(())
}
