mod export;
mod prompt;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use shopcat_core::{AppConfig, PacingMode, StorefrontLayout};
use shopcat_scraper::{
    EngineSettings, NoPacing, Pacer, ProgressEvent, RandomPacer, Reporter, Session,
    WebDriverBrowser,
};
use tracing_subscriber::EnvFilter;

use crate::export::{ExportFormat, Exporter};

#[derive(Debug, Parser)]
#[command(name = "shopcat")]
#[command(about = "Scrape a Shopee storefront's available and sold-out catalogs")]
struct Cli {
    /// Storefront URL; prompted for when missing or invalid.
    #[arg(long)]
    url: Option<String>,

    /// Records per catalog to preview; prompted for when missing.
    #[arg(long, allow_hyphen_values = true)]
    preview_limit: Option<String>,

    /// Output path (overrides `SHOPCAT_OUTPUT_PATH`).
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "xlsx")]
    format: ExportFormat,

    /// WebDriver server URL (overrides `SHOPCAT_WEBDRIVER_URL`).
    #[arg(long)]
    webdriver_url: Option<String>,

    /// Chrome remote-debugging address to attach to; empty launches a new
    /// browser.
    #[arg(long)]
    debugger_address: Option<String>,

    /// Disable the randomized pauses between actions.
    #[arg(long)]
    no_pacing: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(output) = &self.output {
            config.output_path.clone_from(output);
        }
        if let Some(url) = &self.webdriver_url {
            config.webdriver_url.clone_from(url);
        }
        if let Some(address) = &self.debugger_address {
            config.debugger_address = Some(address.clone()).filter(|a| !a.is_empty());
        }
        if self.no_pacing {
            config.pacing = PacingMode::Off;
        }
    }
}

/// Prints every progress event to stdout.
struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: ProgressEvent) {
        println!("{event}");
    }
}

fn pacer_for(mode: PacingMode) -> Box<dyn Pacer> {
    match mode {
        PacingMode::Random => Box::new(RandomPacer),
        PacingMode::Off => Box::new(NoPacing),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = shopcat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    cli.apply_overrides(&mut config);

    let (url, preview_limit) = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        let url = match cli.url.as_deref() {
            Some(url) if prompt::is_valid_store_url(url, &config.store_url_prefix) => {
                url.to_owned()
            }
            _ => prompt::read_store_url(&mut input, &mut output, &config.store_url_prefix)?,
        };
        let preview_limit =
            prompt::resolve_preview_limit(cli.preview_limit.as_deref(), &mut input, &mut output)?;
        (url, preview_limit)
    };

    tracing::info!(
        webdriver = %config.webdriver_url,
        debugger_address = ?config.debugger_address,
        pacing = %config.pacing,
        "connecting to browser"
    );
    let browser =
        WebDriverBrowser::connect(&config.webdriver_url, config.debugger_address.as_deref())
            .await?;

    let exporter = Exporter::new(cli.format, &config.output_path);
    let mut reporter = ConsoleReporter;
    let session = Session::new(
        browser,
        StorefrontLayout::default(),
        EngineSettings::from_config(&config, preview_limit),
        pacer_for(config.pacing),
        &mut reporter,
    )?;
    session.run(&url, &exporter).await?;

    Ok(())
}
