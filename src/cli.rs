//! Command-line entry: pick a provider and scenario, send it, show the stream.

use crate::config::Config;
use crate::display::{Console, EventPrinter, print_error};
use crate::provider::{self, Client, Provider};
use crate::scenario::{Assets, Scenario};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use crossterm::style::{Color, Stylize};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter (e.g. `chatwire=debug`).
pub const LOG_ENV: &str = "CHATWIRE_LOG";

/// Send an example chat request to OpenAI or Anthropic and show the streamed response
#[derive(Parser, Debug)]
#[command(name = "chatwire", version, about)]
pub struct Cli {
    /// LLM provider to use
    #[arg(long, value_enum)]
    pub provider: ProviderArg,

    /// Scenario to demonstrate
    #[arg(long, value_enum)]
    pub scenario: ScenarioArg,

    /// Model override (defaults depend on provider and scenario)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Directory containing tires.jpeg and plot.png
    #[arg(long)]
    pub asset_dir: Option<PathBuf>,

    /// API base URL override (for proxies or local servers)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Debug logging to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderArg {
    #[value(name = "openai")]
    OpenAI,
    #[value(name = "anthropic")]
    Anthropic,
}

impl From<ProviderArg> for Provider {
    fn from(p: ProviderArg) -> Self {
        match p {
            ProviderArg::OpenAI => Self::OpenAI,
            ProviderArg::Anthropic => Self::Anthropic,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioArg {
    #[value(name = "simple_chat")]
    SimpleChat,
    #[value(name = "image_input")]
    ImageInput,
    #[value(name = "tool_call")]
    ToolCall,
    #[value(name = "tool_response")]
    ToolResponse,
    #[value(name = "image_in_tool")]
    ImageInTool,
}

impl From<ScenarioArg> for Scenario {
    fn from(s: ScenarioArg) -> Self {
        match s {
            ScenarioArg::SimpleChat => Self::SimpleChat,
            ScenarioArg::ImageInput => Self::ImageInput,
            ScenarioArg::ToolCall => Self::ToolCall,
            ScenarioArg::ToolResponse => Self::ToolResponse,
            ScenarioArg::ImageInTool => Self::ImageInTool,
        }
    }
}

/// Settings for one run, after merging flags over config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub provider: Provider,
    pub scenario: Scenario,
    pub model: Option<String>,
    pub asset_dir: PathBuf,
    pub base_url: String,
}

impl Cli {
    /// Flags win over config values.
    #[must_use]
    pub fn resolve(&self, config: &Config) -> RunSettings {
        let provider = Provider::from(self.provider);
        RunSettings {
            provider,
            scenario: self.scenario.into(),
            model: self
                .model
                .clone()
                .or_else(|| config.model(provider).map(str::to_string)),
            asset_dir: self
                .asset_dir
                .clone()
                .unwrap_or_else(|| config.asset_dir().to_path_buf()),
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| config.base_url(provider).to_string()),
        }
    }
}

/// Remediation text for a missing API key.
pub fn missing_key_help(provider: Provider) -> Vec<String> {
    let key = provider.env_var();
    vec![
        format!("Error: Missing {key}!"),
        String::new(),
        "You can provide it by either:".to_string(),
        format!("  1. Creating a .env file with: {key}=your-key-here"),
        format!("  2. Setting environment variable: export {key}=your-key-here"),
    ]
}

fn print_missing_key(provider: Provider) {
    let lines = missing_key_help(provider);
    print_error(&lines[0]);
    for line in &lines[1..] {
        match line.split_once(": ") {
            Some((label, command)) => eprintln!("{label}: {}", command.with(Color::Cyan)),
            None => eprintln!("{line}"),
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = match std::env::var(LOG_ENV) {
        Ok(directives) => EnvFilter::new(directives),
        Err(_) if verbose => EnvFilter::new("chatwire=debug"),
        Err(_) => return,
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the demo and map every failure to a diagnostic and exit status.
pub async fn run(cli: Cli) -> ExitCode {
    init_tracing(cli.verbose);

    match run_inner(cli).await {
        Ok(code) => code,
        Err(e) => {
            print_error(&format!("Error: {e}"));
            ExitCode::FAILURE
        }
    }
}

async fn run_inner(cli: Cli) -> Result<ExitCode> {
    let config = Config::load()?;
    let settings = cli.resolve(&config);
    let provider = settings.provider;

    let api_key = match config.require_api_key(provider) {
        Ok(key) => key,
        Err(e) => {
            tracing::debug!("{e}");
            print_missing_key(provider);
            return Ok(ExitCode::FAILURE);
        }
    };

    let assets = Assets::new(&settings.asset_dir);
    let payload = settings
        .scenario
        .payload(provider, &assets, settings.model.as_deref())?;

    tracing::debug!(
        provider = provider.id(),
        scenario = settings.scenario.id(),
        model = %payload["model"],
        asset_dir = %assets.dir().display(),
        "Prepared request"
    );

    let client = Client::with_base_url(provider, api_key, &settings.base_url)?;

    let mut console = Console::stdout();
    console.payload(&format!("{provider} Request Payload"), &payload)?;
    console.stream_start()?;

    let result = {
        let mut printer = EventPrinter::new(&mut console, provider.dialect().sentinel());
        client.stream(&payload, &mut printer).await
    };

    match result {
        Ok(outcome) => {
            console.complete(&outcome)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(provider::Error::Http { status, body }) => {
            print_error(&format!("Error {status}: {body}"));
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
