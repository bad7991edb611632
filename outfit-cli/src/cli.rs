use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use outfit_core::{
    Config, RecommendationRequest, RecommendationResponse, ServiceId, collect_images,
    service::{image_lookup_or_unconfigured, translator_from_config},
    transport::ErrorBody,
};
use serde_json::Value;

use crate::{output, server};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "outfit", version, about = "Clothing recommendations from weather readings")]
pub struct Cli {
    /// Log progress to stderr. `RUST_LOG` overrides this.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store credentials for an external service.
    Configure {
        /// Service short name, e.g. "pexels".
        service: String,
    },

    /// Recommend clothing for a weather reading.
    Recommend(RecommendArgs),

    /// Translate text with the configured translation service.
    Translate {
        /// Text to translate.
        text: String,

        /// Target language code, e.g. "de" or "zh-CN".
        #[arg(long = "to")]
        target_lang: String,
    },

    /// Serve recommendations and translations over HTTP.
    Serve {
        /// Interface to bind; defaults to the configured host.
        #[arg(long)]
        host: Option<String>,

        /// Port to bind; defaults to the configured port.
        #[arg(long)]
        port: Option<u16>,

        /// Pexels API key; overrides the stored one.
        #[arg(long, env = "PEXELS_API_KEY", hide_env_values = true)]
        pexels_key: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct RecommendArgs {
    /// Air temperature in °C.
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: Option<f64>,

    /// Relative humidity in percent (0-100).
    #[arg(long, allow_negative_numbers = true)]
    pub humidity: Option<f64>,

    /// UV index (>= 0).
    #[arg(long, allow_negative_numbers = true)]
    pub uv_index: Option<f64>,

    /// Wind speed in km/h (>= 0).
    #[arg(long, allow_negative_numbers = true)]
    pub wind_speed: Option<f64>,

    /// Request object as JSON, e.g. '{"temperature": 21, ...}'. Replaces the flags.
    #[arg(long, conflicts_with_all = ["temperature", "humidity", "uv_index", "wind_speed"])]
    pub json: Option<String>,

    /// Look up pictures for every recommended item.
    #[arg(long)]
    pub images: bool,

    /// Pexels API key; overrides the stored one.
    #[arg(long, env = "PEXELS_API_KEY", hide_env_values = true)]
    pub pexels_key: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

impl RecommendArgs {
    pub fn to_request(&self) -> anyhow::Result<RecommendationRequest> {
        match &self.json {
            Some(raw) => serde_json::from_str(raw).context("Failed to parse --json request object"),
            None => Ok(RecommendationRequest {
                temperature: self.temperature.map(Value::from),
                humidity: self.humidity.map(Value::from),
                uv_index: self.uv_index.map(Value::from),
                wind_speed: self.wind_speed.map(Value::from),
            }),
        }
    }
}

/// Stored config with run-time overrides applied.
fn load_config(pexels_key: Option<&str>) -> anyhow::Result<Config> {
    let mut config = Config::load()?;
    if let Some(key) = pexels_key {
        config.upsert_service_api_key(ServiceId::Pexels, key.to_string());
    }
    Ok(config)
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { service } => configure(&service),
            Command::Recommend(args) => recommend(args).await,
            Command::Translate { text, target_lang } => translate(&text, &target_lang).await,
            Command::Serve { host, port, pexels_key } => {
                let mut config = load_config(pexels_key.as_deref())?;
                if host.is_some() {
                    config.server.host = host;
                }
                if port.is_some() {
                    config.server.port = port;
                }
                let state = server::AppState::from_config(&config)?;
                server::run(&config.server_addr(), state).await
            }
        }
    }
}

fn configure(service: &str) -> anyhow::Result<()> {
    let id = ServiceId::try_from(service)?;
    if !id.requires_api_key() {
        println!("Service '{id}' needs no API key; nothing to configure.");
        return Ok(());
    }

    let mut config = Config::load()?;
    let api_key = inquire::Password::new(&format!("API key for {id}:"))
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(anyhow!("API key must not be empty"));
    }

    config.upsert_service_api_key(id, api_key.to_string());
    config.save()?;

    println!("Saved credentials for '{id}' to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn recommend(args: RecommendArgs) -> anyhow::Result<()> {
    let request = args.to_request()?;
    let recommendation = request
        .evaluate()
        .map_err(|err| anyhow!("{}: {err}", ErrorBody::for_request(&err).error))?;

    let images = if args.images {
        let config = load_config(args.pexels_key.as_deref())?;
        let lookup = image_lookup_or_unconfigured(&config);
        Some(collect_images(lookup.as_ref(), &recommendation).await)
    } else {
        None
    };

    let mut response = RecommendationResponse::from(recommendation);
    if let Some(images) = images {
        response = response.with_images(images);
    }

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Text => print!("{}", output::render(&response)),
    }

    Ok(())
}

async fn translate(text: &str, target_lang: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let translator = translator_from_config(&config)?;

    let translated = translator
        .translate(text, target_lang)
        .await
        .context("Translation failed")?;

    println!("{translated}");
    Ok(())
}
