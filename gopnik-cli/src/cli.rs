use anyhow::anyhow;
use clap::{Parser, Subcommand};
use tracing::warn;

use gopnik_core::advice::{self, StrategyId, generative};
use gopnik_core::config::API_KEY_ENV;
use gopnik_core::{
    CityQuery, Config, Coordinates, GeocodingClient, RequestInput, RequestPipeline, WeatherClient,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "gopnik", version, about = "Street-smart clothing advice from live weather")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Choose the default advice strategy and store generative credentials.
    Configure,

    /// Get clothing advice for a city name.
    City {
        /// City name; multiple words are joined with spaces.
        #[arg(required = true)]
        name: Vec<String>,

        /// Advice strategy, "rules" or "generative"; overrides the configured default.
        #[arg(long)]
        strategy: Option<String>,
    },

    /// Get clothing advice for a coordinate pair.
    Coords {
        latitude: f64,
        longitude: f64,

        /// Advice strategy, "rules" or "generative"; overrides the configured default.
        #[arg(long)]
        strategy: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::City { name, strategy } => {
                let raw = name.join(" ");
                let query = CityQuery::parse(&raw)
                    .ok_or_else(|| anyhow!("City name must be non-empty"))?;

                advise(RequestInput::City(query), strategy).await
            }
            Command::Coords { latitude, longitude, strategy } => {
                let coords = Coordinates { latitude, longitude };
                advise(RequestInput::Coordinates(coords), strategy).await
            }
        }
    }
}

async fn advise(input: RequestInput, strategy_override: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    // The environment wins over the stored credential.
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.is_empty() {
            config.upsert_generative_api_key(key);
        }
    }

    let strategy = match strategy_override {
        Some(name) => {
            let id = StrategyId::try_from(name.as_str())?;
            advice::strategy_from_config(id, &config)?
        }
        None => advice::default_strategy_from_config(&config)?,
    };

    let pipeline = RequestPipeline::new(GeocodingClient::new()?, WeatherClient::new()?, strategy);

    match pipeline.handle(input).await {
        Ok(reply) => println!("{}", reply.text),
        Err(failure) => {
            warn!(%failure, "request failed");
            println!("{}", failure.user_reply());
        }
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let options: Vec<&str> = StrategyId::all().iter().map(|id| id.as_str()).collect();
    let choice = inquire::Select::new("Default advice strategy:", options).prompt()?;
    let id = StrategyId::try_from(choice)?;

    config.set_default_strategy(id);

    if id == StrategyId::Generative {
        let api_key = inquire::Password::new("Generative API key:")
            .without_confirmation()
            .prompt()?;
        if api_key.trim().is_empty() {
            return Err(anyhow!("Generative API key cannot be empty"));
        }
        config.upsert_generative_api_key(api_key.trim().to_string());

        let model = inquire::Text::new("Model:")
            .with_default(generative::DEFAULT_MODEL)
            .prompt()?;
        config.set_generative_model(model.trim().to_string());
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
