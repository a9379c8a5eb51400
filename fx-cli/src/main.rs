//! FX CLI
//!
//! Command-line interface for the FX rate proxy API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use fx_client::FxClient;

#[derive(Parser)]
#[command(name = "fx")]
#[command(author, version, about = "FX rate proxy CLI client", long_about = None)]
struct Cli {
    /// Base URL of the FX rate proxy
    #[arg(long, env = "FX_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current exchange rates
    Rates {
        /// Only show this currency (e.g. SGD)
        #[arg(long, short)]
        currency: Option<String>,
    },
    /// Check API health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = FxClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Rates { currency: None } => {
            let rates = client.current_rates().await?;
            println!("{}", serde_json::to_string_pretty(&rates)?);
        }

        Commands::Rates {
            currency: Some(currency),
        } => match client.rate(&currency).await? {
            Some(rate) => println!("{} {}", currency.trim().to_uppercase(), rate),
            None => anyhow::bail!("Unknown currency: {}", currency),
        },
    }

    Ok(())
}
