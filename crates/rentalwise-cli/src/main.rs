mod properties;
mod reservations;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use rentalwise_client::VendorClient;
use tracing_subscriber::EnvFilter;

use properties::{SearchArgs, StayArgs};
use reservations::ReservationCommands;

#[derive(Debug, Parser)]
#[command(name = "rentalwise")]
#[command(about = "RentalWise vendor API command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the resolved vendor configuration (secrets redacted)
    Config,
    /// List properties
    Properties {
        #[command(flatten)]
        search: SearchArgs,
        /// Print normalized JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one normalized property
    Property {
        /// Vendor property id
        id: String,
    },
    /// Search properties
    Search {
        #[command(flatten)]
        search: SearchArgs,
        /// Print normalized JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Check availability for a stay
    Availability {
        /// Vendor property id
        id: String,
        #[command(flatten)]
        stay: StayArgs,
    },
    /// Show per-day availability for a month
    Calendar {
        /// Vendor property id
        id: String,
        /// Month as YYYY-MM
        #[arg(long)]
        month: String,
    },
    /// Get a pricing quote for a stay
    Quote {
        /// Vendor property id
        id: String,
        #[command(flatten)]
        stay: StayArgs,
        /// Number of guests
        #[arg(long, default_value = "1")]
        guests: u32,
    },
    /// Reservation lookups and cancellation
    Reservation {
        #[command(subcommand)]
        command: ReservationCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = rentalwise_core::resolve_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if matches!(cli.command, Commands::Config) {
        println!("{config:#?}");
        println!(
            "configured: {}",
            if rentalwise_core::is_configured(&config) {
                "yes"
            } else {
                "no (set RENTALWISE_API_KEY)"
            }
        );
        return Ok(());
    }

    if !rentalwise_core::is_configured(&config) {
        tracing::warn!("continuing without an API key; the vendor will likely reject requests");
    }

    let client = Arc::new(
        VendorClient::new(&config)
            .map_err(|e| anyhow::anyhow!("failed to build RentalWise client: {e}"))?,
    );

    match cli.command {
        Commands::Config => {}
        Commands::Properties { search, json } => {
            properties::run_properties(&client, &search, json).await?;
        }
        Commands::Property { id } => properties::run_property(&client, &id).await?,
        Commands::Search { search, json } => {
            properties::run_search(&client, &search, json).await?;
        }
        Commands::Availability { id, stay } => {
            properties::run_availability(&client, &id, &stay).await?;
        }
        Commands::Calendar { id, month } => {
            properties::run_calendar(&client, &id, &month).await?;
        }
        Commands::Quote { id, stay, guests } => {
            properties::run_quote(&client, &id, &stay, guests).await?;
        }
        Commands::Reservation { command } => reservations::run(&client, command).await?,
    }

    Ok(())
}

/// Pretty-prints any serializable value to stdout.
pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
