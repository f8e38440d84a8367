use std::path::PathBuf;

use clap::{Parser, Subcommand};
use voyage::config::Config;

mod ask;
mod availability;
mod calendar;
mod loyalty;
mod quote;
mod stay;
mod topics;

#[derive(Debug, Parser)]
#[command(name = "voyage", about = "VOYAGEANGOLA pricing, loyalty and guide", long_about = None)]
pub(crate) struct Cli {
    /// YAML configuration file; built-in defaults are used when omitted
    #[arg(long, global = true, env = "VOYAGE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Availability and dynamic price for one date
    Availability(availability::AvailabilityArgs),

    /// Per-date availability of a business from a reservations file
    Calendar(calendar::CalendarArgs),

    /// Loyalty tier, points and cashback
    Loyalty(loyalty::LoyaltyArgs),

    /// Price of a booking, with the guest's tier discount
    Quote(quote::QuoteArgs),

    /// Cost of a multi-night stay
    Stay(stay::StayArgs),

    /// Ask the tour guide a question
    Ask(ask::AskArgs),

    /// List the guide's topics and quick questions
    Topics,
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), String> {
        let config = Config::load(self.config.as_deref())
            .map_err(|error| format!("failed to load configuration: {error}"))?;

        match self.command {
            Commands::Availability(args) => availability::run(&args, &config),
            Commands::Calendar(args) => calendar::run(&args, &config),
            Commands::Loyalty(args) => loyalty::run(&args, &config),
            Commands::Quote(args) => quote::run(&args, &config),
            Commands::Stay(args) => stay::run(&args, &config),
            Commands::Ask(args) => ask::run(&args, &config),
            Commands::Topics => topics::run(&config),
        }
    }
}
