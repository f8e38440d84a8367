use std::io;

use clap::Args;
use voyage::{config::Config, pricing::compute_availability, report::write_availability};

#[derive(Debug, Args)]
pub(crate) struct AvailabilityArgs {
    /// Slots already booked on the date
    #[arg(long)]
    booked: u32,
}

pub(crate) fn run(args: &AvailabilityArgs, config: &Config) -> Result<(), String> {
    let availability = compute_availability(&config.pricing, args.booked)
        .map_err(|error| format!("failed to price date: {error}"))?;

    write_availability(io::stdout().lock(), &availability)
        .map_err(|error| error.to_string())
}
