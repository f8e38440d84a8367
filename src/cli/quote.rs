use std::io;

use clap::Args;
use rust_decimal::Decimal;
use voyage::{booking::booking_quote, config::Config, report::write_quote};

#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    /// Slots already booked on the date
    #[arg(long)]
    booked: u32,

    /// Number of guests in the booking
    #[arg(long, default_value_t = 2)]
    guests: u32,

    /// Guest's total spend, in major units; omit for an anonymous guest
    #[arg(long)]
    spent: Option<Decimal>,
}

pub(crate) fn run(args: &QuoteArgs, config: &Config) -> Result<(), String> {
    if args.guests == 0 {
        return Err("guests must be at least 1".to_string());
    }

    let booking = booking_quote(
        &config.pricing,
        &config.loyalty,
        args.booked,
        args.guests,
        args.spent,
    )
    .map_err(|error| format!("failed to quote booking: {error}"))?;

    write_quote(io::stdout().lock(), &booking).map_err(|error| error.to_string())
}
