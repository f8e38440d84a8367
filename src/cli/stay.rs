use std::io;

use clap::Args;
use jiff::civil::Date;
use voyage::{config::Config, money::parse_price, pricing::stay_quote, report::write_stay};

#[derive(Debug, Args)]
pub(crate) struct StayArgs {
    /// Arrival date, YYYY-MM-DD
    #[arg(long)]
    check_in: Date,

    /// Departure date, YYYY-MM-DD
    #[arg(long)]
    check_out: Date,

    /// Price of one night, e.g. "850 AOA"; defaults to the configured base price
    #[arg(long)]
    rate: Option<String>,
}

pub(crate) fn run(args: &StayArgs, config: &Config) -> Result<(), String> {
    let rate = match &args.rate {
        Some(rate) => parse_price(rate).map_err(|error| error.to_string())?,
        None => *config.pricing.base_price(),
    };

    let stay = stay_quote(&rate, args.check_in, args.check_out)
        .map_err(|error| format!("failed to price stay: {error}"))?;

    write_stay(io::stdout().lock(), &stay).map_err(|error| error.to_string())
}
