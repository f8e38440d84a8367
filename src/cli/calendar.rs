use std::{io, path::PathBuf};

use clap::Args;
use jiff::civil::Date;
use voyage::{
    availability::{calendar, date_range},
    config::Config,
    report::write_calendar,
    reservations::load_reservations,
};

#[derive(Debug, Args)]
pub(crate) struct CalendarArgs {
    /// YAML file of reservations
    #[arg(long)]
    reservations: PathBuf,

    /// Business to build the calendar for
    #[arg(long)]
    business: String,

    /// First date, YYYY-MM-DD
    #[arg(long)]
    from: Date,

    /// Last date, YYYY-MM-DD
    #[arg(long)]
    to: Date,
}

pub(crate) fn run(args: &CalendarArgs, config: &Config) -> Result<(), String> {
    let reservations = load_reservations(&args.reservations)
        .map_err(|error| format!("failed to load reservations: {error}"))?;

    let dates = date_range(args.from, args.to).map_err(|error| error.to_string())?;

    let records = calendar(&config.pricing, &args.business, &reservations, &dates)
        .map_err(|error| format!("failed to build calendar: {error}"))?;

    write_calendar(io::stdout().lock(), &records).map_err(|error| error.to_string())
}
