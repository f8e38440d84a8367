use std::{io, path::PathBuf};

use clap::Args;
use rust_decimal::Decimal;
use voyage::{
    config::Config,
    loyalty::{LoyaltyProfile, compute_loyalty_tier},
    report::write_loyalty,
    reservations::load_reservations,
};

#[derive(Debug, Args)]
pub(crate) struct LoyaltyArgs {
    /// Total spent, in major units
    #[arg(long, conflicts_with_all = ["reservations", "user"], required_unless_present = "reservations")]
    spent: Option<Decimal>,

    /// YAML file of reservations to sum the user's confirmed spend from
    #[arg(long, requires = "user")]
    reservations: Option<PathBuf>,

    /// User whose reservations are summed
    #[arg(long, requires = "reservations")]
    user: Option<String>,
}

pub(crate) fn run(args: &LoyaltyArgs, config: &Config) -> Result<(), String> {
    let status = match (args.spent, &args.reservations, &args.user) {
        (Some(spent), _, _) => compute_loyalty_tier(&config.loyalty, spent),
        (None, Some(path), Some(user)) => {
            let reservations = load_reservations(path)
                .map_err(|error| format!("failed to load reservations: {error}"))?;

            LoyaltyProfile::from_reservations(
                &config.loyalty,
                user,
                &reservations,
                config.pricing.base_price().currency(),
            )
            .map_err(|error| format!("failed to total spend for {user}: {error}"))?
            .status
        }
        _ => return Err("either --spent or --reservations with --user is required".to_string()),
    };

    write_loyalty(io::stdout().lock(), &status).map_err(|error| error.to_string())
}
