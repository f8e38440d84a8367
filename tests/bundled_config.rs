//! The configuration shipped in `config/angola.yml` matches the built-in defaults.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use testresult::TestResult;

use voyage::{money::percent_to_decimal, prelude::*};

fn bundled() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("config/angola.yml")
}

#[test]
fn bundled_pricing_matches_defaults() -> TestResult {
    let config = Config::from_path(&bundled())?;
    let defaults = PricingPolicy::default();

    assert_eq!(config.pricing.total_slots(), defaults.total_slots());
    assert_eq!(config.pricing.base_price(), defaults.base_price());
    assert_eq!(
        percent_to_decimal(config.pricing.markup()).round_dp(4),
        percent_to_decimal(defaults.markup()).round_dp(4)
    );
    assert_eq!(config.pricing.overbooking(), OverbookingPolicy::Extrapolate);

    Ok(())
}

#[test]
fn bundled_loyalty_matches_defaults() -> TestResult {
    let config = Config::from_path(&bundled())?;
    let defaults = LoyaltyProgram::default();

    assert_eq!(config.loyalty.spend_per_point(), defaults.spend_per_point());

    for (loaded, default) in config.loyalty.rules().iter().zip(defaults.rules()) {
        assert_eq!(loaded.tier, default.tier);
        assert_eq!(loaded.threshold, default.threshold);
        assert_eq!(loaded.benefits, default.benefits);
        assert_eq!(
            percent_to_decimal(loaded.cashback).round_dp(4),
            percent_to_decimal(default.cashback).round_dp(4)
        );
    }

    Ok(())
}

#[test]
fn bundled_config_keeps_the_angola_guide() -> TestResult {
    let config = Config::from_path(&bundled())?;

    assert_eq!(config.guide, angola::guide());

    Ok(())
}

#[test]
fn bundled_config_prices_like_the_defaults() -> TestResult {
    let config = Config::from_path(&bundled())?;

    let status = compute_loyalty_tier(&config.loyalty, Decimal::from(25_000));
    let booking = booking_quote(
        &config.pricing,
        &config.loyalty,
        25,
        2,
        Some(Decimal::from(25_000)),
    )?;

    assert_eq!(status.tier, LoyaltyTier::Gold);
    // 2 x 625 = 1250, Gold 10% off
    assert_eq!(booking.quote.total.to_minor_units(), 112_500);

    Ok(())
}
