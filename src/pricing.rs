//! Pricing
//!
//! Occupancy-driven dynamic pricing, the final price of a booking once the guest's loyalty
//! cashback has been taken off, and the cost of a multi-night stay.

use std::num::NonZeroU32;

use decimal_percentage::Percentage;
use jiff::civil::Date;
use rust_decimal::Decimal;
use rusty_money::{
    Money, MoneyError,
    iso::{self, Currency},
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::money::{percent_of_minor, percent_to_decimal, round_to_major_unit};

/// Capacity used when a business has not configured its own.
pub const DEFAULT_TOTAL_SLOTS: NonZeroU32 = match NonZeroU32::new(50) {
    Some(slots) => slots,
    None => NonZeroU32::MIN,
};

/// Base price used when a business has not configured its own, in minor AOA units.
pub const DEFAULT_BASE_PRICE_MINOR: i64 = 50_000;

/// Share of a stay's total shown as the room subtotal.
pub const STAY_SUBTOTAL_SHARE: Decimal = Decimal::from_parts(85, 0, 0, false, 2);

/// Share of a stay's total shown as taxes.
pub const STAY_TAX_SHARE: Decimal = Decimal::from_parts(14, 0, 0, false, 2);

/// Share of a stay's total shown as service fees.
pub const STAY_FEE_SHARE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

const SECONDS_PER_DAY: u64 = 86_400;

/// Errors that can occur while pricing.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A computed amount does not fit in the money representation.
    #[error("computed amount is out of range")]
    AmountOutOfRange,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Check-out is not after check-in.
    #[error("check-out ({check_out}) must be after check-in ({check_in})")]
    EmptyStay {
        /// Arrival date.
        check_in: Date,
        /// Departure date.
        check_out: Date,
    },
}

/// How the markup behaves once more slots are booked than the business has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverbookingPolicy {
    /// Keep growing the markup linearly with occupancy, past the configured ceiling.
    #[default]
    Extrapolate,

    /// Treat any occupancy above 100% as 100%, so the markup never exceeds its ceiling.
    Cap,
}

/// Capacity and price settings for one business.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingPolicy<'a> {
    total_slots: NonZeroU32,
    base_price: Money<'a, Currency>,
    markup: Percentage,
    overbooking: OverbookingPolicy,
}

impl<'a> PricingPolicy<'a> {
    /// Create a policy with the default 50% markup at full occupancy.
    pub fn new(total_slots: NonZeroU32, base_price: Money<'a, Currency>) -> Self {
        Self {
            total_slots,
            base_price,
            markup: Percentage::from(0.5),
            overbooking: OverbookingPolicy::default(),
        }
    }

    /// Set the markup applied at 100% occupancy.
    #[must_use]
    pub fn with_markup(mut self, markup: Percentage) -> Self {
        self.markup = markup;
        self
    }

    /// Set the over-booking behaviour.
    #[must_use]
    pub fn with_overbooking(mut self, overbooking: OverbookingPolicy) -> Self {
        self.overbooking = overbooking;
        self
    }

    /// Slot capacity per date.
    pub fn total_slots(&self) -> NonZeroU32 {
        self.total_slots
    }

    /// Reference price before any markup.
    pub fn base_price(&self) -> &Money<'a, Currency> {
        &self.base_price
    }

    /// Markup applied at 100% occupancy.
    pub fn markup(&self) -> Percentage {
        self.markup
    }

    /// Over-booking behaviour.
    pub fn overbooking(&self) -> OverbookingPolicy {
        self.overbooking
    }
}

impl Default for PricingPolicy<'static> {
    fn default() -> Self {
        Self::new(
            DEFAULT_TOTAL_SLOTS,
            Money::from_minor(DEFAULT_BASE_PRICE_MINOR, iso::AOA),
        )
    }
}

/// Availability and dynamic price for a given number of booked slots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Availability<'a> {
    /// Whether at least one slot is still free.
    pub available: bool,

    /// Slots taken.
    pub booked_slots: u32,

    /// Slot capacity.
    pub total_slots: NonZeroU32,

    /// `booked_slots / total_slots`, may exceed 1 when over-booked.
    pub occupancy_rate: Decimal,

    /// Reference price.
    pub base_price: Money<'a, Currency>,

    /// Price after the occupancy markup, rounded to a whole major unit.
    pub dynamic_price: Money<'a, Currency>,
}

impl Availability<'_> {
    /// Whether demand has pushed the price above the base price.
    pub fn is_surge_priced(&self) -> bool {
        self.dynamic_price.to_minor_units() > self.base_price.to_minor_units()
    }
}

/// Compute availability and the occupancy-based dynamic price.
///
/// `dynamic = round(base * (1 + occupancy * markup))`, rounded to a whole major unit and never
/// below the base price.
///
/// # Errors
///
/// Returns [`PricingError::AmountOutOfRange`] if the marked-up price cannot be represented.
pub fn compute_availability<'a>(
    policy: &PricingPolicy<'a>,
    booked_slots: u32,
) -> Result<Availability<'a>, PricingError> {
    let total_slots = policy.total_slots;
    let occupancy_rate = Decimal::from(booked_slots) / Decimal::from(total_slots.get());

    let priced_occupancy = match policy.overbooking {
        OverbookingPolicy::Extrapolate => occupancy_rate,
        OverbookingPolicy::Cap => occupancy_rate.min(Decimal::ONE),
    };

    let multiplier = priced_occupancy
        .checked_mul(percent_to_decimal(policy.markup))
        .and_then(|markup| markup.checked_add(Decimal::ONE))
        .ok_or(PricingError::AmountOutOfRange)?;

    let currency = policy.base_price.currency();
    let base_minor = policy.base_price.to_minor_units();

    let dynamic_minor = Decimal::from(base_minor)
        .checked_mul(multiplier)
        .and_then(|minor| round_to_major_unit(minor, currency))
        .ok_or(PricingError::AmountOutOfRange)?
        .max(base_minor);

    debug!(
        booked_slots,
        total_slots = total_slots.get(),
        %occupancy_rate,
        dynamic_minor,
        "computed dynamic price"
    );

    Ok(Availability {
        available: booked_slots < total_slots.get(),
        booked_slots,
        total_slots,
        occupancy_rate,
        base_price: policy.base_price,
        dynamic_price: Money::from_minor(dynamic_minor, currency),
    })
}

/// Price breakdown for a booking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote<'a> {
    /// Price per guest.
    pub unit_price: Money<'a, Currency>,

    /// Number of guests.
    pub guests: u32,

    /// `unit_price * guests`.
    pub subtotal: Money<'a, Currency>,

    /// Cashback rate applied.
    pub cashback_rate: Percentage,

    /// Amount taken off the subtotal.
    pub discount: Money<'a, Currency>,

    /// Amount payable, never negative.
    pub total: Money<'a, Currency>,
}

/// Break down the price of a booking for `guests` people at `unit_price` each.
///
/// # Errors
///
/// Returns [`PricingError::AmountOutOfRange`] if the subtotal or discount overflows.
pub fn quote<'a>(
    unit_price: &Money<'a, Currency>,
    guests: u32,
    cashback_rate: Percentage,
) -> Result<Quote<'a>, PricingError> {
    let currency = unit_price.currency();

    let subtotal = unit_price
        .to_minor_units()
        .checked_mul(i64::from(guests))
        .ok_or(PricingError::AmountOutOfRange)?;

    let discount =
        percent_of_minor(cashback_rate, subtotal).ok_or(PricingError::AmountOutOfRange)?;

    let total = subtotal
        .checked_sub(discount)
        .ok_or(PricingError::AmountOutOfRange)?
        .max(0);

    Ok(Quote {
        unit_price: *unit_price,
        guests,
        subtotal: Money::from_minor(subtotal, currency),
        cashback_rate,
        discount: Money::from_minor(discount, currency),
        total: Money::from_minor(total, currency),
    })
}

/// Final amount payable: `max(0, price * guests - price * guests * cashback)`.
///
/// # Errors
///
/// Returns [`PricingError::AmountOutOfRange`] if the subtotal or discount overflows.
pub fn final_price<'a>(
    dynamic_price: &Money<'a, Currency>,
    guests: u32,
    cashback_rate: Percentage,
) -> Result<Money<'a, Currency>, PricingError> {
    Ok(quote(dynamic_price, guests, cashback_rate)?.total)
}

/// Cost of a stay of one or more nights.
///
/// `subtotal`, `taxes` and `fees` split `total` for display and are each rounded to a whole major
/// unit, so they need not add up to `total` exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StayQuote<'a> {
    /// Price of one night.
    pub nightly_rate: Money<'a, Currency>,

    /// Arrival date.
    pub check_in: Date,

    /// Departure date.
    pub check_out: Date,

    /// Nights between check-in and check-out.
    pub nights: u32,

    /// Room share of the total.
    pub subtotal: Money<'a, Currency>,

    /// Tax share of the total.
    pub taxes: Money<'a, Currency>,

    /// Fee share of the total.
    pub fees: Money<'a, Currency>,

    /// `nightly_rate * nights`.
    pub total: Money<'a, Currency>,
}

/// Price a stay from `check_in` to `check_out` at `nightly_rate`.
///
/// # Errors
///
/// - [`PricingError::EmptyStay`]: `check_out` is on or before `check_in`.
/// - [`PricingError::AmountOutOfRange`]: the total cannot be represented.
pub fn stay_quote<'a>(
    nightly_rate: &Money<'a, Currency>,
    check_in: Date,
    check_out: Date,
) -> Result<StayQuote<'a>, PricingError> {
    let empty_stay = || PricingError::EmptyStay {
        check_in,
        check_out,
    };

    let seconds = u64::try_from(check_in.duration_until(check_out).as_secs())
        .map_err(|_err| empty_stay())?;

    let nights = u32::try_from(seconds.div_ceil(SECONDS_PER_DAY))
        .map_err(|_err| PricingError::AmountOutOfRange)?;

    if nights == 0 {
        return Err(empty_stay());
    }

    let currency = nightly_rate.currency();

    let total = nightly_rate
        .to_minor_units()
        .checked_mul(i64::from(nights))
        .ok_or(PricingError::AmountOutOfRange)?;

    let share = |fraction: Decimal| -> Result<Money<'a, Currency>, PricingError> {
        Decimal::from(total)
            .checked_mul(fraction)
            .and_then(|minor| round_to_major_unit(minor, currency))
            .map(|minor| Money::from_minor(minor, currency))
            .ok_or(PricingError::AmountOutOfRange)
    };

    debug!(%check_in, %check_out, nights, total, "priced stay");

    Ok(StayQuote {
        nightly_rate: *nightly_rate,
        check_in,
        check_out,
        nights,
        subtotal: share(STAY_SUBTOTAL_SHARE)?,
        taxes: share(STAY_TAX_SHARE)?,
        fees: share(STAY_FEE_SHARE)?,
        total: Money::from_minor(total, currency),
    })
}
