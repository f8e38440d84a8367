//! Booking
//!
//! Price summary shown before a reservation is confirmed: the date's dynamic price, the guest's
//! loyalty tier and the discounted total.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use tracing::instrument;

use crate::{
    loyalty::{LoyaltyProgram, LoyaltyStatus, compute_loyalty_tier},
    pricing::{Availability, PricingError, PricingPolicy, Quote, compute_availability, quote},
};

/// Everything needed to show the price of a booking.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingQuote<'a> {
    /// Availability and dynamic price of the date.
    pub availability: Availability<'a>,

    /// Loyalty standing of the guest, if signed in.
    pub loyalty: Option<LoyaltyStatus>,

    /// Price breakdown.
    pub quote: Quote<'a>,
}

/// Quote a booking of `guests` people on a date with `booked_slots` already taken.
///
/// Guests with a known spend get their tier's cashback taken off; anonymous guests pay the full
/// dynamic price.
///
/// # Errors
///
/// Returns [`PricingError::AmountOutOfRange`] if an amount overflows.
#[instrument(skip(policy, program))]
pub fn booking_quote<'a>(
    policy: &PricingPolicy<'a>,
    program: &LoyaltyProgram,
    booked_slots: u32,
    guests: u32,
    total_spent: Option<Decimal>,
) -> Result<BookingQuote<'a>, PricingError> {
    let availability = compute_availability(policy, booked_slots)?;
    let loyalty = total_spent.map(|spent| compute_loyalty_tier(program, spent));

    let cashback_rate = loyalty
        .as_ref()
        .map_or_else(|| Percentage::from(0.0), |status| status.cashback_rate);

    let quote = quote(&availability.dynamic_price, guests, cashback_rate)?;

    Ok(BookingQuote {
        availability,
        loyalty,
        quote,
    })
}
