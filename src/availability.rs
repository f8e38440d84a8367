//! Availability
//!
//! Per-date availability calendar for a business: how many slots are booked on each date of a
//! range, whether any are left, and what a slot costs given the demand.

use jiff::civil::Date;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::instrument;

use crate::{
    money::to_major,
    pricing::{PricingError, PricingPolicy, compute_availability},
    reservations::{Reservation, booked_slots_by_date},
};

/// Occupancy above which a date is shown as almost full.
pub const ALMOST_FULL_OCCUPANCY: Decimal = Decimal::from_parts(8, 0, 0, false, 1);

/// Price multiple above which a date is shown as high demand.
pub const HIGH_DEMAND_MULTIPLE: Decimal = Decimal::from_parts(13, 0, 0, false, 1);

/// Errors raised while building a calendar.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// The range ends before it starts.
    #[error("date range ends ({end}) before it starts ({start})")]
    InvertedRange {
        /// First date requested.
        start: Date,
        /// Last date requested.
        end: Date,
    },

    /// Date arithmetic went past the supported range.
    #[error(transparent)]
    Date(#[from] jiff::Error),

    /// Pricing a date failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Availability of one business on one date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvailabilityRecord<'a> {
    /// The date.
    pub date: Date,

    /// Slot capacity.
    pub total_slots: u32,

    /// Guests across pending and confirmed reservations.
    pub booked_slots: u32,

    /// Whether at least one slot is free.
    pub available: bool,

    /// Reference price.
    pub base_price: Money<'a, Currency>,

    /// Occupancy-adjusted price.
    pub dynamic_price: Money<'a, Currency>,

    /// Guests waiting for a slot. No waiting list is kept, so this is always 0.
    pub waiting_list: u32,
}

/// Badges shown on a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStatus {
    /// At least one slot is free.
    pub available: bool,

    /// More than 80% of slots are taken.
    pub almost_full: bool,

    /// The dynamic price is more than 30% above the base price.
    pub high_demand: bool,
}

impl AvailabilityRecord<'_> {
    /// Booked share of capacity.
    pub fn occupancy_rate(&self) -> Decimal {
        Decimal::from(self.booked_slots)
            .checked_div(Decimal::from(self.total_slots))
            .unwrap_or_default()
    }

    /// Calendar badges for this date.
    pub fn status(&self) -> DayStatus {
        let high_demand_price = to_major(&self.base_price).saturating_mul(HIGH_DEMAND_MULTIPLE);

        DayStatus {
            available: self.available,
            almost_full: self.occupancy_rate() > ALMOST_FULL_OCCUPANCY,
            high_demand: to_major(&self.dynamic_price) > high_demand_price,
        }
    }
}

/// Every date from `start` to `end`, inclusive.
///
/// # Errors
///
/// - [`CalendarError::InvertedRange`]: `end` is before `start`.
/// - [`CalendarError::Date`]: the range runs past the last supported date.
pub fn date_range(start: Date, end: Date) -> Result<Vec<Date>, CalendarError> {
    if end < start {
        return Err(CalendarError::InvertedRange { start, end });
    }

    let mut dates = vec![start];
    let mut current = start;

    while current < end {
        current = current.tomorrow()?;
        dates.push(current);
    }

    Ok(dates)
}

/// Build the availability calendar of a business for the given dates.
///
/// Only pending and confirmed reservations of `business_id` take slots. Each date is priced
/// independently from its own occupancy.
///
/// # Errors
///
/// Returns [`CalendarError::Pricing`] if a dynamic price cannot be represented.
#[instrument(skip(policy, reservations, dates), fields(dates = dates.len()))]
pub fn calendar<'a>(
    policy: &PricingPolicy<'a>,
    business_id: &str,
    reservations: &[Reservation<'_>],
    dates: &[Date],
) -> Result<Vec<AvailabilityRecord<'a>>, CalendarError> {
    let (Some(&start), Some(&end)) = (dates.iter().min(), dates.iter().max()) else {
        return Ok(Vec::new());
    };

    let booked = booked_slots_by_date(business_id, reservations, start, end);

    dates
        .iter()
        .map(|&date| -> Result<AvailabilityRecord<'a>, CalendarError> {
            let booked_slots = booked.get(&date).copied().unwrap_or_default();
            let availability = compute_availability(policy, booked_slots)?;

            Ok(AvailabilityRecord {
                date,
                total_slots: availability.total_slots.get(),
                booked_slots,
                available: availability.available,
                base_price: availability.base_price,
                dynamic_price: availability.dynamic_price,
                waiting_list: 0,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::iso::AOA;
    use testresult::TestResult;

    use super::*;
    use crate::reservations::ReservationStatus;

    fn booking(day: i8, guests: u32, status: ReservationStatus) -> Reservation<'static> {
        Reservation {
            business_id: "lagosta".to_string(),
            user_id: "ana".to_string(),
            date: date(2026, 7, day),
            guests,
            total_amount: Money::from_minor(100_000, AOA),
            status,
        }
    }

    #[test]
    fn date_range_is_inclusive() -> TestResult {
        let dates = date_range(date(2026, 6, 29), date(2026, 7, 2))?;

        assert_eq!(
            dates,
            [
                date(2026, 6, 29),
                date(2026, 6, 30),
                date(2026, 7, 1),
                date(2026, 7, 2)
            ]
        );

        Ok(())
    }

    #[test]
    fn date_range_of_one_day() -> TestResult {
        assert_eq!(
            date_range(date(2026, 7, 1), date(2026, 7, 1))?,
            [date(2026, 7, 1)]
        );

        Ok(())
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        assert!(matches!(
            date_range(date(2026, 7, 2), date(2026, 7, 1)),
            Err(CalendarError::InvertedRange { .. })
        ));
    }

    #[test]
    fn calendar_prices_each_date_from_its_own_bookings() -> TestResult {
        let reservations = [
            booking(1, 20, ReservationStatus::Confirmed),
            booking(1, 5, ReservationStatus::Pending),
            booking(1, 10, ReservationStatus::Cancelled),
            booking(2, 50, ReservationStatus::Confirmed),
        ];

        let dates = date_range(date(2026, 7, 1), date(2026, 7, 3))?;
        let records = calendar(&PricingPolicy::default(), "lagosta", &reservations, &dates)?;

        let summary: Vec<(u32, bool, i64)> = records
            .iter()
            .map(|record| {
                (
                    record.booked_slots,
                    record.available,
                    record.dynamic_price.to_minor_units(),
                )
            })
            .collect();

        assert_eq!(
            summary,
            [(25, true, 62_500), (50, false, 75_000), (0, true, 50_000)]
        );
        assert!(records.iter().all(|record| record.waiting_list == 0));
        assert!(records.iter().all(|record| record.total_slots == 50));

        Ok(())
    }

    #[test]
    fn calendar_of_no_dates_is_empty() -> TestResult {
        let records = calendar(&PricingPolicy::default(), "lagosta", &[], &[])?;

        assert!(records.is_empty());

        Ok(())
    }

    #[test]
    fn day_status_flags_busy_dates() -> TestResult {
        let reservations = [
            booking(1, 41, ReservationStatus::Confirmed),
            booking(2, 40, ReservationStatus::Confirmed),
        ];

        let dates = date_range(date(2026, 7, 1), date(2026, 7, 3))?;
        let records = calendar(&PricingPolicy::default(), "lagosta", &reservations, &dates)?;
        let statuses: Vec<DayStatus> = records.iter().map(AvailabilityRecord::status).collect();

        // 41/50 -> 82%, price 705 (> 650); 40/50 -> 80%, price 700 (> 650)
        assert_eq!(
            statuses,
            [
                DayStatus {
                    available: true,
                    almost_full: true,
                    high_demand: true
                },
                DayStatus {
                    available: true,
                    almost_full: false,
                    high_demand: true
                },
                DayStatus {
                    available: true,
                    almost_full: false,
                    high_demand: false
                },
            ]
        );

        Ok(())
    }
}
