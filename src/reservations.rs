//! Reservations
//!
//! The raw rows the pricing and loyalty calculations aggregate over, and a YAML loader for them.

use std::{fs, path::Path};

use jiff::civil::Date;
use rustc_hash::FxHashMap;
use rusty_money::{Money, MoneyError, iso::Currency};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use crate::money::{ParseError, parse_price};

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Awaiting payment or confirmation.
    Pending,

    /// Paid and confirmed.
    Confirmed,

    /// Cancelled by the guest or the business.
    Cancelled,
}

impl ReservationStatus {
    /// Whether the reservation takes up slots on its date.
    pub fn occupies_slots(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Whether the reservation's amount counts towards loyalty spend.
    pub fn counts_towards_spend(self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

/// A booking at a business on a given date.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation<'a> {
    /// Business the reservation is for.
    pub business_id: String,

    /// User who made the reservation.
    pub user_id: String,

    /// Date of the visit or stay.
    pub date: Date,

    /// Number of guests, each taking one slot.
    pub guests: u32,

    /// Amount paid.
    pub total_amount: Money<'a, Currency>,

    /// Current status.
    pub status: ReservationStatus,
}

/// Sum guests per date for a business over `start..=end`, skipping cancelled reservations.
pub fn booked_slots_by_date(
    business_id: &str,
    reservations: &[Reservation<'_>],
    start: Date,
    end: Date,
) -> FxHashMap<Date, u32> {
    let mut booked: FxHashMap<Date, u32> = FxHashMap::default();

    for reservation in reservations.iter().filter(|reservation| {
        reservation.business_id == business_id
            && reservation.status.occupies_slots()
            && (start..=end).contains(&reservation.date)
    }) {
        let slots = booked.entry(reservation.date).or_default();
        *slots = slots.saturating_add(reservation.guests);
    }

    booked
}

/// Sum `total_amount` over a user's confirmed reservations.
///
/// # Errors
///
/// Returns a [`MoneyError`] if a reservation's currency differs from `currency`.
pub fn total_spent<'a>(
    user_id: &str,
    reservations: &[Reservation<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, MoneyError> {
    reservations
        .iter()
        .filter(|reservation| {
            reservation.user_id == user_id && reservation.status.counts_towards_spend()
        })
        .try_fold(Money::from_minor(0, currency), |acc, reservation| {
            acc.add(reservation.total_amount)
        })
}

/// Errors raised while loading a reservations file.
#[derive(Debug, Error)]
pub enum ReservationsFileError {
    /// IO error reading the file.
    #[error("Failed to read reservations file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A reservation amount could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Reservations file layout.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReservationsFile {
    reservations: Vec<ReservationRow>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReservationRow {
    business: String,
    user: String,
    date: Date,
    guests: u32,
    total: String,
    status: ReservationStatus,
}

impl TryFrom<ReservationRow> for Reservation<'static> {
    type Error = ParseError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        Ok(Reservation {
            business_id: row.business,
            user_id: row.user,
            date: row.date,
            guests: row.guests,
            total_amount: parse_price(&row.total)?,
            status: row.status,
        })
    }
}

/// Parse reservations from YAML text.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or an amount is not a valid price.
pub fn parse_reservations(yaml: &str) -> Result<Vec<Reservation<'static>>, ReservationsFileError> {
    let file: ReservationsFile = serde_norway::from_str(yaml)?;

    Ok(file
        .reservations
        .into_iter()
        .map(Reservation::try_from)
        .collect::<Result<Vec<_>, ParseError>>()?)
}

/// Load reservations from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or holds an invalid price.
#[instrument]
pub fn load_reservations(path: &Path) -> Result<Vec<Reservation<'static>>, ReservationsFileError> {
    let contents = fs::read_to_string(path)?;

    parse_reservations(&contents)
}
