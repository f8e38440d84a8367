//! Report
//!
//! Terminal tables for calendars, loyalty standings, booking quotes and guide topics.

use std::{io, ops::Range};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    availability::AvailabilityRecord,
    booking::BookingQuote,
    guide::Guide,
    loyalty::LoyaltyStatus,
    money::percent_to_decimal,
    pricing::{Availability, StayQuote},
};

/// Errors that can occur while writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the output failed.
    #[error("Failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Render a percentage as `7%`.
pub fn percent_label(percent: Percentage) -> String {
    fraction_label(percent_to_decimal(percent))
}

/// Render a fraction as a percentage, `0.125` as `12.5%`.
pub fn fraction_label(fraction: Decimal) -> String {
    let points = fraction
        .saturating_mul(Decimal::ONE_HUNDRED)
        .round_dp(2)
        .normalize();

    format!("{points}%")
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "sim" } else { "não" }
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric: Option<Columns<Range<usize>>>,
) -> Result<(), ReportError> {
    let mut table = builder.build();
    table.with(Style::modern_rounded());

    if let Some(columns) = numeric {
        table.modify(columns, Alignment::right());
    }

    writeln!(out, "{table}")?;

    Ok(())
}

/// Write a per-date availability table.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the output cannot be written.
pub fn write_calendar(
    mut out: impl io::Write,
    records: &[AvailabilityRecord<'_>],
) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record([
        "Data",
        "Ocupado",
        "Preço base",
        "Preço dinâmico",
        "Disponível",
        "Quase cheio",
        "Alta procura",
    ]);

    for record in records {
        let status = record.status();

        builder.push_record([
            record.date.to_string(),
            format!("{}/{}", record.booked_slots, record.total_slots),
            record.base_price.to_string(),
            record.dynamic_price.to_string(),
            yes_no(status.available).to_string(),
            yes_no(status.almost_full).to_string(),
            yes_no(status.high_demand).to_string(),
        ]);
    }

    write_table(&mut out, builder, Some(Columns::new(1..4)))
}

/// Write the availability and dynamic price of a single date.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the output cannot be written.
pub fn write_availability(
    mut out: impl io::Write,
    availability: &Availability<'_>,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record([
        "Ocupação".to_string(),
        format!(
            "{}/{} ({})",
            availability.booked_slots,
            availability.total_slots.get(),
            fraction_label(availability.occupancy_rate)
        ),
    ]);
    builder.push_record([
        "Disponível".to_string(),
        yes_no(availability.available).to_string(),
    ]);
    builder.push_record(["Preço base".to_string(), availability.base_price.to_string()]);
    builder.push_record([
        "Preço dinâmico".to_string(),
        availability.dynamic_price.to_string(),
    ]);

    write_table(&mut out, builder, Some(Columns::new(1..2)))
}

/// Write a loyalty standing.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the output cannot be written.
pub fn write_loyalty(mut out: impl io::Write, status: &LoyaltyStatus) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record(["Nível", status.tier.label()]);
    builder.push_record(["Total gasto".to_string(), status.total_spent.to_string()]);
    builder.push_record(["Pontos".to_string(), status.points.to_string()]);
    builder.push_record(["Cashback".to_string(), percent_label(status.cashback_rate)]);

    if let Some(next_tier) = status.next_tier {
        builder.push_record([
            format!("Pontos para {}", next_tier.label()),
            status.next_tier_points.to_string(),
        ]);
    }

    builder.push_record([
        "Progresso".to_string(),
        fraction_label(status.progress()),
    ]);
    builder.push_record(["Benefícios".to_string(), status.benefits.join("\n")]);

    write_table(&mut out, builder, None)
}

/// Write a booking quote.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the output cannot be written.
pub fn write_quote(mut out: impl io::Write, booking: &BookingQuote<'_>) -> Result<(), ReportError> {
    let availability = &booking.availability;
    let quote = &booking.quote;
    let mut builder = Builder::default();

    builder.push_record([
        "Ocupação".to_string(),
        format!(
            "{}/{}",
            availability.booked_slots,
            availability.total_slots.get()
        ),
    ]);
    builder.push_record([
        "Disponível".to_string(),
        yes_no(availability.available).to_string(),
    ]);
    builder.push_record([
        "Preço por pessoa".to_string(),
        quote.unit_price.to_string(),
    ]);

    if availability.is_surge_priced() {
        builder.push_record([
            "Preço base".to_string(),
            availability.base_price.to_string(),
        ]);
    }

    builder.push_record([format!("Hóspedes ({})", quote.guests), quote.subtotal.to_string()]);

    if let Some(loyalty) = &booking.loyalty {
        builder.push_record([
            format!(
                "Desconto {} ({})",
                loyalty.tier.label(),
                percent_label(quote.cashback_rate)
            ),
            format!("-{}", quote.discount),
        ]);
    }

    builder.push_record(["Total".to_string(), quote.total.to_string()]);

    write_table(&mut out, builder, Some(Columns::new(1..2)))
}

/// Write the cost breakdown of a stay.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the output cannot be written.
pub fn write_stay(mut out: impl io::Write, stay: &StayQuote<'_>) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record([
        "Estadia".to_string(),
        format!("{} a {}", stay.check_in, stay.check_out),
    ]);
    builder.push_record([
        format!("Noites ({})", stay.nights),
        stay.nightly_rate.to_string(),
    ]);
    builder.push_record(["Subtotal".to_string(), stay.subtotal.to_string()]);
    builder.push_record(["Impostos".to_string(), stay.taxes.to_string()]);
    builder.push_record(["Taxas".to_string(), stay.fees.to_string()]);
    builder.push_record(["Total".to_string(), stay.total.to_string()]);

    write_table(&mut out, builder, Some(Columns::new(1..2)))
}

/// Write the guide's quick topics and keyword groups.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the output cannot be written.
pub fn write_topics(mut out: impl io::Write, guide: &Guide) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record(["Tópico", "Palavras-chave"]);

    for group in guide.responder.groups() {
        builder.push_record([group.topic().to_string(), group.keywords().join(", ")]);
    }

    write_table(&mut out, builder, None)?;

    let mut builder = Builder::default();

    builder.push_record(["Atalho", "Pergunta"]);

    for topic in &guide.quick_topics {
        builder.push_record([topic.label.as_str(), topic.prompt.as_str()]);
    }

    write_table(&mut out, builder, None)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;
    use crate::{
        availability::calendar,
        booking::booking_quote,
        guide::angola,
        loyalty::{LoyaltyProgram, compute_loyalty_tier},
        pricing::{PricingPolicy, compute_availability, stay_quote},
    };

    #[test]
    fn percent_label_drops_trailing_zeros() -> TestResult {
        assert_eq!(percent_label(Percentage::try_from("0.07")?), "7%");
        assert_eq!(percent_label(Percentage::try_from("0.125")?), "12.5%");

        Ok(())
    }

    #[test]
    fn availability_table_shows_occupancy() -> TestResult {
        let availability = compute_availability(&PricingPolicy::default(), 25)?;

        let mut out = Vec::new();
        write_availability(&mut out, &availability)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("25/50 (50%)"));

        Ok(())
    }

    #[test]
    fn calendar_table_has_a_row_per_date() -> TestResult {
        let dates = [date(2026, 7, 1), date(2026, 7, 2)];
        let records = calendar(&PricingPolicy::default(), "lagosta", &[], &dates)?;

        let mut out = Vec::new();
        write_calendar(&mut out, &records)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("2026-07-01"));
        assert!(text.contains("2026-07-02"));
        assert!(text.contains("0/50"));

        Ok(())
    }

    #[test]
    fn loyalty_table_shows_next_tier() -> TestResult {
        let status = compute_loyalty_tier(&LoyaltyProgram::default(), Decimal::from(12_000));

        let mut out = Vec::new();
        write_loyalty(&mut out, &status)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("Prata"));
        assert!(text.contains("Pontos para Ouro"));
        assert!(text.contains("1300"));

        Ok(())
    }

    #[test]
    fn quote_table_lists_discount_line_for_members() -> TestResult {
        let booking = booking_quote(
            &PricingPolicy::default(),
            &LoyaltyProgram::default(),
            25,
            2,
            Some(Decimal::from(10_000)),
        )?;

        let mut out = Vec::new();
        write_quote(&mut out, &booking)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("Desconto Prata (7%)"));
        assert!(text.contains("Hóspedes (2)"));

        Ok(())
    }

    #[test]
    fn stay_table_lists_nights_and_taxes() -> TestResult {
        let policy = PricingPolicy::default();
        let stay = stay_quote(policy.base_price(), date(2026, 7, 1), date(2026, 7, 3))?;

        let mut out = Vec::new();
        write_stay(&mut out, &stay)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("Noites (2)"));
        assert!(text.contains("Impostos"));

        Ok(())
    }

    #[test]
    fn topics_table_lists_every_group() -> TestResult {
        let mut out = Vec::new();
        write_topics(&mut out, &angola::guide())?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("gastronomia"));
        assert!(text.contains("Dicas de Viagem"));

        Ok(())
    }
}
