//! Voyage prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    availability::{AvailabilityRecord, CalendarError, DayStatus, calendar, date_range},
    booking::{BookingQuote, booking_quote},
    config::{Config, ConfigError},
    guide::{
        ChatExchange, Conversation, Guide, KeywordGroup, QuickTopic, Responder, angola,
    },
    loyalty::{
        LoyaltyError, LoyaltyProfile, LoyaltyProgram, LoyaltyStatus, LoyaltyTier, TierRule,
        compute_loyalty_tier,
    },
    money::{ParseError, parse_percentage, parse_price},
    pricing::{
        Availability, OverbookingPolicy, PricingError, PricingPolicy, Quote, StayQuote,
        compute_availability, final_price, quote, stay_quote,
    },
    reservations::{Reservation, ReservationStatus, load_reservations, parse_reservations},
};
