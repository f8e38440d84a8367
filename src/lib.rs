//! Voyage
//!
//! Pricing, loyalty and tour-guide core of the VOYAGEANGOLA booking platform: occupancy-based
//! dynamic prices, spend-based loyalty tiers with cashback, and a keyword-matching chat guide.
//! Everything here is a pure function of its inputs; fetching reservations and rendering pages
//! is left to the caller.

pub mod availability;
pub mod booking;
pub mod config;
pub mod guide;
pub mod loyalty;
pub mod money;
pub mod prelude;
pub mod pricing;
pub mod report;
pub mod reservations;
