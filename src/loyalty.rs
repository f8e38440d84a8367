//! Loyalty
//!
//! Spend-based loyalty tiers. A guest's tier, points and cashback rate are a pure function of
//! how much they have spent on confirmed reservations; nothing is persisted.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use crate::{
    money::{percent_to_decimal, to_major},
    reservations::{Reservation, total_spent},
};

/// Loyalty tiers, in ascending order of spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoyaltyTier {
    /// Entry tier.
    Bronze,

    /// Second tier.
    Silver,

    /// Third tier.
    Gold,

    /// Top tier.
    Diamond,
}

impl LoyaltyTier {
    /// Every tier, lowest first.
    pub const ALL: [Self; 4] = [Self::Bronze, Self::Silver, Self::Gold, Self::Diamond];

    /// Name shown to guests.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Prata",
            Self::Gold => "Ouro",
            Self::Diamond => "Diamante",
        }
    }

    /// The tier above this one, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Bronze => Some(Self::Silver),
            Self::Silver => Some(Self::Gold),
            Self::Gold => Some(Self::Diamond),
            Self::Diamond => None,
        }
    }
}

impl fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Diamond => "Diamond",
        };

        f.write_str(name)
    }
}

/// Errors raised when a set of tier rules is inconsistent.
#[derive(Debug, Error, PartialEq)]
pub enum LoyaltyError {
    /// There must be exactly one rule per tier.
    #[error("expected 4 tier rules, got {0}")]
    TierCount(usize),

    /// Rules must list every tier exactly once, lowest first.
    #[error("expected a rule for {expected} at position {position}")]
    TierOrder {
        /// Position in the rule list.
        position: usize,
        /// Tier expected at that position.
        expected: LoyaltyTier,
    },

    /// The entry tier must start at zero spend.
    #[error("the {0} tier must start at zero spend")]
    EntryThreshold(LoyaltyTier),

    /// Thresholds must strictly increase from tier to tier.
    #[error("threshold for {0} must be above the previous tier")]
    ThresholdOrder(LoyaltyTier),

    /// Cashback must be a share between 0% and 100%.
    #[error("cashback for {0} must be between 0% and 100%")]
    CashbackRange(LoyaltyTier),

    /// Cashback must not decrease from tier to tier.
    #[error("cashback for {0} must not be below the previous tier")]
    CashbackOrder(LoyaltyTier),

    /// Spend per point must be positive.
    #[error("spend per point must be positive, got {0}")]
    SpendPerPoint(Decimal),
}

/// Threshold, cashback and perks for one tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TierRule {
    /// Tier this rule describes.
    pub tier: LoyaltyTier,

    /// Minimum spend, in major units, inclusive.
    pub threshold: Decimal,

    /// Share of a booking's pre-discount total given back.
    pub cashback: Percentage,

    /// Perks listed on the loyalty dashboard.
    pub benefits: Vec<String>,
}

impl TierRule {
    /// Create a tier rule.
    pub fn new(
        tier: LoyaltyTier,
        threshold: Decimal,
        cashback: Percentage,
        benefits: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            tier,
            threshold,
            cashback,
            benefits: benefits.into_iter().map(Into::into).collect(),
        }
    }
}

/// A validated loyalty programme: one rule per tier, ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct LoyaltyProgram {
    spend_per_point: Decimal,
    rules: [TierRule; 4],
}

impl LoyaltyProgram {
    /// Create a programme from its rules.
    ///
    /// # Errors
    ///
    /// - [`LoyaltyError::SpendPerPoint`]: `spend_per_point` is zero or negative.
    /// - [`LoyaltyError::TierCount`]: there are not exactly four rules.
    /// - [`LoyaltyError::TierOrder`]: the rules do not list Bronze, Silver, Gold, Diamond in order.
    /// - [`LoyaltyError::EntryThreshold`]: the Bronze threshold is not zero.
    /// - [`LoyaltyError::CashbackRange`]: a cashback rate is below 0% or above 100%.
    /// - [`LoyaltyError::ThresholdOrder`]: a threshold is not above the previous one.
    /// - [`LoyaltyError::CashbackOrder`]: a cashback rate is below the previous one.
    pub fn new(spend_per_point: Decimal, rules: Vec<TierRule>) -> Result<Self, LoyaltyError> {
        if spend_per_point <= Decimal::ZERO {
            return Err(LoyaltyError::SpendPerPoint(spend_per_point));
        }

        let rules = <[TierRule; 4]>::try_from(rules)
            .map_err(|rules| LoyaltyError::TierCount(rules.len()))?;

        for (position, (rule, expected)) in rules.iter().zip(LoyaltyTier::ALL).enumerate() {
            if rule.tier != expected {
                return Err(LoyaltyError::TierOrder { position, expected });
            }
        }

        let [entry, ..] = &rules;

        if !entry.threshold.is_zero() {
            return Err(LoyaltyError::EntryThreshold(entry.tier));
        }

        for rule in &rules {
            let cashback = percent_to_decimal(rule.cashback);

            if cashback < Decimal::ZERO || cashback > Decimal::ONE {
                return Err(LoyaltyError::CashbackRange(rule.tier));
            }
        }

        for pair in rules.windows(2) {
            let [lower, upper] = pair else { continue };

            if upper.threshold <= lower.threshold {
                return Err(LoyaltyError::ThresholdOrder(upper.tier));
            }

            if percent_to_decimal(upper.cashback) < percent_to_decimal(lower.cashback) {
                return Err(LoyaltyError::CashbackOrder(upper.tier));
            }
        }

        Ok(Self {
            spend_per_point,
            rules,
        })
    }

    /// Spend, in major units, that earns one point.
    pub fn spend_per_point(&self) -> Decimal {
        self.spend_per_point
    }

    /// The rules, lowest tier first.
    pub fn rules(&self) -> &[TierRule] {
        &self.rules
    }

    /// Rule for the highest tier whose threshold `total_spent` reaches.
    pub fn rule_for(&self, total_spent: Decimal) -> &TierRule {
        let [entry, ..] = &self.rules;

        self.rules
            .iter()
            .rev()
            .find(|rule| total_spent >= rule.threshold)
            .unwrap_or(entry)
    }

    /// Rule for a specific tier.
    pub fn rule(&self, tier: LoyaltyTier) -> &TierRule {
        let [bronze, silver, gold, diamond] = &self.rules;

        match tier {
            LoyaltyTier::Bronze => bronze,
            LoyaltyTier::Silver => silver,
            LoyaltyTier::Gold => gold,
            LoyaltyTier::Diamond => diamond,
        }
    }

    fn points_for(&self, spend: Decimal) -> u64 {
        spend
            .checked_div(self.spend_per_point)
            .map(|points| points.floor())
            .and_then(|points| points.to_u64())
            .unwrap_or_default()
    }
}

impl Default for LoyaltyProgram {
    fn default() -> Self {
        Self {
            spend_per_point: Decimal::TEN,
            rules: [
                TierRule::new(
                    LoyaltyTier::Bronze,
                    Decimal::ZERO,
                    Percentage::from(0.05),
                    ["5% cashback", "Promoções exclusivas"],
                ),
                TierRule::new(
                    LoyaltyTier::Silver,
                    Decimal::from(10_000),
                    Percentage::from(0.07),
                    ["7% cashback", "Check-in prioritário", "Upgrade gratuito"],
                ),
                TierRule::new(
                    LoyaltyTier::Gold,
                    Decimal::from(25_000),
                    Percentage::from(0.10),
                    ["10% cashback", "Concierge pessoal", "Cancelamento flexível"],
                ),
                TierRule::new(
                    LoyaltyTier::Diamond,
                    Decimal::from(50_000),
                    Percentage::from(0.15),
                    ["15% cashback", "Acesso VIP", "Transfer gratuito"],
                ),
            ],
        }
    }
}

/// A guest's standing in the loyalty programme.
#[derive(Debug, Clone, PartialEq)]
pub struct LoyaltyStatus {
    /// Current tier.
    pub tier: LoyaltyTier,

    /// Cashback rate of the current tier.
    pub cashback_rate: Percentage,

    /// Points earned, `floor(total_spent / spend_per_point)`.
    pub points: u64,

    /// The tier above, if any.
    pub next_tier: Option<LoyaltyTier>,

    /// Points still needed to reach `next_tier`, 0 at the top tier.
    pub next_tier_points: u64,

    /// Spend the status was computed from, in major units.
    pub total_spent: Decimal,

    /// Perks of the current tier.
    pub benefits: Vec<String>,

    tier_floor: Decimal,
    next_threshold: Option<Decimal>,
}

impl LoyaltyStatus {
    /// How far the guest is from the current tier's threshold to the next one, in `[0, 1]`.
    pub fn progress(&self) -> Decimal {
        let Some(next_threshold) = self.next_threshold else {
            return Decimal::ONE;
        };

        (self.total_spent - self.tier_floor)
            .checked_div(next_threshold - self.tier_floor)
            .unwrap_or_default()
            .clamp(Decimal::ZERO, Decimal::ONE)
    }
}

/// Work out the tier, points and cashback for a total spend given in major units.
pub fn compute_loyalty_tier(program: &LoyaltyProgram, total_spent: Decimal) -> LoyaltyStatus {
    let rule = program.rule_for(total_spent);
    let next_rule = rule.tier.next().map(|tier| program.rule(tier));

    let next_tier_points = next_rule.map_or(0, |next| {
        program.points_for(next.threshold.saturating_sub(total_spent))
    });

    LoyaltyStatus {
        tier: rule.tier,
        cashback_rate: rule.cashback,
        points: program.points_for(total_spent),
        next_tier: next_rule.map(|next| next.tier),
        next_tier_points,
        total_spent,
        benefits: rule.benefits.clone(),
        tier_floor: rule.threshold,
        next_threshold: next_rule.map(|next| next.threshold),
    }
}

/// A user's loyalty standing derived from their reservation history.
#[derive(Debug, Clone, PartialEq)]
pub struct LoyaltyProfile<'a> {
    /// User the profile belongs to.
    pub user_id: String,

    /// Sum of `total_amount` over the user's confirmed reservations.
    pub total_spent: Money<'a, Currency>,

    /// Tier, points and cashback.
    pub status: LoyaltyStatus,
}

impl<'a> LoyaltyProfile<'a> {
    /// Build a profile from the user's confirmed reservations.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if a reservation is in a different currency.
    #[instrument(skip(program, reservations), fields(reservations = reservations.len()))]
    pub fn from_reservations(
        program: &LoyaltyProgram,
        user_id: &str,
        reservations: &[Reservation<'a>],
        currency: &'a Currency,
    ) -> Result<Self, MoneyError> {
        let total_spent = total_spent(user_id, reservations, currency)?;
        let status = compute_loyalty_tier(program, to_major(&total_spent));

        Ok(Self {
            user_id: user_id.to_string(),
            total_spent,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn rate(percent: Percentage) -> Decimal {
        percent_to_decimal(percent).round_dp(4)
    }

    fn status(spent: i64) -> LoyaltyStatus {
        compute_loyalty_tier(&LoyaltyProgram::default(), Decimal::from(spent))
    }

    #[test]
    fn zero_spend_is_bronze() {
        let status = status(0);

        assert_eq!(status.tier, LoyaltyTier::Bronze);
        assert_eq!(rate(status.cashback_rate), Decimal::new(5, 2));
        assert_eq!(status.points, 0);
        assert_eq!(status.next_tier, Some(LoyaltyTier::Silver));
        assert_eq!(status.next_tier_points, 1_000);
    }

    #[test]
    fn negative_spend_is_bronze_without_points() {
        let status = status(-5);

        assert_eq!(status.tier, LoyaltyTier::Bronze);
        assert_eq!(status.points, 0);
        assert_eq!(status.next_tier_points, 1_000);
        assert_eq!(status.progress(), Decimal::ZERO);
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(status(9_999).tier, LoyaltyTier::Bronze);
        assert_eq!(status(10_000).tier, LoyaltyTier::Silver);
        assert_eq!(status(24_999).tier, LoyaltyTier::Silver);
        assert_eq!(status(25_000).tier, LoyaltyTier::Gold);
        assert_eq!(status(49_999).tier, LoyaltyTier::Gold);
        assert_eq!(status(50_000).tier, LoyaltyTier::Diamond);
    }

    #[test]
    fn silver_cashback_is_seven_percent() {
        let status = status(10_000);

        assert_eq!(rate(status.cashback_rate), Decimal::new(7, 2));
        assert_eq!(status.points, 1_000);
        assert_eq!(status.next_tier_points, 1_500);
    }

    #[test]
    fn diamond_has_no_next_tier() {
        let status = status(50_000);

        assert_eq!(status.tier, LoyaltyTier::Diamond);
        assert_eq!(rate(status.cashback_rate), Decimal::new(15, 2));
        assert_eq!(status.next_tier, None);
        assert_eq!(status.next_tier_points, 0);
        assert_eq!(status.progress(), Decimal::ONE);
    }

    #[test]
    fn points_and_remaining_points_are_floored() {
        let status = compute_loyalty_tier(&LoyaltyProgram::default(), Decimal::new(12_345_67, 2));

        assert_eq!(status.points, 1_234);
        // (25000 - 12345.67) / 10 = 1265.433
        assert_eq!(status.next_tier_points, 1_265);
    }

    #[test]
    fn cashback_never_decreases_with_tier() {
        let program = LoyaltyProgram::default();
        let rates: Vec<Decimal> = program
            .rules()
            .iter()
            .map(|rule| rate(rule.cashback))
            .collect();

        assert!(rates.windows(2).all(|pair| matches!(pair, [a, b] if a <= b)));
    }

    #[test]
    fn progress_is_fraction_of_current_band() {
        // Silver band is 10000..25000
        assert_eq!(status(17_500).progress(), Decimal::new(5, 1));
        assert_eq!(status(0).progress(), Decimal::ZERO);
    }

    #[test]
    fn benefits_follow_tier() {
        assert_eq!(
            status(30_000).benefits,
            ["10% cashback", "Concierge pessoal", "Cancelamento flexível"]
        );
    }

    #[test]
    fn tier_labels_are_portuguese() {
        assert_eq!(LoyaltyTier::Silver.label(), "Prata");
        assert_eq!(LoyaltyTier::Silver.to_string(), "Silver");
    }

    #[test]
    fn default_program_passes_validation() -> TestResult {
        let program = LoyaltyProgram::default();
        let validated = LoyaltyProgram::new(program.spend_per_point(), program.rules().to_vec())?;

        assert_eq!(validated, program);

        Ok(())
    }

    #[test]
    fn missing_tier_is_rejected() {
        let mut rules = LoyaltyProgram::default().rules().to_vec();
        rules.truncate(3);

        assert_eq!(
            LoyaltyProgram::new(Decimal::TEN, rules),
            Err(LoyaltyError::TierCount(3))
        );
        assert_eq!(
            LoyaltyError::TierCount(3).to_string(),
            "expected 4 tier rules, got 3"
        );
    }

    #[test]
    fn cashback_above_full_price_is_rejected() {
        let mut rules = LoyaltyProgram::default().rules().to_vec();

        if let Some(diamond) = rules.last_mut() {
            diamond.cashback = Percentage::from(1.5);
        }

        assert_eq!(
            LoyaltyProgram::new(Decimal::TEN, rules),
            Err(LoyaltyError::CashbackRange(LoyaltyTier::Diamond))
        );
    }

    #[test]
    fn shuffled_tiers_are_rejected() {
        let mut rules = LoyaltyProgram::default().rules().to_vec();
        rules.swap(1, 2);

        assert_eq!(
            LoyaltyProgram::new(Decimal::TEN, rules),
            Err(LoyaltyError::TierOrder {
                position: 1,
                expected: LoyaltyTier::Silver
            })
        );
    }

    #[test]
    fn non_ascending_threshold_is_rejected() {
        let mut rules = LoyaltyProgram::default().rules().to_vec();

        if let Some(gold) = rules.get_mut(2) {
            gold.threshold = Decimal::from(5_000);
        }

        assert_eq!(
            LoyaltyProgram::new(Decimal::TEN, rules),
            Err(LoyaltyError::ThresholdOrder(LoyaltyTier::Gold))
        );
    }

    #[test]
    fn decreasing_cashback_is_rejected() {
        let mut rules = LoyaltyProgram::default().rules().to_vec();

        if let Some(diamond) = rules.get_mut(3) {
            diamond.cashback = Percentage::from(0.01);
        }

        assert_eq!(
            LoyaltyProgram::new(Decimal::TEN, rules),
            Err(LoyaltyError::CashbackOrder(LoyaltyTier::Diamond))
        );
    }

    #[test]
    fn entry_threshold_must_be_zero() {
        let mut rules = LoyaltyProgram::default().rules().to_vec();

        if let Some(bronze) = rules.get_mut(0) {
            bronze.threshold = Decimal::ONE;
        }

        assert_eq!(
            LoyaltyProgram::new(Decimal::TEN, rules),
            Err(LoyaltyError::EntryThreshold(LoyaltyTier::Bronze))
        );
    }

    #[test]
    fn spend_per_point_must_be_positive() {
        let rules = LoyaltyProgram::default().rules().to_vec();

        assert_eq!(
            LoyaltyProgram::new(Decimal::ZERO, rules),
            Err(LoyaltyError::SpendPerPoint(Decimal::ZERO))
        );
    }
}
