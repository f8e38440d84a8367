//! Configuration
//!
//! Capacity, prices, loyalty tiers and the guide's keyword table, read from YAML. Every section
//! and almost every field is optional; anything left out keeps the built-in Angola defaults.
//!
//! ```yaml
//! pricing:
//!   total_slots: 50
//!   base_price: "500 AOA"
//!   markup: "50%"
//!   overbooking: cap
//! loyalty:
//!   spend_per_point: 10
//!   tiers:
//!     - { tier: bronze, threshold: 0, cashback: "5%" }
//!     - { tier: silver, threshold: 10000, cashback: "7%" }
//!     - { tier: gold, threshold: 25000, cashback: "10%" }
//!     - { tier: diamond, threshold: 50000, cashback: "15%" }
//! guide:
//!   fallback: "Não sei."
//!   topics:
//!     - topic: gastronomia
//!       keywords: [comida, prato]
//!       answer: "Experimente o funge!"
//! ```

use std::{fs, num::NonZeroU32, path::Path};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::{
    guide::{Guide, KeywordGroup, QuickTopic, Responder, angola},
    loyalty::{LoyaltyError, LoyaltyProgram, LoyaltyTier, TierRule},
    money::{ParseError, parse_percentage, parse_price},
    pricing::{OverbookingPolicy, PricingPolicy},
};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file.
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A price or percentage could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// `total_slots` was zero.
    #[error("total_slots must be at least 1")]
    ZeroCapacity,

    /// Loyalty tiers are inconsistent.
    #[error("Invalid loyalty tiers: {0}")]
    Loyalty(#[from] LoyaltyError),

    /// A keyword group has no usable keyword.
    #[error("Topic {0} has no keywords")]
    EmptyKeywords(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    pricing: Option<PricingSection>,

    #[serde(default)]
    loyalty: Option<LoyaltySection>,

    #[serde(default)]
    guide: Option<GuideSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PricingSection {
    total_slots: Option<u32>,
    base_price: Option<String>,
    markup: Option<String>,
    #[serde(default)]
    overbooking: OverbookingPolicy,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoyaltySection {
    spend_per_point: Option<Decimal>,
    tiers: Option<Vec<TierSection>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TierSection {
    tier: LoyaltyTier,
    threshold: Decimal,
    cashback: String,
    #[serde(default)]
    benefits: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GuideSection {
    greeting: Option<String>,
    fallback: Option<String>,
    topics: Option<Vec<TopicSection>>,
    quick_topics: Option<Vec<QuickTopic>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TopicSection {
    topic: String,
    keywords: Vec<String>,
    answer: String,
}

/// Validated configuration, passed explicitly to whatever needs prices, tiers or the guide.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Capacity and pricing.
    pub pricing: PricingPolicy<'static>,

    /// Loyalty programme.
    pub loyalty: LoyaltyProgram,

    /// Tour guide.
    pub guide: Guide,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pricing: PricingPolicy::default(),
            loyalty: LoyaltyProgram::default(),
            guide: angola::guide(),
        }
    }
}

impl Config {
    /// Parse and validate configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a price or percentage is invalid, capacity is
    /// zero, the loyalty tiers are inconsistent, or a topic has no keywords.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_norway::from_str(yaml)?;

        file.try_into()
    }

    /// Read configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid configuration.
    #[instrument]
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_yaml(&contents)?;

        info!(
            total_slots = config.pricing.total_slots().get(),
            topics = config.guide.responder.groups().len(),
            "loaded configuration"
        );

        Ok(config)
    }

    /// Read configuration from `path` if one is given, otherwise use the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid configuration.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_path(path),
            None => {
                debug!("no configuration file given, using defaults");
                Ok(Self::default())
            }
        }
    }
}

impl TryFrom<ConfigFile> for Config {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        Ok(Self {
            pricing: file
                .pricing
                .map_or_else(|| Ok(PricingPolicy::default()), pricing_policy)?,
            loyalty: file
                .loyalty
                .map_or_else(|| Ok(LoyaltyProgram::default()), loyalty_program)?,
            guide: file.guide.map_or_else(|| Ok(angola::guide()), guide)?,
        })
    }
}

fn pricing_policy(section: PricingSection) -> Result<PricingPolicy<'static>, ConfigError> {
    let defaults = PricingPolicy::default();

    let total_slots = match section.total_slots {
        Some(slots) => NonZeroU32::new(slots).ok_or(ConfigError::ZeroCapacity)?,
        None => defaults.total_slots(),
    };

    let base_price = match section.base_price {
        Some(price) => parse_price(&price)?,
        None => *defaults.base_price(),
    };

    let markup = match section.markup {
        Some(markup) => parse_percentage(&markup)?,
        None => defaults.markup(),
    };

    Ok(PricingPolicy::new(total_slots, base_price)
        .with_markup(markup)
        .with_overbooking(section.overbooking))
}

fn loyalty_program(section: LoyaltySection) -> Result<LoyaltyProgram, ConfigError> {
    let defaults = LoyaltyProgram::default();
    let spend_per_point = section
        .spend_per_point
        .unwrap_or_else(|| defaults.spend_per_point());

    let rules = match section.tiers {
        Some(tiers) => tiers
            .into_iter()
            .map(|tier| -> Result<TierRule, ConfigError> {
                Ok(TierRule::new(
                    tier.tier,
                    tier.threshold,
                    parse_percentage(&tier.cashback)?,
                    tier.benefits,
                ))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?,
        None => defaults.rules().to_vec(),
    };

    Ok(LoyaltyProgram::new(spend_per_point, rules)?)
}

fn guide(section: GuideSection) -> Result<Guide, ConfigError> {
    let responder = match section.topics {
        Some(topics) => {
            let groups = topics
                .into_iter()
                .map(|topic| {
                    let group = KeywordGroup::new(topic.topic, topic.keywords, topic.answer);

                    if group.keywords().is_empty() {
                        return Err(ConfigError::EmptyKeywords(group.topic().to_string()));
                    }

                    Ok(group)
                })
                .collect::<Result<Vec<_>, ConfigError>>()?;

            Responder::new(
                groups,
                section
                    .fallback
                    .unwrap_or_else(|| angola::FALLBACK.to_string()),
            )
        }
        None => match section.fallback {
            Some(fallback) => Responder::new(angola::keyword_groups(), fallback),
            None => angola::responder(),
        },
    };

    Ok(Guide {
        greeting: section
            .greeting
            .unwrap_or_else(|| angola::GREETING.to_string()),
        responder,
        quick_topics: section.quick_topics.unwrap_or_else(angola::quick_topics),
    })
}
