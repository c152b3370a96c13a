use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Liquidity bucket used by the pair selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairCategory {
    Major,
    Minor,
    Exotic,
}

impl fmt::Display for PairCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairCategory::Major => write!(f, "major"),
            PairCategory::Minor => write!(f, "minor"),
            PairCategory::Exotic => write!(f, "exotic"),
        }
    }
}

/// Selector tab: every pair or a single category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairFilter {
    #[default]
    All,
    Category(PairCategory),
}

impl PairFilter {
    pub fn matches(&self, pair: &CurrencyPair) -> bool {
        match self {
            PairFilter::All => true,
            PairFilter::Category(category) => pair.category == *category,
        }
    }
}

impl FromStr for PairFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(PairFilter::All),
            "major" => Ok(PairFilter::Category(PairCategory::Major)),
            "minor" => Ok(PairFilter::Category(PairCategory::Minor)),
            "exotic" => Ok(PairFilter::Category(PairCategory::Exotic)),
            _ => anyhow::bail!(
                "Invalid pair filter: {}. Must be 'all', 'major', 'minor' or 'exotic'",
                s
            ),
        }
    }
}

/// Static reference data for a tradable currency pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyPair {
    pub symbol: String,
    pub base: String,
    pub quote: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub pip: Decimal,
    pub spread: f64,
    #[serde(rename = "type")]
    pub category: PairCategory,
}

impl CurrencyPair {
    pub fn new(
        base: &str,
        quote: &str,
        pip: Decimal,
        spread: f64,
        category: PairCategory,
    ) -> Self {
        Self {
            symbol: format!("{}{}", base, quote),
            base: base.to_string(),
            quote: quote.to_string(),
            pip,
            spread,
            category,
        }
    }

    /// Converts a price distance into pips for this pair
    pub fn to_pips(&self, distance: Decimal) -> Decimal {
        if self.pip.is_zero() {
            return Decimal::ZERO;
        }
        distance.abs() / self.pip
    }
}
