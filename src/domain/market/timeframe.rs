use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::BackendError;

/// Chart timeframes offered by the analysis view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "4H")]
    FourHour,
    #[serde(rename = "1H")]
    OneHour,
    #[serde(rename = "15M")]
    FifteenMin,
}

impl Timeframe {
    /// Number of steps back from "now" the synthetic series covers.
    /// The generated series holds `history_points() + 1` candles.
    pub fn history_points(&self) -> usize {
        match self {
            Timeframe::OneDay => 30,
            Timeframe::FourHour => 10,
            Timeframe::OneHour => 5,
            Timeframe::FifteenMin => 2,
        }
    }

    /// Returns the duration of this timeframe in minutes
    pub fn to_minutes(&self) -> usize {
        match self {
            Timeframe::FifteenMin => 15,
            Timeframe::OneHour => 60,
            Timeframe::FourHour => 240,
            Timeframe::OneDay => 1440,
        }
    }

    /// Label used by the timeframe switcher
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::OneDay => "1D",
            Timeframe::FourHour => "4H",
            Timeframe::OneHour => "1H",
            Timeframe::FifteenMin => "15M",
        }
    }

    /// Returns all available timeframes in switcher order
    pub fn all() -> Vec<Timeframe> {
        vec![
            Timeframe::OneDay,
            Timeframe::FourHour,
            Timeframe::OneHour,
            Timeframe::FifteenMin,
        ]
    }
}

impl FromStr for Timeframe {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1d" | "1day" | "oneday" => Ok(Timeframe::OneDay),
            "4h" | "4hour" | "fourhour" => Ok(Timeframe::FourHour),
            "1h" | "1hour" | "onehour" => Ok(Timeframe::OneHour),
            "15m" | "15min" | "fifteenmin" => Ok(Timeframe::FifteenMin),
            _ => Err(BackendError::InvalidTimeframe {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_points() {
        assert_eq!(Timeframe::OneDay.history_points(), 30);
        assert_eq!(Timeframe::FourHour.history_points(), 10);
        assert_eq!(Timeframe::OneHour.history_points(), 5);
        assert_eq!(Timeframe::FifteenMin.history_points(), 2);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Timeframe::from_str("1D").unwrap(), Timeframe::OneDay);
        assert_eq!(Timeframe::from_str("4h").unwrap(), Timeframe::FourHour);
        assert_eq!(Timeframe::from_str("1Hour").unwrap(), Timeframe::OneHour);
        assert_eq!(Timeframe::from_str("15M").unwrap(), Timeframe::FifteenMin);
        assert!(Timeframe::from_str("1W").is_err());
    }

    #[test]
    fn test_serializes_as_switcher_label() {
        let json = serde_json::to_string(&Timeframe::FifteenMin).unwrap();
        assert_eq!(json, "\"15M\"");
        for tf in Timeframe::all() {
            assert_eq!(Timeframe::from_str(&tf.to_string()).unwrap(), tf);
        }
    }
}
