use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalDirection {
    Buy,
    Sell,
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalDirection::Buy => write!(f, "BUY"),
            SignalDirection::Sell => write!(f, "SELL"),
        }
    }
}

/// Signal lifecycle. Nothing advances a signal automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalStatus {
    New,
    Active,
    Closed,
    Cancelled,
}

impl SignalStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, SignalStatus::New | SignalStatus::Active)
    }
}

impl fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalStatus::New => write!(f, "NEW"),
            SignalStatus::Active => write!(f, "ACTIVE"),
            SignalStatus::Closed => write!(f, "CLOSED"),
            SignalStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// One OHLC bar of (synthetic) market data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    pub pair: String,
    pub timestamp: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub open: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub high: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub low: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub close: Decimal,
    pub volume: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradingSignal {
    pub id: String,
    pub pair: String,
    pub direction: SignalDirection,
    #[serde(with = "rust_decimal::serde::float")]
    pub entry_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub stop_loss: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub take_profit: Decimal,
    pub timestamp: DateTime<Utc>,
    pub confidence: f64,
    pub status: SignalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_loss: Option<f64>,
    pub explanation: String,
    pub model_version: String,
}

impl TradingSignal {
    /// Distance from entry to stop, in price units
    pub fn risk(&self) -> Decimal {
        (self.entry_price - self.stop_loss).abs()
    }

    /// Distance from entry to target, in price units
    pub fn reward(&self) -> Decimal {
        (self.take_profit - self.entry_price).abs()
    }

    pub fn risk_pips(&self, pip: Decimal) -> Decimal {
        if pip.is_zero() {
            return Decimal::ZERO;
        }
        self.risk() / pip
    }

    pub fn reward_pips(&self, pip: Decimal) -> Decimal {
        if pip.is_zero() {
            return Decimal::ZERO;
        }
        self.reward() / pip
    }

    /// Reward-to-risk multiple, `None` when the stop sits on the entry
    pub fn risk_reward_ratio(&self) -> Option<Decimal> {
        let risk = self.risk();
        if risk.is_zero() {
            return None;
        }
        Some(self.reward() / risk)
    }

    /// True when stop and target sit on the correct side of the entry
    pub fn has_consistent_levels(&self) -> bool {
        match self.direction {
            SignalDirection::Buy => {
                self.stop_loss < self.entry_price && self.entry_price < self.take_profit
            }
            SignalDirection::Sell => {
                self.take_profit < self.entry_price && self.entry_price < self.stop_loss
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_signal(direction: SignalDirection) -> TradingSignal {
        let (stop_loss, take_profit) = match direction {
            SignalDirection::Buy => (dec!(1.0795), dec!(1.0905)),
            SignalDirection::Sell => (dec!(1.0869), dec!(1.0759)),
        };
        TradingSignal {
            id: "signal-test".to_string(),
            pair: "EURUSD".to_string(),
            direction,
            entry_price: dec!(1.0832),
            stop_loss,
            take_profit,
            timestamp: Utc::now(),
            confidence: 0.8,
            status: SignalStatus::New,
            profit_loss: None,
            explanation: "test".to_string(),
            model_version: "7.0.3".to_string(),
        }
    }

    #[test]
    fn test_pips_and_ratio() {
        let signal = sample_signal(SignalDirection::Buy);
        assert_eq!(signal.risk_pips(dec!(0.0001)), dec!(37));
        assert_eq!(signal.reward_pips(dec!(0.0001)), dec!(73));
        let ratio = signal.risk_reward_ratio().unwrap();
        assert!(ratio > dec!(1.97) && ratio < dec!(1.98));
    }

    #[test]
    fn test_consistent_levels() {
        assert!(sample_signal(SignalDirection::Buy).has_consistent_levels());
        assert!(sample_signal(SignalDirection::Sell).has_consistent_levels());

        let mut broken = sample_signal(SignalDirection::Sell);
        broken.direction = SignalDirection::Buy;
        assert!(!broken.has_consistent_levels());
    }

    #[test]
    fn test_status_is_open() {
        assert!(SignalStatus::New.is_open());
        assert!(SignalStatus::Active.is_open());
        assert!(!SignalStatus::Closed.is_open());
        assert!(!SignalStatus::Cancelled.is_open());
    }

    #[test]
    fn test_json_shape() {
        let signal = sample_signal(SignalDirection::Sell);
        let value = serde_json::to_value(&signal).unwrap();
        assert_eq!(value["direction"], "sell");
        assert_eq!(value["status"], "new");
        assert!((value["entryPrice"].as_f64().unwrap() - 1.0832).abs() < 1e-9);
        assert_eq!(value["modelVersion"], "7.0.3");
        assert!(value.get("profitLoss").is_none());
    }
}
