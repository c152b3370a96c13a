use crate::domain::trading::pair::CurrencyPair;
use crate::domain::trading::types::{SignalDirection, SignalStatus, TradingSignal};
use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const BUY_RATIONALE: &str = "Bullish engulfing pattern detected with confluence of multiple technical indicators. Strong support level holding with decreasing selling pressure. Momentum indicators show potential for continued upward movement.";
const SELL_RATIONALE: &str = "Bearish divergence detected on RSI with price reaching key resistance zone. Supply zone analysis shows strong selling pressure. Multiple timeframe analysis confirms potential reversal.";

/// Quote used when no market data has been loaded for the pair
pub fn fallback_price(symbol: &str) -> Decimal {
    match symbol {
        "EURUSD" => dec!(1.0845),
        "GBPUSD" => dec!(1.2672),
        "USDJPY" => dec!(154.32),
        "AUDUSD" => dec!(0.6645),
        "USDCAD" => dec!(1.3578),
        _ => dec!(1.1423),
    }
}

pub fn rationale(direction: SignalDirection) -> &'static str {
    match direction {
        SignalDirection::Buy => BUY_RATIONALE,
        SignalDirection::Sell => SELL_RATIONALE,
    }
}

/// Fabricates trading signals around a reference price
pub struct SignalGenerator;

impl SignalGenerator {
    /// Stop sits 20..=49 pips and target 40..=89 pips from the entry,
    /// on the sides implied by the direction, rounded to 5 decimals.
    pub fn generate<R: Rng>(
        pair: &CurrencyPair,
        last_close: Option<Decimal>,
        model_version: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> TradingSignal {
        let entry_price = last_close.unwrap_or_else(|| fallback_price(&pair.symbol));

        let direction = if rng.random_bool(0.5) {
            SignalDirection::Buy
        } else {
            SignalDirection::Sell
        };

        let stop_pips = Decimal::from(rng.random_range(20u32..50));
        let profit_pips = Decimal::from(rng.random_range(40u32..90));
        let stop_distance = stop_pips * pair.pip;
        let profit_distance = profit_pips * pair.pip;

        let (stop_loss, take_profit) = match direction {
            SignalDirection::Buy => (entry_price - stop_distance, entry_price + profit_distance),
            SignalDirection::Sell => (entry_price + stop_distance, entry_price - profit_distance),
        };

        TradingSignal {
            id: format!("signal-{}", uuid::Uuid::new_v4()),
            pair: pair.symbol.clone(),
            direction,
            entry_price,
            stop_loss: stop_loss.round_dp(5),
            take_profit: take_profit.round_dp(5),
            timestamp: now,
            confidence: 0.7 + rng.random::<f64>() * 0.2,
            status: SignalStatus::New,
            profit_loss: None,
            explanation: rationale(direction).to_string(),
            model_version: model_version.to_string(),
        }
    }
}
