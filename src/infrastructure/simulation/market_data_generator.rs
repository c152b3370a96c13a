use crate::domain::trading::types::MarketData;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

const VOLATILITY: f64 = 0.002;
const DRIFT_AMPLITUDE: f64 = 0.01;

/// Anchor price the random walk oscillates around
pub fn base_price(pair: &str) -> f64 {
    match pair {
        "EURUSD" => 1.08,
        "GBPUSD" => 1.26,
        "USDJPY" => 154.0,
        "AUDUSD" => 0.66,
        "USDCAD" => 1.36,
        _ => 1.15,
    }
}

fn to_price(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(6))
        .unwrap_or(Decimal::ZERO)
}

/// Builds `points + 1` bars ending at `now`, spaced `step` apart, oldest first.
///
/// Each bar perturbs the pair's base price by up to half the volatility band
/// and adds a sinusoidal drift. The close is a blend weighted toward the
/// extremes and always lies within `[low, high]`.
pub fn generate_market_data<R: Rng>(
    pair: &str,
    points: usize,
    step: Duration,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<MarketData> {
    let base = base_price(pair);
    let mut data = Vec::with_capacity(points + 1);

    for i in (0..=points).rev() {
        let timestamp = now - step * i as i32;

        let random_change = (rng.random::<f64>() - 0.5) * VOLATILITY * base;
        let drift = (i as f64 / 10.0).sin() * DRIFT_AMPLITUDE * base;
        let open = base + random_change + drift;
        let high = open + rng.random::<f64>() * VOLATILITY * base;
        let low = open - rng.random::<f64>() * VOLATILITY * base;
        let close = ((open + high + low + high + low) / 5.0).clamp(low, high);
        let volume = rng.random_range(500..1500);

        data.push(MarketData {
            pair: pair.to_string(),
            timestamp,
            open: to_price(open),
            high: to_price(high),
            low: to_price(low),
            close: to_price(close),
            volume,
        });
    }

    data
}
