use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Daily snapshot of the rolling model metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePoint {
    pub date: NaiveDate,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub sharpe_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub equity: Decimal,
}

/// Trades opened in a two-hour window of the trading day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeDistribution {
    pub hour: String,
    pub trades: u32,
    pub success: u32,
}

impl TradeDistribution {
    pub fn success_rate(&self) -> f64 {
        if self.trades == 0 {
            return 0.0;
        }
        self.success as f64 / self.trades as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairPerformance {
    pub pair: String,
    pub win_rate: f64,
    pub trades: u32,
    pub pips: i64,
}

/// Everything the performance page charts
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub history: Vec<PerformancePoint>,
    pub equity_curve: Vec<EquityPoint>,
    pub trade_distribution: Vec<TradeDistribution>,
    pub pair_performance: Vec<PairPerformance>,
}

/// Headline figures of an equity curve
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EquitySummary {
    /// First to last point, in percent
    pub total_return_pct: f64,
    /// Deepest fall below the running high, in percent; zero or negative
    pub max_drawdown_pct: f64,
    /// Day the deepest fall bottomed out
    pub trough: Option<NaiveDate>,
}

fn percent(ratio: Decimal) -> f64 {
    (ratio * Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0)
}

impl PerformanceReport {
    /// Return and worst drawdown of the equity curve in a single pass
    pub fn equity_summary(&self) -> EquitySummary {
        let (Some(first), Some(last)) = (self.equity_curve.first(), self.equity_curve.last()) else {
            return EquitySummary::default();
        };

        let mut high = first.equity;
        let mut deepest: Option<(Decimal, NaiveDate)> = None;
        for point in &self.equity_curve {
            high = high.max(point.equity);
            if high <= Decimal::ZERO {
                continue;
            }
            let fall = ((high - point.equity) / high).min(Decimal::ONE);
            if fall > Decimal::ZERO && deepest.is_none_or(|(worst, _)| fall > worst) {
                deepest = Some((fall, point.date));
            }
        }

        let total_return_pct = if first.equity > Decimal::ZERO {
            percent((last.equity - first.equity) / first.equity)
        } else {
            0.0
        };

        EquitySummary {
            total_return_pct,
            max_drawdown_pct: deepest.map_or(0.0, |(fall, _)| -percent(fall)),
            trough: deepest.map(|(_, date)| date),
        }
    }

    /// Overall success rate across all distribution windows
    pub fn overall_success_rate(&self) -> f64 {
        let (trades, success) = self
            .trade_distribution
            .iter()
            .fold((0u32, 0u32), |(t, s), d| (t + d.trades, s + d.success));
        if trades == 0 {
            return 0.0;
        }
        success as f64 / trades as f64
    }

    /// The window with the highest success rate, ignoring empty windows
    pub fn best_window(&self) -> Option<&TradeDistribution> {
        self.trade_distribution
            .iter()
            .filter(|d| d.trades > 0)
            .max_by(|a, b| a.success_rate().total_cmp(&b.success_rate()))
    }
}
