//! Static datasets served by the mock backends.
//!
//! These fixtures double as the contract a real backend would have to honour:
//! the pair catalogue, the seeded signal list, the model registry, the
//! evolution history and the performance report.

use crate::domain::ml::evolution::{
    ArchitectureChange, ChangeKind, EvolutionEvent, EvolutionTrigger,
};
use crate::domain::ml::model::{ModelArchitecture, ModelLayer, ModelPerformance};
use crate::domain::performance::analytics::{
    EquityPoint, PairPerformance, PerformancePoint, PerformanceReport, TradeDistribution,
};
use crate::domain::trading::pair::{CurrencyPair, PairCategory};
use crate::domain::trading::types::{SignalDirection, SignalStatus, TradingSignal};
use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, min, sec))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

pub fn currency_pairs() -> Vec<CurrencyPair> {
    use PairCategory::*;
    vec![
        CurrencyPair::new("EUR", "USD", dec!(0.0001), 1.2, Major),
        CurrencyPair::new("GBP", "USD", dec!(0.0001), 1.8, Major),
        CurrencyPair::new("USD", "JPY", dec!(0.01), 1.5, Major),
        CurrencyPair::new("USD", "CHF", dec!(0.0001), 2.0, Major),
        CurrencyPair::new("EUR", "GBP", dec!(0.0001), 1.3, Minor),
        CurrencyPair::new("EUR", "JPY", dec!(0.01), 1.6, Minor),
        CurrencyPair::new("GBP", "JPY", dec!(0.01), 1.9, Minor),
        CurrencyPair::new("CHF", "JPY", dec!(0.01), 2.1, Minor),
        CurrencyPair::new("EUR", "TRY", dec!(0.0001), 25.0, Exotic),
        CurrencyPair::new("USD", "ZAR", dec!(0.0001), 15.0, Exotic),
        CurrencyPair::new("USD", "MXN", dec!(0.0001), 12.0, Exotic),
        CurrencyPair::new("EUR", "PLN", dec!(0.0001), 18.0, Exotic),
    ]
}

#[allow(clippy::too_many_arguments)]
fn seeded_signal(
    id: &str,
    pair: &str,
    direction: SignalDirection,
    levels: (Decimal, Decimal, Decimal),
    timestamp: DateTime<Utc>,
    confidence: f64,
    status: SignalStatus,
    profit_loss: Option<f64>,
    explanation: &str,
) -> TradingSignal {
    let (entry_price, stop_loss, take_profit) = levels;
    TradingSignal {
        id: id.to_string(),
        pair: pair.to_string(),
        direction,
        entry_price,
        stop_loss,
        take_profit,
        timestamp,
        confidence,
        status,
        profit_loss,
        explanation: explanation.to_string(),
        model_version: "7.0.3".to_string(),
    }
}

pub fn signals() -> Vec<TradingSignal> {
    vec![
        seeded_signal(
            "signal-001",
            "EURUSD",
            SignalDirection::Buy,
            (dec!(1.0832), dec!(1.0795), dec!(1.0905)),
            at(2025, 5, 12, 8, 24, 13),
            0.87,
            SignalStatus::Active,
            None,
            "Price broke above key resistance level with strong momentum. RSI showing bullish divergence. Multiple timeframe analysis confirms uptrend.",
        ),
        seeded_signal(
            "signal-002",
            "GBPUSD",
            SignalDirection::Sell,
            (dec!(1.2654), dec!(1.2692), dec!(1.2578)),
            at(2025, 5, 11, 14, 15, 42),
            0.79,
            SignalStatus::Closed,
            Some(0.65),
            "Price reached overbought territory with bearish reversal pattern on H4. Strong resistance zone with historical significance. Multiple timeframe analysis shows bearish pressure.",
        ),
        seeded_signal(
            "signal-003",
            "USDJPY",
            SignalDirection::Buy,
            (dec!(154.28), dec!(153.82), dec!(155.20)),
            at(2025, 5, 10, 22, 8, 51),
            0.82,
            SignalStatus::Active,
            None,
            "Price consolidating after pullback to key support. Strong bullish engulfing pattern on daily chart. Market sentiment analysis shows increased risk appetite favoring JPY weakness.",
        ),
    ]
}

pub fn models() -> Vec<ModelArchitecture> {
    vec![
        ModelArchitecture {
            id: "model-gen-7".to_string(),
            version: "7.0.3".to_string(),
            layers: vec![
                ModelLayer::lstm(128, 66560),
                ModelLayer::dropout(0.2),
                ModelLayer::lstm(64, 49664),
                ModelLayer::dropout(0.1),
                ModelLayer::dense(32, "relu", 2080),
                ModelLayer::dense(3, "softmax", 99),
            ],
            created_at: at(2025, 5, 2, 14, 23, 15),
            performance: ModelPerformance {
                accuracy: 0.76,
                sharpe_ratio: 1.82,
                max_drawdown: 0.09,
                win_rate: 0.72,
                profit_factor: 2.1,
                total_trades: 358,
                successful_trades: 258,
                failed_trades: 100,
                average_profit: 0.65,
                improvement_from_previous: 0.08,
            },
            is_active: true,
        },
        ModelArchitecture {
            id: "model-gen-6".to_string(),
            version: "6.2.7".to_string(),
            layers: vec![
                ModelLayer::lstm(96, 45056),
                ModelLayer::dropout(0.3),
                ModelLayer::lstm(48, 27840),
                ModelLayer::dense(16, "relu", 784),
                ModelLayer::dense(3, "softmax", 51),
            ],
            created_at: at(2025, 4, 15, 9, 12, 47),
            performance: ModelPerformance {
                accuracy: 0.68,
                sharpe_ratio: 1.43,
                max_drawdown: 0.12,
                win_rate: 0.65,
                profit_factor: 1.85,
                total_trades: 412,
                successful_trades: 268,
                failed_trades: 144,
                average_profit: 0.52,
                improvement_from_previous: 0.05,
            },
            is_active: false,
        },
    ]
}

pub fn evolution_history() -> Vec<EvolutionEvent> {
    vec![
        EvolutionEvent {
            id: "evolution-7".to_string(),
            timestamp: at(2025, 5, 2, 14, 23, 15),
            previous_model_id: "model-gen-6".to_string(),
            new_model_id: "model-gen-7".to_string(),
            performance_improvement: 0.08,
            architecture_changes: vec![
                ArchitectureChange::new(
                    ChangeKind::Modify,
                    0,
                    "Increased LSTM units from 96 to 128",
                    0.04,
                ),
                ArchitectureChange::new(ChangeKind::Add, 4, "Added additional Dense layer", 0.02),
                ArchitectureChange::new(
                    ChangeKind::Modify,
                    1,
                    "Reduced dropout from 0.3 to 0.2",
                    0.02,
                ),
            ],
            trigger: EvolutionTrigger::Performance,
        },
        EvolutionEvent {
            id: "evolution-6".to_string(),
            timestamp: at(2025, 4, 15, 9, 12, 47),
            previous_model_id: "model-gen-5".to_string(),
            new_model_id: "model-gen-6".to_string(),
            performance_improvement: 0.05,
            architecture_changes: vec![
                ArchitectureChange::new(ChangeKind::Remove, 3, "Removed one Dense layer", 0.01),
                ArchitectureChange::new(
                    ChangeKind::Modify,
                    0,
                    "Increased LSTM units from 64 to 96",
                    0.03,
                ),
                ArchitectureChange::new(
                    ChangeKind::Modify,
                    1,
                    "Increased dropout from 0.2 to 0.3",
                    0.01,
                ),
            ],
            trigger: EvolutionTrigger::Scheduled,
        },
    ]
}

/// The architecture every simulated evolution run settles on.
/// Layers and metrics are fixed; only identity and timestamps vary.
pub fn evolved_model(generation: u32, now: DateTime<Utc>) -> ModelArchitecture {
    ModelArchitecture {
        id: format!("model-gen-{}", generation),
        version: format!("{}.0.1", generation),
        layers: vec![
            ModelLayer::lstm(160, 103680),
            ModelLayer::dropout(0.15),
            ModelLayer::lstm(80, 77120),
            ModelLayer::dropout(0.1),
            ModelLayer::dense(40, "relu", 3240),
            ModelLayer::dense(16, "relu", 656),
            ModelLayer::dense(3, "softmax", 51),
        ],
        created_at: now,
        performance: ModelPerformance {
            accuracy: 0.81,
            sharpe_ratio: 2.04,
            max_drawdown: 0.08,
            win_rate: 0.78,
            profit_factor: 2.35,
            total_trades: 275,
            successful_trades: 214,
            failed_trades: 61,
            average_profit: 0.72,
            improvement_from_previous: 0.05,
        },
        is_active: true,
    }
}

pub fn evolution_event(
    generation: u32,
    previous_model_id: &str,
    new_model_id: &str,
    now: DateTime<Utc>,
) -> EvolutionEvent {
    EvolutionEvent {
        id: format!("evolution-{}", generation),
        timestamp: now,
        previous_model_id: previous_model_id.to_string(),
        new_model_id: new_model_id.to_string(),
        performance_improvement: 0.05,
        architecture_changes: vec![
            ArchitectureChange::new(
                ChangeKind::Modify,
                0,
                "Increased LSTM units from 128 to 160",
                0.02,
            ),
            ArchitectureChange::new(ChangeKind::Add, 5, "Added additional Dense layer", 0.01),
            ArchitectureChange::new(
                ChangeKind::Modify,
                1,
                "Reduced dropout from 0.2 to 0.15",
                0.01,
            ),
            ArchitectureChange::new(
                ChangeKind::Modify,
                2,
                "Increased LSTM units from 64 to 80",
                0.01,
            ),
        ],
        trigger: EvolutionTrigger::Manual,
    }
}

const PERFORMANCE_HISTORY: [(f64, f64, f64); 23] = [
    (0.61, 1.58, 1.32),
    (0.62, 1.61, 1.35),
    (0.64, 1.63, 1.39),
    (0.63, 1.62, 1.37),
    (0.65, 1.68, 1.40),
    (0.65, 1.72, 1.42),
    (0.67, 1.75, 1.45),
    (0.68, 1.78, 1.48),
    (0.66, 1.76, 1.44),
    (0.67, 1.79, 1.47),
    (0.69, 1.82, 1.51),
    (0.70, 1.85, 1.54),
    (0.69, 1.84, 1.52),
    (0.71, 1.89, 1.58),
    (0.72, 1.94, 1.63),
    (0.73, 1.97, 1.67),
    (0.72, 1.95, 1.65),
    (0.74, 1.99, 1.70),
    (0.72, 1.96, 1.66),
    (0.73, 1.98, 1.68),
    (0.75, 2.05, 1.75),
    (0.76, 2.08, 1.79),
    (0.76, 2.10, 1.82),
];

const EQUITY_CURVE: [i64; 23] = [
    10000, 10120, 10250, 10180, 10320, 10480, 10650, 10820, 10750, 10890, 11050, 11220, 11150,
    11320, 11520, 11680, 11590, 11780, 11690, 11820, 12050, 12230, 12420,
];

const TRADE_DISTRIBUTION: [(u32, u32); 12] = [
    (12, 7),
    (8, 5),
    (14, 10),
    (22, 16),
    (32, 25),
    (28, 21),
    (26, 18),
    (35, 27),
    (40, 32),
    (33, 24),
    (24, 17),
    (18, 12),
];

pub fn performance_report() -> PerformanceReport {
    let start = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap_or_default();
    let day = |i: usize| start + Days::new(i as u64);

    let history = PERFORMANCE_HISTORY
        .iter()
        .enumerate()
        .map(|(i, &(win_rate, profit_factor, sharpe_ratio))| PerformancePoint {
            date: day(i),
            win_rate,
            profit_factor,
            sharpe_ratio,
        })
        .collect();

    let equity_curve = EQUITY_CURVE
        .iter()
        .enumerate()
        .map(|(i, &equity)| EquityPoint {
            date: day(i),
            equity: Decimal::from(equity),
        })
        .collect();

    let trade_distribution = TRADE_DISTRIBUTION
        .iter()
        .enumerate()
        .map(|(i, &(trades, success))| TradeDistribution {
            hour: format!("{:02}:00", i * 2),
            trades,
            success,
        })
        .collect();

    let pair_performance = [
        ("EURUSD", 0.78, 124, 783),
        ("GBPUSD", 0.72, 98, 652),
        ("USDJPY", 0.75, 86, 712),
        ("AUDUSD", 0.68, 57, 493),
        ("USDCAD", 0.71, 64, 528),
        ("EURGBP", 0.76, 42, 388),
    ]
    .into_iter()
    .map(|(pair, win_rate, trades, pips)| PairPerformance {
        pair: pair.to_string(),
        win_rate,
        trades,
        pips,
    })
    .collect();

    PerformanceReport {
        history,
        equity_curve,
        trade_distribution,
        pair_performance,
    }
}
