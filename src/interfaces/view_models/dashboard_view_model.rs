use super::format::{fixed, generation_label, pct, signed_pct};
use super::signal_card::SignalCard;
use crate::application::stores::{ModelState, TradingState};
use crate::domain::trading::types::SignalStatus;

pub const RECENT_SIGNALS: usize = 4;
pub const LISTED_MODELS: usize = 3;

pub struct KeyMetric {
    pub label_key: &'static str,
    pub value: String,
    pub detail: String,
}

pub struct ModelSummary {
    pub id: String,
    pub generation: String,
    pub version: String,
    pub created: String,
    pub improvement: String,
    pub trades: String,
    pub is_active: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SignalCounts {
    pub new: usize,
    pub active: usize,
    pub closed: usize,
}

pub struct DashboardView {
    pub key_metrics: Vec<KeyMetric>,
    pub recent_signals: Vec<SignalCard>,
    pub models: Vec<ModelSummary>,
    pub signal_counts: SignalCounts,
    pub is_loading: bool,
    pub error: Option<String>,
}

pub struct DashboardViewModel;

impl DashboardViewModel {
    /// Returns `None` until an active model is known; the page shows a
    /// loading placeholder meanwhile.
    pub fn build(trading: &TradingState, models: &ModelState) -> Option<DashboardView> {
        let active = models.active_model.as_ref()?;
        let perf = &active.performance;

        let key_metrics = vec![
            KeyMetric {
                label_key: "dashboard.winRate",
                value: pct(perf.win_rate, 1),
                detail: format!("{} from prev", signed_pct(perf.improvement_from_previous, 1)),
            },
            KeyMetric {
                label_key: "dashboard.profitFactor",
                value: fixed(perf.profit_factor, 2),
                detail: format!("Sharpe {}", fixed(perf.sharpe_ratio, 2)),
            },
            KeyMetric {
                label_key: "dashboard.totalTrades",
                value: perf.total_trades.to_string(),
                detail: format!("{} won / {} lost", perf.successful_trades, perf.failed_trades),
            },
            KeyMetric {
                label_key: "dashboard.avgProfit",
                value: format!("{}%", fixed(perf.average_profit, 2)),
                detail: format!("max drawdown {}", pct(perf.max_drawdown, 1)),
            },
        ];

        let models_list = models
            .models
            .iter()
            .take(LISTED_MODELS)
            .map(|m| ModelSummary {
                id: m.id.clone(),
                generation: generation_label(&m.id).to_string(),
                version: m.version.clone(),
                created: m.created_at.format("%Y-%m-%d").to_string(),
                improvement: signed_pct(m.performance.improvement_from_previous, 1),
                trades: format!("{} trades", m.performance.total_trades),
                is_active: m.is_active,
            })
            .collect();

        Some(DashboardView {
            key_metrics,
            recent_signals: trading
                .signals
                .iter()
                .take(RECENT_SIGNALS)
                .map(SignalCard::from_signal)
                .collect(),
            models: models_list,
            signal_counts: Self::count_signals(trading),
            is_loading: trading.is_loading() || models.is_loading(),
            error: trading.error.clone().or_else(|| models.error.clone()),
        })
    }

    pub fn count_signals(trading: &TradingState) -> SignalCounts {
        trading
            .signals
            .iter()
            .fold(SignalCounts::default(), |mut counts, signal| {
                match signal.status {
                    SignalStatus::New => counts.new += 1,
                    SignalStatus::Active => counts.active += 1,
                    SignalStatus::Closed | SignalStatus::Cancelled => counts.closed += 1,
                }
                counts
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::stores::{ModelAction, TradingAction};
    use crate::infrastructure::mock_data;

    fn loaded() -> (TradingState, ModelState) {
        let trading = TradingState::default()
            .reduce(TradingAction::RequestStarted)
            .reduce(TradingAction::SignalsLoaded(mock_data::signals()));
        let models = ModelState::default()
            .reduce(ModelAction::RequestStarted)
            .reduce(ModelAction::ModelsLoaded(mock_data::models()));
        (trading, models)
    }

    #[test]
    fn test_no_active_model_yields_placeholder() {
        assert!(DashboardViewModel::build(&TradingState::default(), &ModelState::default()).is_none());
    }

    #[test]
    fn test_key_metrics_formatting() {
        let (trading, models) = loaded();
        let view = DashboardViewModel::build(&trading, &models).unwrap();

        assert_eq!(view.key_metrics[0].value, "72.0%");
        assert_eq!(view.key_metrics[0].detail, "+8.0% from prev");
        assert_eq!(view.key_metrics[1].value, "2.10");
        assert_eq!(view.key_metrics[2].value, "358");
        assert_eq!(view.key_metrics[3].value, "0.65%");
        assert!(!view.is_loading);
    }

    #[test]
    fn test_lists_and_counts() {
        let (trading, models) = loaded();
        let view = DashboardViewModel::build(&trading, &models).unwrap();

        assert_eq!(view.recent_signals.len(), 3);
        assert_eq!(view.models.len(), 2);
        assert_eq!(view.models[0].generation, "7");
        assert_eq!(view.models[0].created, "2025-05-02");
        assert!(view.models[0].is_active);
        assert_eq!(
            view.signal_counts,
            SignalCounts {
                new: 0,
                active: 2,
                closed: 1
            }
        );
    }
}
