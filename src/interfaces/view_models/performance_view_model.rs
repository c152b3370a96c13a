use super::dashboard_view_model::KeyMetric;
use super::format::{fixed, pct};
use crate::domain::ml::model::ModelArchitecture;
use crate::domain::performance::analytics::PerformanceReport;

pub struct PairRow {
    pub pair: String,
    pub win_rate: String,
    pub trades: u32,
    pub pips: String,
}

pub struct PerformanceView {
    pub key_metrics: Vec<KeyMetric>,
    pub total_return: String,
    pub equity_drawdown: String,
    pub overall_success_rate: String,
    pub best_window: Option<String>,
    pub pair_rows: Vec<PairRow>,
}

pub struct PerformanceViewModel;

impl PerformanceViewModel {
    pub fn build(report: &PerformanceReport, active: Option<&ModelArchitecture>) -> PerformanceView {
        let key_metrics = active
            .map(|model| {
                let perf = &model.performance;
                vec![
                    KeyMetric {
                        label_key: "performance.winRate",
                        value: pct(perf.win_rate, 1),
                        detail: format!("{} trades", perf.total_trades),
                    },
                    KeyMetric {
                        label_key: "performance.profitFactor",
                        value: fixed(perf.profit_factor, 2),
                        detail: format!("avg profit {}%", fixed(perf.average_profit, 2)),
                    },
                    KeyMetric {
                        label_key: "performance.sharpeRatio",
                        value: fixed(perf.sharpe_ratio, 2),
                        detail: format!("model {}", model.version),
                    },
                    KeyMetric {
                        label_key: "performance.maxDrawdown",
                        value: pct(perf.max_drawdown, 1),
                        detail: format!("accuracy {}", pct(perf.accuracy, 1)),
                    },
                ]
            })
            .unwrap_or_default();

        let equity = report.equity_summary();

        PerformanceView {
            key_metrics,
            total_return: format!("{:+.1}%", equity.total_return_pct),
            equity_drawdown: format!("{:.1}%", equity.max_drawdown_pct),
            overall_success_rate: pct(report.overall_success_rate(), 1),
            best_window: report.best_window().map(|window| {
                format!("{} ({})", window.hour, pct(window.success_rate(), 0))
            }),
            pair_rows: report
                .pair_performance
                .iter()
                .map(|row| PairRow {
                    pair: row.pair.clone(),
                    win_rate: pct(row.win_rate, 0),
                    trades: row.trades,
                    pips: format!("{:+}", row.pips),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mock_data;

    #[test]
    fn test_report_analytics() {
        let report = mock_data::performance_report();
        let models = mock_data::models();
        let view = PerformanceViewModel::build(&report, models.first());

        assert_eq!(view.total_return, "+24.2%");
        assert_eq!(view.equity_drawdown, "-0.8%");
        assert_eq!(view.overall_success_rate, "73.3%");
        assert_eq!(view.best_window.as_deref(), Some("16:00 (80%)"));
        assert_eq!(view.pair_rows[0].win_rate, "78%");
        assert_eq!(view.pair_rows[0].pips, "+783");
        assert_eq!(view.key_metrics[3].value, "9.0%");
    }

    #[test]
    fn test_without_active_model() {
        let view = PerformanceViewModel::build(&PerformanceReport::default(), None);
        assert!(view.key_metrics.is_empty());
        assert_eq!(view.total_return, "+0.0%");
        assert!(view.best_window.is_none());
    }
}
