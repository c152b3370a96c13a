use crate::application::stores::trading_store::TradingState;
use crate::application::stores::{ModelStore, TradingStore, UiStore};
use crate::config::Config;
use crate::domain::errors::StoreError;
use crate::domain::ml::model::ModelArchitecture;
use crate::domain::performance::analytics::PerformanceReport;
use crate::domain::ports::{ModelBackend, PerformanceBackend, TradingBackend};
use crate::infrastructure::{MockModelBackend, MockPerformanceBackend, MockTradingBackend};
use std::sync::Arc;
use tracing::{info, warn};

/// Owns the three stores and the backends behind them.
///
/// Actions that change the active model go through the context so the
/// trading store keeps stamping new signals with the right model version.
pub struct AppContext {
    pub trading: TradingStore,
    pub models: ModelStore,
    pub ui: UiStore,
    performance: Arc<dyn PerformanceBackend>,
    config: Config,
}

impl AppContext {
    pub fn new(
        config: Config,
        trading_backend: Arc<dyn TradingBackend>,
        model_backend: Arc<dyn ModelBackend>,
        performance_backend: Arc<dyn PerformanceBackend>,
    ) -> Self {
        let initial = TradingState::with_selection(config.default_pair(), config.default_timeframe());
        Self {
            trading: TradingStore::new(trading_backend, initial),
            models: ModelStore::new(model_backend),
            ui: UiStore::new(config.settings.clone()),
            performance: performance_backend,
            config,
        }
    }

    /// Wires the in-process mock backends using the simulation settings
    pub fn with_mocks(config: Config) -> Self {
        let latency = config.simulation.latency_model();
        let trading = Arc::new(MockTradingBackend::new(latency.clone(), config.simulation.seed));
        let models = Arc::new(MockModelBackend::new(latency.clone()));
        let performance = Arc::new(MockPerformanceBackend::new(latency));
        Self::new(config, trading, models, performance)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Initial dashboard load. The four requests run concurrently; the
    /// first failure is returned after all of them have settled.
    pub async fn bootstrap(&self) -> Result<(), StoreError> {
        let (pair, timeframe) = {
            let state = self.trading.snapshot();
            (state.active_pair, state.timeframe)
        };
        info!("AppContext: bootstrapping dashboard for {} ({})", pair, timeframe);

        let (models, signals, history, market) = tokio::join!(
            self.fetch_models(),
            self.trading.fetch_signals(),
            self.models.fetch_evolution_history(),
            self.trading.fetch_market_data(&pair, timeframe),
        );

        for result in [&models, &signals, &history, &market] {
            if let Err(e) = result {
                warn!("AppContext: bootstrap step failed: {}", e);
            }
        }
        models.and(signals).and(history).and(market)
    }

    pub async fn fetch_models(&self) -> Result<(), StoreError> {
        self.models.fetch_models().await?;
        self.sync_model_version();
        Ok(())
    }

    pub fn set_active_model(&self, id: &str) -> Result<(), StoreError> {
        self.models.set_active_model(id)?;
        self.sync_model_version();
        Ok(())
    }

    pub async fn trigger_evolution(&self) -> Result<ModelArchitecture, StoreError> {
        let model = self.models.trigger_evolution().await?;
        self.sync_model_version();
        Ok(model)
    }

    pub async fn performance_report(&self) -> Result<PerformanceReport, StoreError> {
        Ok(self.performance.fetch_report().await?)
    }

    fn sync_model_version(&self) {
        let version = self
            .models
            .snapshot()
            .active_model
            .map(|model| model.version);
        if let Some(version) = version {
            self.trading.set_model_version(&version);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::timeframe::Timeframe;

    #[tokio::test]
    async fn test_bootstrap_loads_everything() {
        let ctx = AppContext::with_mocks(Config::instant(1));
        ctx.bootstrap().await.unwrap();

        let trading = ctx.trading.snapshot();
        assert_eq!(trading.signals.len(), 3);
        assert_eq!(trading.market_data.len(), 31);
        assert_eq!(trading.available_pairs.len(), 12);
        assert!(!trading.is_loading());

        let models = ctx.models.snapshot();
        assert_eq!(models.active_model.unwrap().id, "model-gen-7");
        assert_eq!(models.evolution_history.len(), 2);
    }

    #[tokio::test]
    async fn test_initial_selection_comes_from_config() {
        let mut config = Config::instant(1);
        config.ui.default_pair = "USDJPY".to_string();
        config.ui.default_timeframe = Timeframe::OneHour;

        let ctx = AppContext::with_mocks(config);
        ctx.bootstrap().await.unwrap();

        let trading = ctx.trading.snapshot();
        assert_eq!(trading.active_pair, "USDJPY");
        assert_eq!(trading.timeframe, Timeframe::OneHour);
        assert_eq!(trading.market_data.len(), 6);
    }

    #[tokio::test]
    async fn test_model_version_follows_active_model() {
        let ctx = AppContext::with_mocks(Config::instant(3));
        ctx.fetch_models().await.unwrap();
        assert_eq!(ctx.trading.snapshot().model_version, "7.0.3");

        ctx.set_active_model("model-gen-6").unwrap();
        assert_eq!(ctx.trading.snapshot().model_version, "6.2.7");

        ctx.trading.generate_signal().await.unwrap();
        assert_eq!(ctx.trading.snapshot().signals[0].model_version, "6.2.7");
    }

    #[tokio::test]
    async fn test_evolution_updates_signal_version() {
        let ctx = AppContext::with_mocks(Config::instant(3));
        ctx.fetch_models().await.unwrap();
        let model = ctx.trigger_evolution().await.unwrap();

        assert_eq!(model.version, "8.0.1");
        assert_eq!(ctx.trading.snapshot().model_version, "8.0.1");
    }

    #[tokio::test]
    async fn test_performance_report() {
        let ctx = AppContext::with_mocks(Config::instant(3));
        let report = ctx.performance_report().await.unwrap();
        assert_eq!(report.history.len(), 23);
    }
}
