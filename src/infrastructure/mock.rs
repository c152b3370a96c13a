use crate::domain::errors::BackendError;
use crate::domain::market::timeframe::Timeframe;
use crate::domain::ml::evolution::EvolutionEvent;
use crate::domain::ml::model::ModelArchitecture;
use crate::domain::performance::analytics::PerformanceReport;
use crate::domain::ports::{
    EvolutionOutcome, ModelBackend, PerformanceBackend, SignalRequest, TradingBackend,
};
use crate::domain::trading::pair::CurrencyPair;
use crate::domain::trading::types::{MarketData, TradingSignal};
use crate::infrastructure::mock_data;
use crate::infrastructure::simulation::latency_model::{self, BackendCall, LatencyModel};
use crate::infrastructure::simulation::market_data_generator::generate_market_data;
use crate::infrastructure::simulation::signal_generator::SignalGenerator;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Switch used to simulate an unreachable backend
#[derive(Debug, Default)]
struct Outage(AtomicBool);

impl Outage {
    fn set(&self, down: bool) {
        self.0.store(down, Ordering::SeqCst);
    }

    fn check(&self, call: BackendCall) -> Result<(), BackendError> {
        if self.0.load(Ordering::SeqCst) {
            warn!("Mock backend: {:?} failed (simulated outage)", call);
            return Err(BackendError::Unavailable {
                reason: "simulated outage".to_string(),
            });
        }
        Ok(())
    }
}

/// In-process trading backend serving the static datasets after a simulated
/// round trip. Market data and new signals are synthesized.
pub struct MockTradingBackend {
    latency: Arc<dyn LatencyModel>,
    rng: Mutex<StdRng>,
    outage: Outage,
}

impl MockTradingBackend {
    pub fn new(latency: Arc<dyn LatencyModel>, seed: Option<u64>) -> Self {
        Self {
            latency,
            rng: Mutex::new(seeded_rng(seed)),
            outage: Outage::default(),
        }
    }

    /// Makes every subsequent call fail with `BackendError::Unavailable`
    pub fn set_unavailable(&self, down: bool) {
        self.outage.set(down);
    }

    fn find_pair(symbol: &str) -> Result<CurrencyPair, BackendError> {
        mock_data::currency_pairs()
            .into_iter()
            .find(|p| p.symbol == symbol)
            .ok_or_else(|| BackendError::InvalidPair {
                symbol: symbol.to_string(),
            })
    }

    fn lock_rng(&self) -> std::sync::MutexGuard<'_, StdRng> {
        // A poisoned generator is still a valid generator
        self.rng.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl TradingBackend for MockTradingBackend {
    async fn fetch_signals(&self) -> Result<Vec<TradingSignal>, BackendError> {
        latency_model::simulate(self.latency.as_ref(), BackendCall::FetchSignals).await;
        self.outage.check(BackendCall::FetchSignals)?;
        Ok(mock_data::signals())
    }

    async fn fetch_pairs(&self) -> Result<Vec<CurrencyPair>, BackendError> {
        latency_model::simulate(self.latency.as_ref(), BackendCall::FetchPairs).await;
        self.outage.check(BackendCall::FetchPairs)?;
        Ok(mock_data::currency_pairs())
    }

    async fn fetch_market_data(
        &self,
        pair: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<MarketData>, BackendError> {
        latency_model::simulate(self.latency.as_ref(), BackendCall::FetchMarketData).await;
        self.outage.check(BackendCall::FetchMarketData)?;

        let step = Duration::minutes(timeframe.to_minutes() as i64);
        let data = {
            let mut rng = self.lock_rng();
            generate_market_data(pair, timeframe.history_points(), step, Utc::now(), &mut *rng)
        };
        debug!(
            "Mock backend: generated {} {} bars for {}",
            data.len(),
            timeframe,
            pair
        );
        Ok(data)
    }

    async fn run_inference(&self) -> Result<(), BackendError> {
        latency_model::simulate(self.latency.as_ref(), BackendCall::GenerateSignal).await;
        self.outage.check(BackendCall::GenerateSignal)
    }

    async fn generate_signal(&self, request: SignalRequest) -> Result<TradingSignal, BackendError> {
        self.outage.check(BackendCall::GenerateSignal)?;

        let pair = Self::find_pair(&request.pair)?;
        let signal = {
            let mut rng = self.lock_rng();
            SignalGenerator::generate(
                &pair,
                request.last_close,
                &request.model_version,
                Utc::now(),
                &mut *rng,
            )
        };
        info!(
            "Mock backend: {} signal for {} @ {} (SL {}, TP {})",
            signal.direction, signal.pair, signal.entry_price, signal.stop_loss, signal.take_profit
        );
        Ok(signal)
    }
}

/// Model registry backed by the static fixtures. Evolution runs always
/// produce the same hand-tuned architecture.
pub struct MockModelBackend {
    latency: Arc<dyn LatencyModel>,
    outage: Outage,
    /// Step at which an evolution run fails, if any
    fail_at_step: Mutex<Option<u8>>,
}

impl MockModelBackend {
    pub fn new(latency: Arc<dyn LatencyModel>) -> Self {
        Self {
            latency,
            outage: Outage::default(),
            fail_at_step: Mutex::new(None),
        }
    }

    pub fn set_unavailable(&self, down: bool) {
        self.outage.set(down);
    }

    /// Makes evolution runs fail once they reach `step`
    pub fn fail_evolution_at(&self, step: Option<u8>) {
        *self.fail_at_step.lock().unwrap_or_else(|e| e.into_inner()) = step;
    }
}

#[async_trait]
impl ModelBackend for MockModelBackend {
    async fn fetch_models(&self) -> Result<Vec<ModelArchitecture>, BackendError> {
        latency_model::simulate(self.latency.as_ref(), BackendCall::FetchModels).await;
        self.outage.check(BackendCall::FetchModels)?;
        Ok(mock_data::models())
    }

    async fn fetch_evolution_history(&self) -> Result<Vec<EvolutionEvent>, BackendError> {
        latency_model::simulate(self.latency.as_ref(), BackendCall::FetchEvolutionHistory).await;
        self.outage.check(BackendCall::FetchEvolutionHistory)?;
        Ok(mock_data::evolution_history())
    }

    async fn evolution_step(&self, step: u8) -> Result<(), BackendError> {
        latency_model::simulate(self.latency.as_ref(), BackendCall::EvolutionStep).await;
        self.outage.check(BackendCall::EvolutionStep)?;

        let fail_at = *self.fail_at_step.lock().unwrap_or_else(|e| e.into_inner());
        if fail_at == Some(step) {
            warn!("Mock backend: evolution aborted at step {}", step);
            return Err(BackendError::Unavailable {
                reason: format!("evolution worker crashed at step {}", step),
            });
        }
        Ok(())
    }

    async fn finish_evolution(
        &self,
        previous: &ModelArchitecture,
        generation: u32,
    ) -> Result<EvolutionOutcome, BackendError> {
        latency_model::simulate(self.latency.as_ref(), BackendCall::FinishEvolution).await;
        self.outage.check(BackendCall::FinishEvolution)?;

        let now = Utc::now();
        let model = mock_data::evolved_model(generation, now);
        let event = mock_data::evolution_event(generation, &previous.id, &model.id, now);
        info!(
            "Mock backend: evolved {} -> {} (v{})",
            previous.id, model.id, model.version
        );
        Ok(EvolutionOutcome { model, event })
    }
}

pub struct MockPerformanceBackend {
    latency: Arc<dyn LatencyModel>,
}

impl MockPerformanceBackend {
    pub fn new(latency: Arc<dyn LatencyModel>) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl PerformanceBackend for MockPerformanceBackend {
    async fn fetch_report(&self) -> Result<PerformanceReport, BackendError> {
        latency_model::simulate(self.latency.as_ref(), BackendCall::FetchPerformance).await;
        Ok(mock_data::performance_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::simulation::ZeroLatency;

    fn trading() -> MockTradingBackend {
        MockTradingBackend::new(Arc::new(ZeroLatency), Some(42))
    }

    #[tokio::test]
    async fn test_fetch_market_data_length_per_timeframe() {
        let backend = trading();
        for (tf, expected) in [
            (Timeframe::OneDay, 31),
            (Timeframe::FourHour, 11),
            (Timeframe::OneHour, 6),
            (Timeframe::FifteenMin, 3),
        ] {
            let data = backend.fetch_market_data("EURUSD", tf).await.unwrap();
            assert_eq!(data.len(), expected, "{}", tf);
            assert!(data.iter().all(|bar| bar.pair == "EURUSD"));
        }
    }

    #[tokio::test]
    async fn test_generate_signal_rejects_unknown_pair() {
        let backend = trading();
        let result = backend
            .generate_signal(SignalRequest {
                pair: "AUDUSD".to_string(),
                last_close: None,
                model_version: "7.0.3".to_string(),
            })
            .await;
        assert_eq!(
            result.unwrap_err(),
            BackendError::InvalidPair {
                symbol: "AUDUSD".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_outage_fails_calls() {
        let backend = trading();
        backend.set_unavailable(true);
        assert!(backend.fetch_signals().await.is_err());
        assert!(backend.run_inference().await.is_err());

        backend.set_unavailable(false);
        assert_eq!(backend.fetch_signals().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_finish_evolution_references_previous() {
        let backend = MockModelBackend::new(Arc::new(ZeroLatency));
        let models = backend.fetch_models().await.unwrap();
        let outcome = backend.finish_evolution(&models[0], 8).await.unwrap();

        assert_eq!(outcome.model.id, "model-gen-8");
        assert_eq!(outcome.event.previous_model_id, "model-gen-7");
        assert_eq!(outcome.event.new_model_id, "model-gen-8");
    }

    #[tokio::test]
    async fn test_evolution_step_failure_injection() {
        let backend = MockModelBackend::new(Arc::new(ZeroLatency));
        backend.fail_evolution_at(Some(3));
        assert!(backend.evolution_step(2).await.is_ok());
        assert!(backend.evolution_step(3).await.is_err());
    }
}
