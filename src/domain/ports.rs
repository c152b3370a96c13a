use crate::domain::errors::BackendError;
use crate::domain::market::timeframe::Timeframe;
use crate::domain::ml::evolution::EvolutionEvent;
use crate::domain::ml::model::ModelArchitecture;
use crate::domain::performance::analytics::PerformanceReport;
use crate::domain::trading::pair::CurrencyPair;
use crate::domain::trading::types::{MarketData, TradingSignal};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Everything the signal service needs to price a new signal
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRequest {
    pub pair: String,
    /// Close of the most recent bar, if market data is loaded
    pub last_close: Option<Decimal>,
    pub model_version: String,
}

/// Result of a completed evolution run
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOutcome {
    pub model: ModelArchitecture,
    pub event: EvolutionEvent,
}

/// Source of signals, pair reference data and chart series
#[async_trait]
pub trait TradingBackend: Send + Sync {
    async fn fetch_signals(&self) -> Result<Vec<TradingSignal>, BackendError>;
    async fn fetch_pairs(&self) -> Result<Vec<CurrencyPair>, BackendError>;
    async fn fetch_market_data(
        &self,
        pair: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<MarketData>, BackendError>;
    /// Waits out the model's inference round trip. Callers build the
    /// `SignalRequest` only after this returns, so it reflects the state at
    /// the moment the model answers.
    async fn run_inference(&self) -> Result<(), BackendError>;
    /// Prices a signal from the request; does not wait on the network
    async fn generate_signal(&self, request: SignalRequest) -> Result<TradingSignal, BackendError>;
}

/// Model registry and the evolution process
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn fetch_models(&self) -> Result<Vec<ModelArchitecture>, BackendError>;
    async fn fetch_evolution_history(&self) -> Result<Vec<EvolutionEvent>, BackendError>;

    /// Waits for one tenth of the evolution run to complete
    async fn evolution_step(&self, step: u8) -> Result<(), BackendError>;

    /// Produces the next-generation model, evolved from `previous`
    async fn finish_evolution(
        &self,
        previous: &ModelArchitecture,
        generation: u32,
    ) -> Result<EvolutionOutcome, BackendError>;
}

#[async_trait]
pub trait PerformanceBackend: Send + Sync {
    async fn fetch_report(&self) -> Result<PerformanceReport, BackendError>;
}
