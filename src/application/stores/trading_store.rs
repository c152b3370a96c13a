use crate::domain::errors::StoreError;
use crate::domain::market::timeframe::Timeframe;
use crate::domain::ports::{SignalRequest, TradingBackend};
use crate::domain::trading::pair::{CurrencyPair, PairFilter};
use crate::domain::trading::types::{MarketData, TradingSignal};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};

pub const DEFAULT_PAIR: &str = "EURUSD";
pub const DEFAULT_MODEL_VERSION: &str = "7.0.3";

#[derive(Debug, Clone, PartialEq)]
pub struct TradingState {
    /// Newest first
    pub signals: Vec<TradingSignal>,
    pub active_pair: String,
    pub available_pairs: Vec<CurrencyPair>,
    /// Oldest first
    pub market_data: Vec<MarketData>,
    pub timeframe: Timeframe,
    /// Version stamped on generated signals
    pub model_version: String,
    /// Requests currently awaiting the backend
    pub in_flight: u32,
    pub error: Option<String>,
}

impl Default for TradingState {
    fn default() -> Self {
        Self {
            signals: Vec::new(),
            active_pair: DEFAULT_PAIR.to_string(),
            available_pairs: Vec::new(),
            market_data: Vec::new(),
            timeframe: Timeframe::default(),
            model_version: DEFAULT_MODEL_VERSION.to_string(),
            in_flight: 0,
            error: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum TradingAction {
    RequestStarted,
    RequestFailed(String),
    SignalsLoaded(Vec<TradingSignal>),
    PairSelected(String),
    TimeframeSelected(Timeframe),
    MarketDataLoaded {
        pair: String,
        timeframe: Timeframe,
        data: Vec<MarketData>,
        pairs: Vec<CurrencyPair>,
    },
    SignalGenerated(TradingSignal),
    ModelVersionChanged(String),
}

impl TradingState {
    pub fn with_selection(pair: &str, timeframe: Timeframe) -> Self {
        Self {
            active_pair: pair.to_string(),
            timeframe,
            ..Default::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Applies one action and returns the resulting state
    pub fn reduce(mut self, action: TradingAction) -> Self {
        match action {
            TradingAction::RequestStarted => {
                self.in_flight += 1;
                self.error = None;
            }
            TradingAction::RequestFailed(message) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.error = Some(message);
            }
            TradingAction::SignalsLoaded(signals) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.signals = signals;
            }
            TradingAction::PairSelected(pair) => {
                self.active_pair = pair;
            }
            TradingAction::TimeframeSelected(timeframe) => {
                self.timeframe = timeframe;
            }
            TradingAction::MarketDataLoaded {
                pair,
                timeframe,
                data,
                pairs,
            } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.market_data = data;
                self.active_pair = pair;
                self.timeframe = timeframe;
                self.available_pairs = pairs;
            }
            TradingAction::SignalGenerated(signal) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.signals.insert(0, signal);
            }
            TradingAction::ModelVersionChanged(version) => {
                self.model_version = version;
            }
        }
        self
    }

    /// Close of the most recent bar
    pub fn last_close(&self) -> Option<Decimal> {
        self.market_data.last().map(|bar| bar.close)
    }

    pub fn find_pair(&self, symbol: &str) -> Option<&CurrencyPair> {
        self.available_pairs.iter().find(|p| p.symbol == symbol)
    }

    pub fn pairs_by_category(&self, filter: PairFilter) -> Vec<&CurrencyPair> {
        self.available_pairs
            .iter()
            .filter(|p| filter.matches(p))
            .collect()
    }
}

/// Owns signals, the pair/timeframe selection and the chart series
pub struct TradingStore {
    state: watch::Sender<TradingState>,
    backend: Arc<dyn TradingBackend>,
}

impl TradingStore {
    pub fn new(backend: Arc<dyn TradingBackend>, initial: TradingState) -> Self {
        let (state, _) = watch::channel(initial);
        Self { state, backend }
    }

    pub fn subscribe(&self) -> watch::Receiver<TradingState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> TradingState {
        self.state.borrow().clone()
    }

    pub fn dispatch(&self, action: TradingAction) {
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = current.reduce(action);
        });
    }

    fn fail(&self, message: &str, err: StoreError) -> StoreError {
        error!("TradingStore: {}: {}", message, err);
        self.dispatch(TradingAction::RequestFailed(message.to_string()));
        err
    }

    /// Replaces the signal list with the backend's
    pub async fn fetch_signals(&self) -> Result<(), StoreError> {
        self.dispatch(TradingAction::RequestStarted);
        match self.backend.fetch_signals().await {
            Ok(signals) => {
                info!("TradingStore: loaded {} signals", signals.len());
                self.dispatch(TradingAction::SignalsLoaded(signals));
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to fetch signals", e.into())),
        }
    }

    /// Loads a fresh series for `pair` and makes it the active selection
    pub async fn fetch_market_data(&self, pair: &str, timeframe: Timeframe) -> Result<(), StoreError> {
        self.dispatch(TradingAction::RequestStarted);

        let loaded = async {
            let data = self.backend.fetch_market_data(pair, timeframe).await?;
            let pairs = self.backend.fetch_pairs().await?;
            Ok::<_, StoreError>((data, pairs))
        }
        .await;

        match loaded {
            Ok((data, pairs)) => {
                info!(
                    "TradingStore: loaded {} bars for {} ({})",
                    data.len(),
                    pair,
                    timeframe
                );
                self.dispatch(TradingAction::MarketDataLoaded {
                    pair: pair.to_string(),
                    timeframe,
                    data,
                    pairs,
                });
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to fetch market data", e)),
        }
    }

    pub async fn set_active_pair(&self, pair: &str) -> Result<(), StoreError> {
        self.dispatch(TradingAction::PairSelected(pair.to_string()));
        let timeframe = self.state.borrow().timeframe;
        self.fetch_market_data(pair, timeframe).await
    }

    pub async fn set_timeframe(&self, timeframe: Timeframe) -> Result<(), StoreError> {
        self.dispatch(TradingAction::TimeframeSelected(timeframe));
        let pair = self.state.borrow().active_pair.clone();
        self.fetch_market_data(&pair, timeframe).await
    }

    pub fn set_model_version(&self, version: &str) {
        self.dispatch(TradingAction::ModelVersionChanged(version.to_string()));
    }

    /// Asks the backend for a signal on the active pair and prepends it.
    /// The pair and latest close are read once inference has finished, so a
    /// pair switch made meanwhile is honoured.
    pub async fn generate_signal(&self) -> Result<(), StoreError> {
        self.dispatch(TradingAction::RequestStarted);

        if let Err(e) = self.backend.run_inference().await {
            return Err(self.fail("Failed to generate signal", e.into()));
        }

        let request = {
            let state = self.state.borrow();
            SignalRequest {
                pair: state.active_pair.clone(),
                last_close: state.last_close(),
                model_version: state.model_version.clone(),
            }
        };

        match self.backend.generate_signal(request).await {
            Ok(signal) => {
                info!(
                    "TradingStore: new {} signal {} on {}",
                    signal.direction, signal.id, signal.pair
                );
                self.dispatch(TradingAction::SignalGenerated(signal));
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to generate signal", e.into())),
        }
    }
}
