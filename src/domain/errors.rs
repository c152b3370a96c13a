use thiserror::Error;

/// Failures reported by a data backend (mock or remote)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    #[error("Backend unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Invalid pair: {symbol}")]
    InvalidPair { symbol: String },

    #[error("Invalid timeframe: '{value}'. Valid options: 1D, 4H, 1H, 15M")]
    InvalidTimeframe { value: String },
}

/// Errors returned by store actions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Model not found: {id}")]
    ModelNotFound { id: String },

    #[error("An evolution run is already in progress")]
    EvolutionInProgress,

    #[error("No active model to evolve from")]
    NoActiveModel,
}
