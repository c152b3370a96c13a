pub mod latency_model;
pub mod market_data_generator;
pub mod signal_generator;

pub use latency_model::{BackendCall, LatencyModel, NetworkLatency, ZeroLatency};
