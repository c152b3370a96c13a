// Market analysis domain
pub mod timeframe;
