//! Observable state containers. Each store keeps its state in a
//! `tokio::sync::watch` channel and commits through a pure reducer.

pub mod model_store;
pub mod trading_store;
pub mod ui_store;

pub use model_store::{ModelAction, ModelState, ModelStore};
pub use trading_store::{TradingAction, TradingState, TradingStore};
pub use ui_store::{UiAction, UiState, UiStore};
