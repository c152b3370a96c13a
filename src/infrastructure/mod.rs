pub mod mock;
pub mod mock_data;
pub mod simulation;

pub use mock::{MockModelBackend, MockPerformanceBackend, MockTradingBackend};
