// Store wiring shared by every view
pub mod context;

// Trading, model and UI state
pub mod stores;

pub use context::AppContext;
