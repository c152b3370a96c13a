// Market analysis domain
pub mod market;

// Model registry and evolution domain
pub mod ml;

// Performance analytics domain
pub mod performance;

// Port interfaces
pub mod ports;

// User preferences
pub mod settings;

// Core trading domain
pub mod trading;

// Domain-specific error types
pub mod errors;
