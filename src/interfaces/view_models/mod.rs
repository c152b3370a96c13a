//! Page data derived from store snapshots. Everything here is plain data;
//! rendering (and the colour palette behind `Tone`) belongs to the frontend.

pub mod dashboard_view_model;
pub mod evolution_view_model;
pub mod format;
pub mod pair_selector_view_model;
pub mod performance_view_model;
pub mod signal_card;
pub mod signals_view_model;

pub use dashboard_view_model::{DashboardView, DashboardViewModel};
pub use evolution_view_model::{EvolutionView, EvolutionViewModel};
pub use pair_selector_view_model::PairSelectorView;
pub use performance_view_model::{PerformanceView, PerformanceViewModel};
pub use signal_card::{SignalCard, Tone};
pub use signals_view_model::SignalsView;
