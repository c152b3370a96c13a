//! Configuration loaded from environment variables (and `.env` via dotenvy
//! in the binary), split by concern: simulation tuning and UI defaults.

mod simulation_config;
mod ui_config;

pub use simulation_config::SimulationEnvConfig;
pub use ui_config::UiEnvConfig;

use crate::domain::market::timeframe::Timeframe;
use crate::domain::settings::UserSettings;
use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub simulation: SimulationEnvConfig,
    pub ui: UiEnvConfig,
    pub settings: UserSettings,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| env::var(key).ok())
    }

    pub fn from_source<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let simulation = SimulationEnvConfig::from_source(&get);
        let ui = UiEnvConfig::from_source(&get).context("Failed to load UI config")?;

        Ok(Self {
            simulation,
            ui,
            settings: UserSettings::default(),
        })
    }

    pub fn default_pair(&self) -> &str {
        &self.ui.default_pair
    }

    pub fn default_timeframe(&self) -> Timeframe {
        self.ui.default_timeframe
    }

    /// Config for tests and demos: no waiting, fixed seed
    pub fn instant(seed: u64) -> Self {
        Self {
            simulation: SimulationEnvConfig {
                latency_scale: 0.0,
                jitter_ms: 0,
                seed: Some(seed),
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composes_sub_configs() {
        let config = Config::from_source(|key| match key {
            "SIMULATION_SEED" => Some("99".to_string()),
            "DEFAULT_PAIR" => Some("USDJPY".to_string()),
            "DEFAULT_TIMEFRAME" => Some("15m".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.simulation.seed, Some(99));
        assert_eq!(config.default_pair(), "USDJPY");
        assert_eq!(config.default_timeframe(), Timeframe::FifteenMin);
        assert_eq!(config.settings, UserSettings::default());
    }

    #[test]
    fn test_bad_timeframe_fails_with_context() {
        let err = Config::from_source(|key| {
            (key == "DEFAULT_TIMEFRAME").then(|| "weekly".to_string())
        })
        .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load UI config"));
    }
}
