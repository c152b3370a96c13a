use crate::domain::market::timeframe::Timeframe;
use anyhow::{Context, Result};
use std::str::FromStr;

/// Initial dashboard selection
#[derive(Debug, Clone, PartialEq)]
pub struct UiEnvConfig {
    pub default_pair: String,
    pub default_timeframe: Timeframe,
}

impl Default for UiEnvConfig {
    fn default() -> Self {
        Self {
            default_pair: "EURUSD".to_string(),
            default_timeframe: Timeframe::OneDay,
        }
    }
}

impl UiEnvConfig {
    pub fn from_source<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_pair = get("DEFAULT_PAIR")
            .map(|v| v.trim().to_uppercase())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "EURUSD".to_string());

        let default_timeframe = match get("DEFAULT_TIMEFRAME") {
            Some(value) => Timeframe::from_str(value.trim())
                .with_context(|| format!("Failed to parse DEFAULT_TIMEFRAME '{}'", value))?,
            None => Timeframe::OneDay,
        };

        Ok(Self {
            default_pair,
            default_timeframe,
        })
    }
}
