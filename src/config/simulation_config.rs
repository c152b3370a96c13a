use crate::infrastructure::simulation::{LatencyModel, NetworkLatency, ZeroLatency};
use std::sync::Arc;

/// Tuning for the in-process mock backends
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationEnvConfig {
    /// Multiplier applied to every base latency; 0 disables waiting
    pub latency_scale: f64,
    pub jitter_ms: u64,
    /// Fixed RNG seed for reproducible market data and signals
    pub seed: Option<u64>,
}

impl Default for SimulationEnvConfig {
    fn default() -> Self {
        Self {
            latency_scale: 1.0,
            jitter_ms: 0,
            seed: None,
        }
    }
}

impl SimulationEnvConfig {
    pub fn from_source<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let latency_scale = get("SIMULATION_LATENCY_SCALE")
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(1.0);

        let jitter_ms = get("SIMULATION_JITTER_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        let seed = get("SIMULATION_SEED").and_then(|v| v.parse().ok());

        Self {
            latency_scale,
            jitter_ms,
            seed,
        }
    }

    pub fn latency_model(&self) -> Arc<dyn LatencyModel> {
        if self.latency_scale == 0.0 && self.jitter_ms == 0 {
            Arc::new(ZeroLatency)
        } else {
            Arc::new(NetworkLatency::new(self.latency_scale, self.jitter_ms))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::simulation::BackendCall;
    use std::time::Duration;

    #[test]
    fn test_defaults_when_unset() {
        let config = SimulationEnvConfig::from_source(|_| None);
        assert_eq!(config, SimulationEnvConfig::default());
    }

    #[test]
    fn test_parses_values() {
        let config = SimulationEnvConfig::from_source(|key| match key {
            "SIMULATION_LATENCY_SCALE" => Some("0.25".to_string()),
            "SIMULATION_JITTER_MS" => Some("15".to_string()),
            "SIMULATION_SEED" => Some("1234".to_string()),
            _ => None,
        });
        assert_eq!(config.latency_scale, 0.25);
        assert_eq!(config.jitter_ms, 15);
        assert_eq!(config.seed, Some(1234));
    }

    #[test]
    fn test_rejects_negative_scale() {
        let config = SimulationEnvConfig::from_source(|key| {
            (key == "SIMULATION_LATENCY_SCALE").then(|| "-3".to_string())
        });
        assert_eq!(config.latency_scale, 1.0);
    }

    #[test]
    fn test_zero_scale_disables_latency() {
        let config = SimulationEnvConfig {
            latency_scale: 0.0,
            ..Default::default()
        };
        let model = config.latency_model();
        assert_eq!(model.next_latency(BackendCall::FinishEvolution), Duration::ZERO);
    }
}
