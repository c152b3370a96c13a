use rand::Rng;
use std::time::Duration;

/// Backend calls whose network latency is simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendCall {
    FetchSignals,
    FetchPairs,
    FetchMarketData,
    GenerateSignal,
    FetchModels,
    FetchEvolutionHistory,
    EvolutionStep,
    FinishEvolution,
    FetchPerformance,
}

impl BackendCall {
    /// Nominal round trip of the call in milliseconds
    pub fn base_latency_ms(&self) -> u64 {
        match self {
            BackendCall::FetchSignals => 800,
            BackendCall::FetchPairs => 0,
            BackendCall::FetchMarketData => 600,
            BackendCall::GenerateSignal => 1200,
            BackendCall::FetchModels => 800,
            BackendCall::FetchEvolutionHistory => 600,
            BackendCall::EvolutionStep => 500,
            BackendCall::FinishEvolution => 1000,
            BackendCall::FetchPerformance => 400,
        }
    }
}

/// Trait defining a network latency simulation model.
pub trait LatencyModel: Send + Sync {
    /// Returns the duration to wait before the call resolves.
    fn next_latency(&self, call: BackendCall) -> Duration;
}

/// Nominal latency scaled by a factor, plus random jitter.
#[derive(Debug, Clone)]
pub struct NetworkLatency {
    scale: f64,
    jitter_ms: u64,
}

impl NetworkLatency {
    pub fn new(scale: f64, jitter_ms: u64) -> Self {
        Self {
            scale: scale.max(0.0),
            jitter_ms,
        }
    }
}

impl Default for NetworkLatency {
    fn default() -> Self {
        Self::new(1.0, 0)
    }
}

impl LatencyModel for NetworkLatency {
    fn next_latency(&self, call: BackendCall) -> Duration {
        let base = (call.base_latency_ms() as f64 * self.scale).round() as i64;
        if base == 0 {
            return Duration::ZERO;
        }

        let jitter = if self.jitter_ms > 0 {
            let mut rng = rand::rng();
            rng.random_range(-(self.jitter_ms as i64)..=(self.jitter_ms as i64))
        } else {
            0
        };

        let ms = (base + jitter).max(0) as u64;
        Duration::from_millis(ms)
    }
}

/// Zero latency model (instant resolution) for tests or pure logic verification.
pub struct ZeroLatency;

impl LatencyModel for ZeroLatency {
    fn next_latency(&self, _call: BackendCall) -> Duration {
        Duration::ZERO
    }
}

/// Suspends for the simulated latency of `call`
pub async fn simulate(model: &dyn LatencyModel, call: BackendCall) {
    let latency = model.next_latency(call);
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_latency() {
        let model = NetworkLatency::default();
        assert_eq!(
            model.next_latency(BackendCall::GenerateSignal),
            Duration::from_millis(1200)
        );
        assert_eq!(
            model.next_latency(BackendCall::EvolutionStep),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_network_latency_range() {
        let model = NetworkLatency::new(0.1, 10);
        for _ in 0..100 {
            let lat = model.next_latency(BackendCall::FetchSignals).as_millis() as u64;
            assert!(
                (70..=90).contains(&lat),
                "Latency {} out of bounds [70, 90]",
                lat
            );
        }
    }

    #[test]
    fn test_zero_scale_skips_jitter() {
        let model = NetworkLatency::new(0.0, 50);
        assert_eq!(model.next_latency(BackendCall::FetchModels), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_zero_latency_resolves_immediately() {
        let start = std::time::Instant::now();
        simulate(&ZeroLatency, BackendCall::FinishEvolution).await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
