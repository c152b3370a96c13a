use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One layer of a model architecture. Only the fields relevant to the
/// layer kind are populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModelLayer {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropout: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel_size: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_size: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heads: Option<u32>,
    pub parameters: u64,
}

impl ModelLayer {
    pub fn lstm(units: u32, parameters: u64) -> Self {
        Self {
            kind: "LSTM".to_string(),
            units: Some(units),
            activation: Some("tanh".to_string()),
            parameters,
            ..Default::default()
        }
    }

    pub fn dense(units: u32, activation: &str, parameters: u64) -> Self {
        Self {
            kind: "Dense".to_string(),
            units: Some(units),
            activation: Some(activation.to_string()),
            parameters,
            ..Default::default()
        }
    }

    pub fn dropout(rate: f64) -> Self {
        Self {
            kind: "Dropout".to_string(),
            dropout: Some(rate),
            parameters: 0,
            ..Default::default()
        }
    }
}

/// Aggregate backtest metrics attached to a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModelPerformance {
    pub accuracy: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub total_trades: u32,
    pub successful_trades: u32,
    pub failed_trades: u32,
    pub average_profit: f64,
    pub improvement_from_previous: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelArchitecture {
    pub id: String,
    pub version: String,
    pub layers: Vec<ModelLayer>,
    pub created_at: DateTime<Utc>,
    pub performance: ModelPerformance,
    pub is_active: bool,
}

impl ModelArchitecture {
    pub fn total_parameters(&self) -> u64 {
        self.layers.iter().map(|l| l.parameters).sum()
    }

    /// Generation number parsed from ids shaped like `model-gen-7`
    pub fn generation(&self) -> Option<u32> {
        self.id
            .rsplit_once("-gen-")
            .and_then(|(_, generation)| generation.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(id: &str) -> ModelArchitecture {
        ModelArchitecture {
            id: id.to_string(),
            version: "1.0.0".to_string(),
            layers: vec![
                ModelLayer::lstm(128, 66560),
                ModelLayer::dropout(0.2),
                ModelLayer::dense(3, "softmax", 99),
            ],
            created_at: Utc::now(),
            performance: ModelPerformance::default(),
            is_active: false,
        }
    }

    #[test]
    fn test_total_parameters() {
        assert_eq!(model("model-gen-1").total_parameters(), 66659);
    }

    #[test]
    fn test_generation() {
        assert_eq!(model("model-gen-7").generation(), Some(7));
        assert_eq!(model("model-gen-12").generation(), Some(12));
        assert_eq!(model("baseline").generation(), None);
    }

    #[test]
    fn test_layer_json_omits_unused_fields() {
        let value = serde_json::to_value(ModelLayer::dropout(0.1)).unwrap();
        assert_eq!(value["type"], "Dropout");
        assert_eq!(value["parameters"], 0);
        assert!(value.get("units").is_none());
        assert!(value.get("activation").is_none());
    }
}
