use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Add,
    Remove,
    Modify,
}

/// What caused an evolution run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvolutionTrigger {
    Scheduled,
    Performance,
    Manual,
}

impl fmt::Display for EvolutionTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvolutionTrigger::Scheduled => write!(f, "scheduled"),
            EvolutionTrigger::Performance => write!(f, "performance"),
            EvolutionTrigger::Manual => write!(f, "manual"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureChange {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_index: Option<usize>,
    pub description: String,
    pub impact: f64,
}

impl ArchitectureChange {
    pub fn new(kind: ChangeKind, layer_index: usize, description: &str, impact: f64) -> Self {
        Self {
            kind,
            layer_index: Some(layer_index),
            description: description.to_string(),
            impact,
        }
    }
}

/// A recorded step from one model generation to the next.
/// Model ids are stored by value; nothing checks they still exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub previous_model_id: String,
    pub new_model_id: String,
    pub performance_improvement: f64,
    pub architecture_changes: Vec<ArchitectureChange>,
    pub trigger: EvolutionTrigger,
}

impl EvolutionEvent {
    /// Sum of the per-change impact estimates
    pub fn total_change_impact(&self) -> f64 {
        self.architecture_changes.iter().map(|c| c.impact).sum()
    }
}

/// Progress of the evolution simulation: `Idle -> InProgress(0..=100) -> Idle`.
/// A run that errors out parks in `Failed` until the next one starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvolutionPhase {
    #[default]
    Idle,
    InProgress { progress: u8 },
    Failed { progress: u8 },
}

impl EvolutionPhase {
    pub fn is_running(&self) -> bool {
        matches!(self, EvolutionPhase::InProgress { .. })
    }
}
