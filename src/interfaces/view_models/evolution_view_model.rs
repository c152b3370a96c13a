use super::format::{fixed, generation_label, pct, signed_pct};
use crate::application::stores::ModelState;
use crate::domain::ml::evolution::{ChangeKind, EvolutionEvent, EvolutionPhase, EvolutionTrigger};

pub const COMPARED_MODELS: usize = 4;

pub struct ChangeLine {
    pub kind: &'static str,
    pub layer: Option<String>,
    pub description: String,
    pub impact: String,
}

pub struct TimelineEntry {
    pub title: String,
    pub trigger_key: &'static str,
    pub timestamp: String,
    pub improvement: String,
    pub from_generation: String,
    pub to_generation: String,
    pub changes: Vec<ChangeLine>,
}

pub struct ComparisonRow {
    pub generation: String,
    pub version: String,
    pub win_rate: String,
    pub profit_factor: String,
    pub sharpe_ratio: String,
    pub is_active: bool,
}

pub struct EvolutionView {
    pub current_generation: Option<String>,
    pub is_running: bool,
    pub progress: u8,
    pub progress_label: String,
    /// The trigger button is disabled while a run is going or nothing is active
    pub can_trigger: bool,
    pub timeline: Vec<TimelineEntry>,
    pub comparison: Vec<ComparisonRow>,
    pub error: Option<String>,
}

fn trigger_key(trigger: EvolutionTrigger) -> &'static str {
    match trigger {
        EvolutionTrigger::Scheduled => "evolution.trigger.scheduled",
        EvolutionTrigger::Performance => "evolution.trigger.performance",
        EvolutionTrigger::Manual => "evolution.trigger.manual",
    }
}

fn timeline_entry(event: &EvolutionEvent) -> TimelineEntry {
    TimelineEntry {
        title: format!("Evolution {}", generation_label(&event.new_model_id)),
        trigger_key: trigger_key(event.trigger),
        timestamp: event.timestamp.format("%Y-%m-%d %H:%M").to_string(),
        improvement: signed_pct(event.performance_improvement, 1),
        from_generation: generation_label(&event.previous_model_id).to_string(),
        to_generation: generation_label(&event.new_model_id).to_string(),
        changes: event
            .architecture_changes
            .iter()
            .map(|change| ChangeLine {
                kind: match change.kind {
                    ChangeKind::Add => "ADD",
                    ChangeKind::Remove => "REMOVE",
                    ChangeKind::Modify => "MODIFY",
                },
                layer: change.layer_index.map(|i| format!("Layer {}", i)),
                description: change.description.clone(),
                impact: signed_pct(change.impact, 1),
            })
            .collect(),
    }
}

pub struct EvolutionViewModel;

impl EvolutionViewModel {
    pub fn build(state: &ModelState) -> EvolutionView {
        let progress_label = match state.phase() {
            EvolutionPhase::InProgress { progress } => format!("Evolving... {}%", progress),
            EvolutionPhase::Failed { progress } => format!("Stopped at {}%", progress),
            EvolutionPhase::Idle => "Idle".to_string(),
        };

        EvolutionView {
            current_generation: state
                .active_model
                .as_ref()
                .map(|m| generation_label(&m.id).to_string()),
            is_running: state.is_evolution_in_progress,
            progress: state.evolution_progress,
            progress_label,
            can_trigger: !state.is_evolution_in_progress && state.active_model.is_some(),
            timeline: state.evolution_history.iter().map(timeline_entry).collect(),
            comparison: state
                .models
                .iter()
                .take(COMPARED_MODELS)
                .map(|m| ComparisonRow {
                    generation: generation_label(&m.id).to_string(),
                    version: m.version.clone(),
                    win_rate: pct(m.performance.win_rate, 1),
                    profit_factor: fixed(m.performance.profit_factor, 2),
                    sharpe_ratio: fixed(m.performance.sharpe_ratio, 2),
                    is_active: m.is_active,
                })
                .collect(),
            error: state.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::stores::ModelAction;
    use crate::infrastructure::mock_data;

    fn loaded() -> ModelState {
        ModelState::default()
            .reduce(ModelAction::RequestStarted)
            .reduce(ModelAction::ModelsLoaded(mock_data::models()))
            .reduce(ModelAction::RequestStarted)
            .reduce(ModelAction::HistoryLoaded(mock_data::evolution_history()))
    }

    #[test]
    fn test_timeline_entries() {
        let view = EvolutionViewModel::build(&loaded());

        assert_eq!(view.timeline.len(), 2);
        let latest = &view.timeline[0];
        assert_eq!(latest.title, "Evolution 7");
        assert_eq!(latest.trigger_key, "evolution.trigger.performance");
        assert_eq!(latest.improvement, "+8.0%");
        assert_eq!(latest.from_generation, "6");
        assert_eq!(latest.changes.len(), 3);
        assert_eq!(latest.changes[0].kind, "MODIFY");
        assert_eq!(latest.changes[0].impact, "+4.0%");
        assert_eq!(latest.changes[1].layer.as_deref(), Some("Layer 4"));
    }

    #[test]
    fn test_comparison_and_trigger_state() {
        let state = loaded();
        let view = EvolutionViewModel::build(&state);
        assert_eq!(view.current_generation.as_deref(), Some("7"));
        assert!(view.can_trigger);
        assert_eq!(view.progress_label, "Idle");
        assert_eq!(view.comparison[1].win_rate, "65.0%");
        assert_eq!(view.comparison[1].profit_factor, "1.85");

        let running = EvolutionViewModel::build(
            &state
                .reduce(ModelAction::EvolutionStarted)
                .reduce(ModelAction::EvolutionProgressed(40)),
        );
        assert!(!running.can_trigger);
        assert_eq!(running.progress_label, "Evolving... 40%");
    }

    #[test]
    fn test_failed_run_label() {
        let state = loaded()
            .reduce(ModelAction::EvolutionStarted)
            .reduce(ModelAction::EvolutionProgressed(30))
            .reduce(ModelAction::EvolutionFailed("Evolution process failed".to_string()));
        let view = EvolutionViewModel::build(&state);
        assert_eq!(view.progress_label, "Stopped at 30%");
        assert!(view.can_trigger);
    }

    #[test]
    fn test_fetch_failure_does_not_mark_run_stopped() {
        let state = loaded()
            .reduce(ModelAction::RequestStarted)
            .reduce(ModelAction::RequestFailed("Failed to fetch models".to_string()));
        let view = EvolutionViewModel::build(&state);
        assert_eq!(view.progress_label, "Idle");
        assert_eq!(view.error.as_deref(), Some("Failed to fetch models"));
        assert!(view.can_trigger);

        let retried = EvolutionViewModel::build(
            &loaded()
                .reduce(ModelAction::EvolutionStarted)
                .reduce(ModelAction::EvolutionFailed("Evolution process failed".to_string()))
                .reduce(ModelAction::EvolutionStarted),
        );
        assert_eq!(retried.progress_label, "Evolving... 0%");
    }
}
