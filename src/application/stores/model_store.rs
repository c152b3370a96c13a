use crate::domain::errors::StoreError;
use crate::domain::ml::evolution::{EvolutionEvent, EvolutionPhase};
use crate::domain::ml::model::ModelArchitecture;
use crate::domain::ports::{EvolutionOutcome, ModelBackend};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Number of progress ticks in an evolution run (0, 10, ..., 100)
pub const EVOLUTION_STEPS: u8 = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelState {
    pub models: Vec<ModelArchitecture>,
    pub active_model: Option<ModelArchitecture>,
    /// Newest first
    pub evolution_history: Vec<EvolutionEvent>,
    pub is_evolution_in_progress: bool,
    /// Last reported progress; survives a failed run
    pub evolution_progress: u8,
    /// Set when the last evolution run errored; fetch failures leave it alone
    pub evolution_failed: bool,
    pub in_flight: u32,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ModelAction {
    RequestStarted,
    RequestFailed(String),
    ModelsLoaded(Vec<ModelArchitecture>),
    ActiveModelSelected(String),
    HistoryLoaded(Vec<EvolutionEvent>),
    EvolutionStarted,
    EvolutionProgressed(u8),
    EvolutionCompleted(EvolutionOutcome),
    EvolutionFailed(String),
}

impl ModelState {
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn phase(&self) -> EvolutionPhase {
        let progress = self.evolution_progress;
        if self.is_evolution_in_progress {
            EvolutionPhase::InProgress { progress }
        } else if self.evolution_failed {
            EvolutionPhase::Failed { progress }
        } else {
            EvolutionPhase::Idle
        }
    }

    pub fn find_model(&self, id: &str) -> Option<&ModelArchitecture> {
        self.models.iter().find(|m| m.id == id)
    }

    /// Generation number the next evolved model will carry
    pub fn next_generation(&self) -> u32 {
        self.models
            .iter()
            .filter_map(|m| m.generation())
            .max()
            .unwrap_or(0)
            + 1
    }

    fn activate(&mut self, id: &str) {
        for model in &mut self.models {
            model.is_active = model.id == id;
        }
        self.active_model = self.find_model(id).cloned();
    }

    pub fn reduce(mut self, action: ModelAction) -> Self {
        match action {
            ModelAction::RequestStarted => {
                self.in_flight += 1;
                self.error = None;
            }
            ModelAction::RequestFailed(message) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.error = Some(message);
            }
            ModelAction::ModelsLoaded(models) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                let active_id = models
                    .iter()
                    .find(|m| m.is_active)
                    .or_else(|| models.first())
                    .map(|m| m.id.clone());
                self.models = models;
                match active_id {
                    Some(id) => self.activate(&id),
                    None => self.active_model = None,
                }
            }
            ModelAction::ActiveModelSelected(id) => {
                if self.find_model(&id).is_some() {
                    self.activate(&id);
                }
            }
            ModelAction::HistoryLoaded(history) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.evolution_history = history;
            }
            ModelAction::EvolutionStarted => {
                self.is_evolution_in_progress = true;
                self.evolution_failed = false;
                self.evolution_progress = 0;
                self.error = None;
            }
            ModelAction::EvolutionProgressed(progress) => {
                self.evolution_progress = progress.min(100);
            }
            ModelAction::EvolutionCompleted(EvolutionOutcome { model, event }) => {
                let id = model.id.clone();
                self.models.insert(0, model);
                self.activate(&id);
                self.evolution_history.insert(0, event);
                self.is_evolution_in_progress = false;
                self.evolution_failed = false;
                self.evolution_progress = 100;
            }
            ModelAction::EvolutionFailed(message) => {
                self.is_evolution_in_progress = false;
                self.evolution_failed = true;
                self.error = Some(message);
            }
        }
        self
    }
}

/// Owns the model registry, the active model and the evolution history
pub struct ModelStore {
    state: watch::Sender<ModelState>,
    backend: Arc<dyn ModelBackend>,
}

impl ModelStore {
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        let (state, _) = watch::channel(ModelState::default());
        Self { state, backend }
    }

    pub fn subscribe(&self) -> watch::Receiver<ModelState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ModelState {
        self.state.borrow().clone()
    }

    pub fn dispatch(&self, action: ModelAction) {
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = current.reduce(action);
        });
    }

    pub async fn fetch_models(&self) -> Result<(), StoreError> {
        self.dispatch(ModelAction::RequestStarted);
        match self.backend.fetch_models().await {
            Ok(models) => {
                info!("ModelStore: loaded {} models", models.len());
                self.dispatch(ModelAction::ModelsLoaded(models));
                Ok(())
            }
            Err(e) => {
                error!("ModelStore: Failed to fetch models: {}", e);
                self.dispatch(ModelAction::RequestFailed("Failed to fetch models".to_string()));
                Err(e.into())
            }
        }
    }

    /// Makes `id` the single active model. Unknown ids leave the state untouched.
    pub fn set_active_model(&self, id: &str) -> Result<(), StoreError> {
        if self.state.borrow().find_model(id).is_none() {
            warn!("ModelStore: cannot activate unknown model {}", id);
            return Err(StoreError::ModelNotFound { id: id.to_string() });
        }
        info!("ModelStore: activating {}", id);
        self.dispatch(ModelAction::ActiveModelSelected(id.to_string()));
        Ok(())
    }

    pub async fn fetch_evolution_history(&self) -> Result<(), StoreError> {
        self.dispatch(ModelAction::RequestStarted);
        match self.backend.fetch_evolution_history().await {
            Ok(history) => {
                info!("ModelStore: loaded {} evolution events", history.len());
                self.dispatch(ModelAction::HistoryLoaded(history));
                Ok(())
            }
            Err(e) => {
                error!("ModelStore: Failed to fetch evolution history: {}", e);
                self.dispatch(ModelAction::RequestFailed(
                    "Failed to fetch evolution history".to_string(),
                ));
                Err(e.into())
            }
        }
    }

    /// Checks the preconditions and flips the in-progress flag in one commit
    fn begin_evolution(&self) -> Result<ModelArchitecture, StoreError> {
        let mut outcome = Err(StoreError::NoActiveModel);
        self.state.send_if_modified(|state| {
            if state.is_evolution_in_progress {
                outcome = Err(StoreError::EvolutionInProgress);
                return false;
            }
            let Some(active) = state.active_model.clone() else {
                return false;
            };
            outcome = Ok(active);
            *state = std::mem::take(state).reduce(ModelAction::EvolutionStarted);
            true
        });
        outcome
    }

    /// Runs a full evolution: progress 0..=100 in steps of 10, then a new
    /// generation is registered, activated and recorded in the history.
    pub async fn trigger_evolution(&self) -> Result<ModelArchitecture, StoreError> {
        let previous = self.begin_evolution().inspect_err(|e| {
            warn!("ModelStore: evolution not started: {}", e);
        })?;
        info!("ModelStore: evolution started from {}", previous.id);

        match self.run_evolution(&previous).await {
            Ok(outcome) => {
                let model = outcome.model.clone();
                info!(
                    "ModelStore: evolution complete, {} is now active (+{:.1}%)",
                    model.id,
                    outcome.event.performance_improvement * 100.0
                );
                self.dispatch(ModelAction::EvolutionCompleted(outcome));
                Ok(model)
            }
            Err(e) => {
                error!("ModelStore: Evolution process failed: {}", e);
                self.dispatch(ModelAction::EvolutionFailed(
                    "Evolution process failed".to_string(),
                ));
                Err(e)
            }
        }
    }

    async fn run_evolution(&self, previous: &ModelArchitecture) -> Result<EvolutionOutcome, StoreError> {
        for step in 0..=EVOLUTION_STEPS {
            self.backend.evolution_step(step).await?;
            self.dispatch(ModelAction::EvolutionProgressed(step * 10));
        }
        let generation = self.state.borrow().next_generation();
        Ok(self.backend.finish_evolution(previous, generation).await?)
    }
}
