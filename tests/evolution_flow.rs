use evosignal::application::AppContext;
use evosignal::application::stores::ModelStore;
use evosignal::config::Config;
use evosignal::domain::errors::StoreError;
use evosignal::domain::ml::evolution::EvolutionTrigger;
use evosignal::infrastructure::MockModelBackend;
use evosignal::infrastructure::simulation::{NetworkLatency, ZeroLatency};
use std::sync::Arc;

#[tokio::test]
async fn test_two_runs_produce_consecutive_generations() -> anyhow::Result<()> {
    let ctx = AppContext::with_mocks(Config::instant(4));
    ctx.bootstrap().await?;

    let first = ctx.trigger_evolution().await?;
    let second = ctx.trigger_evolution().await?;
    assert_eq!(first.id, "model-gen-8");
    assert_eq!(second.id, "model-gen-9");
    assert_eq!(second.version, "9.0.1");

    let state = ctx.models.snapshot();
    let ids: Vec<_> = state.models.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["model-gen-9", "model-gen-8", "model-gen-7", "model-gen-6"]);
    assert_eq!(state.models.iter().filter(|m| m.is_active).count(), 1);
    assert!(state.models[0].is_active);

    let latest = &state.evolution_history[0];
    assert_eq!(latest.id, "evolution-9");
    assert_eq!(latest.previous_model_id, "model-gen-8");
    assert_eq!(latest.trigger, EvolutionTrigger::Manual);
    assert_eq!(state.evolution_history.len(), 4);

    assert_eq!(ctx.trading.snapshot().model_version, "9.0.1");
    Ok(())
}

#[tokio::test]
async fn test_concurrent_trigger_is_rejected() -> anyhow::Result<()> {
    let backend = Arc::new(MockModelBackend::new(Arc::new(NetworkLatency::new(0.002, 0))));
    let store = ModelStore::new(backend);
    store.fetch_models().await?;

    let (a, b) = tokio::join!(store.trigger_evolution(), store.trigger_evolution());
    let results = [a, b];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .any(|r| matches!(r, Err(StoreError::EvolutionInProgress)))
    );

    let state = store.snapshot();
    assert_eq!(state.models.len(), 3);
    assert!(!state.is_evolution_in_progress);
    assert_eq!(state.evolution_progress, 100);
    Ok(())
}

#[tokio::test]
async fn test_progress_is_monotonic_in_tens() -> anyhow::Result<()> {
    let backend = Arc::new(MockModelBackend::new(Arc::new(NetworkLatency::new(0.004, 0))));
    let store = Arc::new(ModelStore::new(backend));
    store.fetch_models().await?;

    let mut rx = store.subscribe();
    let runner = {
        let store = store.clone();
        tokio::spawn(async move { store.trigger_evolution().await })
    };

    let mut seen = Vec::new();
    while rx.changed().await.is_ok() {
        let (running, progress) = {
            let state = rx.borrow_and_update();
            (state.is_evolution_in_progress, state.evolution_progress)
        };
        if !running && progress == 100 {
            break;
        }
        if running {
            seen.push(progress);
        }
    }
    runner.await??;

    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{:?}", seen);
    seen.dedup();
    assert_eq!(seen, [0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
    Ok(())
}

#[tokio::test]
async fn test_failed_run_leaves_registry_intact() -> anyhow::Result<()> {
    let backend = Arc::new(MockModelBackend::new(Arc::new(ZeroLatency)));
    let store = ModelStore::new(backend.clone());
    store.fetch_models().await?;
    store.fetch_evolution_history().await?;

    backend.fail_evolution_at(Some(7));
    tokio_test::assert_err!(store.trigger_evolution().await);

    let state = store.snapshot();
    assert!(!state.is_evolution_in_progress);
    assert_eq!(state.evolution_progress, 60);
    assert_eq!(state.error.as_deref(), Some("Evolution process failed"));
    assert_eq!(state.models.len(), 2);
    assert_eq!(state.evolution_history.len(), 2);

    backend.fail_evolution_at(None);
    let model = store.trigger_evolution().await?;
    assert_eq!(model.id, "model-gen-8");
    assert!(store.snapshot().error.is_none());
    Ok(())
}

#[tokio::test]
async fn test_unknown_model_leaves_state_untouched() -> anyhow::Result<()> {
    let ctx = AppContext::with_mocks(Config::instant(4));
    ctx.fetch_models().await?;
    let before = ctx.models.snapshot();

    let err = ctx.set_active_model("model-gen-99").unwrap_err();
    assert_eq!(
        err,
        StoreError::ModelNotFound {
            id: "model-gen-99".to_string()
        }
    );
    assert_eq!(ctx.models.snapshot(), before);
    assert_eq!(ctx.trading.snapshot().model_version, "7.0.3");
    Ok(())
}
