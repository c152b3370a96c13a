use evosignal::application::AppContext;
use evosignal::application::stores::{TradingState, TradingStore};
use evosignal::config::Config;
use evosignal::domain::errors::StoreError;
use evosignal::domain::market::timeframe::Timeframe;
use evosignal::domain::settings::{Language, SettingsPatch, Theme};
use evosignal::domain::trading::types::SignalStatus;
use evosignal::infrastructure::MockTradingBackend;
use evosignal::infrastructure::simulation::{NetworkLatency, ZeroLatency};
use std::collections::HashSet;
use std::sync::Arc;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn test_dashboard_load_and_signal_generation() -> anyhow::Result<()> {
    init_logging();
    let ctx = AppContext::with_mocks(Config::instant(17));
    ctx.bootstrap().await?;

    ctx.trading.generate_signal().await?;
    let state = ctx.trading.snapshot();

    assert_eq!(state.signals.len(), 4);
    let newest = &state.signals[0];
    assert_eq!(newest.status, SignalStatus::New);
    assert_eq!(newest.pair, "EURUSD");
    assert_eq!(Some(newest.entry_price), state.last_close());
    assert!(newest.has_consistent_levels());
    assert_eq!(state.signals[1].id, "signal-001");
    Ok(())
}

#[tokio::test]
async fn test_timeframe_switch_replaces_series() -> anyhow::Result<()> {
    let ctx = AppContext::with_mocks(Config::instant(5));
    ctx.bootstrap().await?;
    assert_eq!(ctx.trading.snapshot().market_data.len(), 31);

    for (timeframe, bars) in [
        (Timeframe::FourHour, 11),
        (Timeframe::OneHour, 6),
        (Timeframe::FifteenMin, 3),
    ] {
        ctx.trading.set_timeframe(timeframe).await?;
        let state = ctx.trading.snapshot();
        assert_eq!(state.market_data.len(), bars);
        let step = state.market_data[1].timestamp - state.market_data[0].timestamp;
        assert_eq!(step.num_minutes(), timeframe.to_minutes() as i64);
        for bar in &state.market_data {
            assert!(bar.low <= bar.open && bar.open <= bar.high);
            assert!(bar.low <= bar.close && bar.close <= bar.high);
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_concurrent_signal_generation() -> anyhow::Result<()> {
    init_logging();
    // Real (scaled down) latency so the two requests actually overlap
    let backend = Arc::new(MockTradingBackend::new(
        Arc::new(NetworkLatency::new(0.01, 0)),
        Some(8),
    ));
    let store = TradingStore::new(backend, TradingState::default());

    let mut rx = store.subscribe();
    let (a, b) = tokio::join!(store.generate_signal(), store.generate_signal());
    tokio_test::assert_ok!(a);
    tokio_test::assert_ok!(b);

    let state = store.snapshot();
    assert_eq!(state.signals.len(), 2);
    let ids: HashSet<_> = state.signals.iter().map(|s| s.id.clone()).collect();
    assert_eq!(ids.len(), 2);
    assert!(!state.is_loading());
    assert!(rx.has_changed()?);
    assert!(!rx.borrow_and_update().is_loading());
    Ok(())
}

#[tokio::test]
async fn test_failure_is_recorded_and_not_rolled_back() -> anyhow::Result<()> {
    let backend = Arc::new(MockTradingBackend::new(Arc::new(ZeroLatency), Some(2)));
    let store = TradingStore::new(backend.clone(), TradingState::default());
    store.fetch_signals().await?;

    backend.set_unavailable(true);
    let err = store.set_timeframe(Timeframe::OneHour).await.unwrap_err();
    assert!(matches!(err, StoreError::Backend(_)));

    let state = store.snapshot();
    assert_eq!(state.timeframe, Timeframe::OneHour);
    assert_eq!(state.signals.len(), 3);
    assert!(state.market_data.is_empty());
    assert_eq!(state.error.as_deref(), Some("Failed to fetch market data"));
    assert!(!state.is_loading());

    backend.set_unavailable(false);
    store.fetch_signals().await?;
    assert!(store.snapshot().error.is_none());
    Ok(())
}

#[tokio::test]
async fn test_ui_preferences_single_source() {
    let ctx = AppContext::with_mocks(Config::instant(1));

    ctx.ui.update_settings(SettingsPatch {
        theme: Some(Theme::Light),
        language: Some(Language::Ar),
        risk_tolerance: Some(1.7),
        ..Default::default()
    });
    let state = ctx.ui.snapshot();
    assert_eq!(state.theme(), Theme::Light);
    assert_eq!(state.language(), Language::Ar);
    assert_eq!(state.settings.risk_tolerance, 1.0);

    ctx.ui.set_theme(Theme::Dark);
    assert_eq!(ctx.ui.snapshot().settings.theme, Theme::Dark);

    ctx.ui.toggle_settings();
    ctx.ui.toggle_settings();
    assert!(!ctx.ui.snapshot().is_settings_open);
}
