//! evosignal command line
//!
//! Drives the dashboard stores against the simulated backends and prints
//! what the pages would show.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use evosignal::application::AppContext;
use evosignal::config::Config;
use evosignal::domain::market::timeframe::Timeframe;
use evosignal::domain::ml::evolution::EvolutionEvent;
use evosignal::domain::ml::model::ModelArchitecture;
use evosignal::domain::performance::analytics::PerformanceReport;
use evosignal::domain::settings::{Language, SettingsPatch, Theme, UserSettings};
use evosignal::domain::trading::pair::PairFilter;
use evosignal::domain::trading::types::{MarketData, TradingSignal};
use evosignal::interfaces::view_models::{
    DashboardViewModel, EvolutionViewModel, PairSelectorView, PerformanceViewModel, SignalsView,
};
use serde::Serialize;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Self-evolving forex signal dashboard (simulated)", long_about = None)]
struct Cli {
    /// Skip simulated backend latency
    #[arg(long, global = true)]
    instant: bool,

    /// Seed for reproducible market data and signals
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dashboard, generate signals and print every page
    Demo {
        /// Pair to select (e.g. EURUSD)
        #[arg(short, long)]
        pair: Option<String>,

        /// Chart timeframe (1D, 4H, 1H, 15M)
        #[arg(short, long)]
        timeframe: Option<String>,

        /// Number of signals to generate
        #[arg(short, long, default_value = "2")]
        signals: usize,

        /// Pair selector filter (all, major, minor, exotic)
        #[arg(long, default_value = "all")]
        filter: String,
    },
    /// Run one or more evolution cycles and print the timeline
    Evolve {
        #[arg(short, long, default_value = "1")]
        runs: usize,
    },
    /// Print the loaded state as JSON
    Snapshot {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        #[arg(long)]
        theme: Option<String>,

        #[arg(long)]
        language: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    active_pair: String,
    timeframe: Timeframe,
    signals: Vec<TradingSignal>,
    market_data: Vec<MarketData>,
    models: Vec<ModelArchitecture>,
    evolution_history: Vec<EvolutionEvent>,
    settings: UserSettings,
    performance: PerformanceReport,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if cli.instant {
        config.simulation.latency_scale = 0.0;
        config.simulation.jitter_ms = 0;
    }
    if cli.seed.is_some() {
        config.simulation.seed = cli.seed;
    }

    let ctx = AppContext::with_mocks(config);
    info!("Loading dashboard...");
    ctx.bootstrap().await.context("Initial dashboard load failed")?;

    match cli.command {
        Commands::Demo {
            pair,
            timeframe,
            signals,
            filter,
        } => run_demo(&ctx, pair, timeframe, signals, &filter).await,
        Commands::Evolve { runs } => run_evolve(&ctx, runs).await,
        Commands::Snapshot {
            output,
            theme,
            language,
        } => run_snapshot(&ctx, output, theme, language).await,
    }
}

async fn run_demo(
    ctx: &AppContext,
    pair: Option<String>,
    timeframe: Option<String>,
    signals: usize,
    filter: &str,
) -> Result<()> {
    if let Some(tf) = timeframe {
        let tf = Timeframe::from_str(&tf).context("Invalid --timeframe")?;
        ctx.trading.set_timeframe(tf).await?;
    }
    if let Some(pair) = pair {
        ctx.trading.set_active_pair(&pair.to_uppercase()).await?;
    }
    for _ in 0..signals {
        ctx.trading.generate_signal().await?;
    }

    let trading = ctx.trading.snapshot();
    let models = ctx.models.snapshot();

    println!("\n{}", "=".repeat(80));
    println!("DASHBOARD  {} ({})", trading.active_pair, trading.timeframe);
    println!("{}", "=".repeat(80));

    if let Some(view) = DashboardViewModel::build(&trading, &models) {
        for metric in &view.key_metrics {
            println!("{:<24} {:>10}   {}", metric.label_key, metric.value, metric.detail);
        }
        println!("\nModels:");
        for model in &view.models {
            let marker = if model.is_active { "*" } else { " " };
            println!(
                " {} gen {:<4} v{:<8} {}  {}  {}",
                marker, model.generation, model.version, model.created, model.improvement, model.trades
            );
        }
        println!(
            "\nSignals: {} new, {} active, {} closed",
            view.signal_counts.new, view.signal_counts.active, view.signal_counts.closed
        );
    }

    let signals_view = SignalsView::build(&trading.signals);
    for (title, cards) in [
        ("New", &signals_view.new),
        ("Active", &signals_view.active),
        ("Closed", &signals_view.closed),
    ] {
        println!("\n{} signals:", title);
        for card in cards.iter() {
            println!(
                "  {:<8} {:<4} entry {}  TP {}  SL {}  {}  {}",
                card.pair,
                card.direction,
                card.entry,
                card.take_profit,
                card.stop_loss,
                card.confidence,
                card.profit_loss.as_deref().unwrap_or(""),
            );
        }
    }

    if let Some(last) = trading.market_data.last() {
        println!(
            "\nLast bar {}: O {} H {} L {} C {} (vol {})",
            last.timestamp.format("%Y-%m-%d %H:%M"),
            last.open,
            last.high,
            last.low,
            last.close,
            last.volume
        );
    }

    let filter = PairFilter::from_str(filter)?;
    let selector = PairSelectorView::build(&trading, filter);
    println!("\nPairs ({} shown):", selector.options.len());
    for option in &selector.options {
        let marker = if option.is_active { "*" } else { " " };
        println!(" {} {:<8} {:<7} spread {}", marker, option.label, option.category, option.spread);
    }

    let report = ctx.performance_report().await?;
    let perf = PerformanceViewModel::build(&report, models.active_model.as_ref());
    println!("\nPerformance:");
    println!("  return {}  drawdown {}  success {}", perf.total_return, perf.equity_drawdown, perf.overall_success_rate);
    if let Some(window) = &perf.best_window {
        println!("  best window {}", window);
    }
    for row in &perf.pair_rows {
        println!("  {:<8} win {:>4}  {:>4} trades  {:>5} pips", row.pair, row.win_rate, row.trades, row.pips);
    }
    println!();
    Ok(())
}

async fn run_evolve(ctx: &AppContext, runs: usize) -> Result<()> {
    for run in 1..=runs {
        let mut rx = ctx.models.subscribe();
        let watcher = tokio::spawn(async move {
            let mut last = None;
            while rx.changed().await.is_ok() {
                let (running, progress) = {
                    let state = rx.borrow_and_update();
                    (state.is_evolution_in_progress, state.evolution_progress)
                };
                if running && last != Some(progress) {
                    println!("  evolving... {:>3}%", progress);
                    last = Some(progress);
                }
            }
        });

        println!("Evolution run {}/{}", run, runs);
        let result = ctx.trigger_evolution().await;
        watcher.abort();
        let model = result?;
        println!("  -> {} (v{}) is now active", model.id, model.version);
    }

    let view = EvolutionViewModel::build(&ctx.models.snapshot());
    println!("\nTimeline:");
    for entry in &view.timeline {
        println!(
            "  {}  {}  {} -> {}  {}  [{}]",
            entry.timestamp,
            entry.title,
            entry.from_generation,
            entry.to_generation,
            entry.improvement,
            entry.trigger_key
        );
        for change in &entry.changes {
            println!(
                "      {:<6} {:<8} {} ({})",
                change.kind,
                change.layer.as_deref().unwrap_or("-"),
                change.description,
                change.impact
            );
        }
    }
    println!("\nComparison:");
    for row in &view.comparison {
        let marker = if row.is_active { "*" } else { " " };
        println!(
            " {} gen {:<4} v{:<8} win {}  PF {}  sharpe {}",
            marker, row.generation, row.version, row.win_rate, row.profit_factor, row.sharpe_ratio
        );
    }
    Ok(())
}

async fn run_snapshot(
    ctx: &AppContext,
    output: Option<String>,
    theme: Option<String>,
    language: Option<String>,
) -> Result<()> {
    let patch = SettingsPatch {
        theme: theme.as_deref().map(Theme::from_str).transpose()?,
        language: language.as_deref().map(Language::from_str).transpose()?,
        ..Default::default()
    };
    ctx.ui.update_settings(patch);

    let trading = ctx.trading.snapshot();
    let models = ctx.models.snapshot();
    let snapshot = Snapshot {
        active_pair: trading.active_pair,
        timeframe: trading.timeframe,
        signals: trading.signals,
        market_data: trading.market_data,
        models: models.models,
        evolution_history: models.evolution_history,
        settings: ctx.ui.snapshot().settings,
        performance: ctx.performance_report().await?,
    };

    let json = serde_json::to_string_pretty(&snapshot)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path))?;
            info!("Snapshot written to {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
