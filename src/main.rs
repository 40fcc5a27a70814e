//! Visa eligibility consultation server.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use visa_expert::adapters::http::{app, AppState};
use visa_expert::adapters::seed::FileRuleSource;
use visa_expert::application::handlers::analysis::InitializeQuestionPrioritiesCommand;
use visa_expert::application::handlers::consultation::PurgeIdleSessionsCommand;
use visa_expert::application::handlers::rules::{SeedRulesCommand, SeedRulesHandler};
use visa_expert::config::{AppConfig, EngineConfig};
use visa_expert::domain::foundation::CommandMetadata;
use visa_expert::ports::RuleRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    if config.server.environment.is_production() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let state = AppState::in_memory();
    seed(&state, &config.engine).await?;
    let sweeper = tokio::spawn(sweep_idle_sessions(state.clone(), config.engine.clone()));

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "visa expert listening");

    axum::serve(listener, app(state, &config.server))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    tracing::info!("server shut down");
    Ok(())
}

/// Loads the seed rule file, then ranks each seeded category's questions.
async fn seed(state: &AppState, engine: &EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = engine.seed_rules_path.clone() else {
        tracing::info!("no seed rules configured");
        return Ok(());
    };

    SeedRulesHandler::new(Arc::new(FileRuleSource::new()), state.rules.clone())
        .handle(SeedRulesCommand { path }, CommandMetadata::new().with_source("startup"))
        .await?;

    if engine.initialize_priorities {
        let initializer = state.initialize_priorities_handler();
        for category in state.rules.categories().await? {
            if category.is_shared() {
                continue;
            }
            initializer
                .handle(
                    InitializeQuestionPrioritiesCommand { category },
                    CommandMetadata::new().with_source("startup"),
                )
                .await?;
        }
    }
    Ok(())
}

/// Periodically discards consultations idle for longer than the configured
/// timeout. Runs until the server shuts down.
async fn sweep_idle_sessions(state: AppState, engine: EngineConfig) {
    let purge = state.purge_idle_sessions_handler();
    let mut ticker = tokio::time::interval(engine.session_sweep_interval());
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let cmd = PurgeIdleSessionsCommand {
            max_idle: engine.session_idle_timeout(),
        };
        if let Err(e) = purge.handle(cmd, CommandMetadata::new().with_source("sweeper")).await {
            tracing::warn!(error = %e, "idle consultation sweep failed");
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
