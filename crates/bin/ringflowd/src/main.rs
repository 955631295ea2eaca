//! # ringflowd — ringflow daemon
//!
//! Composition root that wires all adapters together and starts the
//! server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository and handler implementations (adapters)
//! - Construct application services, injecting adapters via port traits
//! - Start the engine consumer task and the scheduler timers
//! - Build the axum router, bind to a TCP port, and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio::sync::broadcast;

use ringflow_adapter_actions::ProviderConfig;
use ringflow_adapter_http_axum::state::AppState;
use ringflow_adapter_storage_sqlite_sqlx::{
    Config as StorageConfig, SqliteExecutionLogStore, SqliteRuleRepository,
};
use ringflow_app::engine::AutomationEngine;
use ringflow_app::event_bus::InProcessEventBus;
use ringflow_app::gateway::EventGateway;
use ringflow_app::scheduler::Scheduler;
use ringflow_app::services::rule_service::RuleService;
use ringflow_app::services::template_service::TemplateService;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&config.logging.filter)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Database
    let db = StorageConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Event bus
    let bus = Arc::new(InProcessEventBus::new(256));

    // Engine: matcher + action registry + execution log, consuming the bus
    let registry = ringflow_adapter_actions::default_registry(&ProviderConfig {
        base_url: config.actions.provider_base_url.clone(),
        timeout: config.action_timeout(),
    })?;
    let engine = Arc::new(AutomationEngine::new(
        SqliteRuleRepository::new(pool.clone()),
        registry,
        SqliteExecutionLogStore::new(pool.clone()),
    ));
    spawn_engine_consumer(engine, bus.subscribe());

    // Scheduler
    let scheduler = Scheduler::new(
        SqliteRuleRepository::new(pool.clone()),
        EventGateway::new(bus.clone()),
    );
    if config.scheduler.enabled {
        scheduler.start();
    } else {
        tracing::info!("scheduler interval jobs disabled by configuration");
    }

    // HTTP
    let state = AppState::new(
        RuleService::new(SqliteRuleRepository::new(pool.clone())),
        TemplateService::new(SqliteRuleRepository::new(pool.clone())),
        SqliteExecutionLogStore::new(pool),
        scheduler,
    );
    let app = ringflow_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(addr = %bind_addr, "ringflowd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Consume the bus and run the pipeline, one task per event, so a slow
/// action in one tenant never delays another tenant's events.
fn spawn_engine_consumer(
    engine: Arc<AutomationEngine<SqliteRuleRepository, SqliteExecutionLogStore>>,
    mut rx: broadcast::Receiver<ringflow_domain::event::Event>,
) {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let engine = Arc::clone(&engine);
                    tokio::spawn(async move {
                        if let Err(err) = engine.process_event(&event).await {
                            tracing::error!(
                                error = %err,
                                event = %event.id,
                                tenant = %event.tenant_id,
                                "automation pipeline failed for event"
                            );
                        }
                    });
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event consumer lagged, events were dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
