//! Cooking Assistant - guided recipe steps with per-step countdown timers
//! 
//! This is the main entry point for the cooking-assistant application.

use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use cooking_assistant::{
    config::Config,
    recipe::load_recipe,
    services::build_alarm,
    state::{AppState, CookingSession},
    api::create_router,
    tasks::run_terminal,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level; stderr keeps stdout free for the card
    tracing_subscriber::fmt()
        .with_env_filter(format!("cooking_assistant={},tower_http=info", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting cooking-assistant v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: recipe={}, alarm={:?}, interactive={}",
          config.recipe.display(), config.alarm, config.interactive);

    let recipe = load_recipe(&config.recipe)
        .await
        .with_context(|| format!("Failed to load recipe {}", config.recipe.display()))?;
    let alarm = build_alarm(&config).context("Failed to set up alarm")?;
    let session = CookingSession::new(recipe, alarm)?;

    // Create application state
    let state = Arc::new(AppState::new(
        session,
        config.host.clone(),
        config.port,
        config.tick_period(),
    ));

    if config.interactive {
        tokio::select! {
            result = run_terminal(Arc::clone(&state)) => {
                result.context("Terminal session failed")?;
            }
            _ = shutdown_signal() => {
                info!("Shutdown signal received");
            }
        }
        return Ok(());
    }

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /action                - Start, pause, resume or finish the active step");
    info!("  POST /steps/:number/activate - Jump to a step");
    info!("  POST /restart               - Start the recipe over");
    info!("  GET  /steps                 - Every step as currently drawn");
    info!("  GET  /steps/active          - The active step's card");
    info!("  GET  /status                - Session and timer status");
    info!("  GET  /health                - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
