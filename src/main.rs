//! Keep Time - independent count-up and count-down status timers
//! 
//! This is the main entry point for the keep-time application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use keep_time::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::status_line_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("keep_time={},tower_http=info", config.log_level()))
        .init();

    info!("Starting keep-time v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, extra timers={}, paused={}",
          config.host, config.port, config.timers.len(), config.paused);

    // Create the timer registry
    let state = Arc::new(AppState::new(config.port, config.host.clone()));

    // Subscribe the status line before any timer can tick
    tokio::spawn(status_line_task(Arc::clone(&state)));

    if !config.no_defaults {
        state.seed_defaults(!config.paused)?;
    }
    for spec in config.timer_specs() {
        state.add_timer(spec)?;
    }
    info!("{} timers ready", state.timer_count());

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /timers            - List timers");
    info!("  POST   /timers            - Add a timer");
    info!("  GET    /timers/:id        - Show one timer");
    info!("  DELETE /timers/:id        - Remove a timer");
    info!("  POST   /timers/:id/toggle - Pause or resume");
    info!("  POST   /timers/:id/start  - Start");
    info!("  POST   /timers/:id/stop   - Stop");
    info!("  POST   /timers/:id/reset  - Reset");
    info!("  GET    /status            - Status of all timers");
    info!("  GET    /health            - Health check");

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

    state.stop_all();
    info!("Server shutdown complete");
    Ok(())
}
