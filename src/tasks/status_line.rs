//! Status line background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Background task that renders a timer's label every time it changes
pub async fn status_line_task(state: Arc<AppState>) {
    info!("Starting status line task");

    let mut changes = state.subscribe();

    loop {
        match changes.recv().await {
            Ok(id) => match state.timer(id) {
                Ok(view) => {
                    info!(
                        timer = %id,
                        symbol = %view.symbol,
                        color = %view.color,
                        menu = %view.menu_label,
                        "{}",
                        view.status_line()
                    );
                }
                Err(e) => {
                    // Removal races with an in-flight tick
                    debug!("Skipping status line: {}", e);
                }
            },
            Err(RecvError::Lagged(skipped)) => {
                warn!("Status line fell behind, skipped {} updates", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Timer change channel closed, stopping status line task");
                break;
            }
        }
    }
}
