//! Signal handling for graceful shutdown

use std::sync::Arc;
use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::{info, warn};

use crate::state::AppState;

/// Wait for OS shutdown signals (SIGTERM, SIGINT)
pub async fn os_signal() {
    let mut signals = match Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ]) {
        Ok(signals) => signals,
        Err(e) => {
            warn!("Failed to install signal handler: {}", e);
            return futures::future::pending().await;
        }
    };

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
}

/// Resolve on an OS signal or once `quit` is requested, whichever comes first
pub async fn shutdown_signal(state: Arc<AppState>) {
    tokio::select! {
        _ = os_signal() => {
            if let Err(e) = state.quit() {
                warn!("Failed to stop countdown on signal: {}", e);
            }
        }
        _ = state.quit_requested() => {
            info!("Quit command received");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn resolves_when_quit_is_requested() {
        let state = Arc::new(AppState::new(900));
        let waiter = tokio::spawn(shutdown_signal(Arc::clone(&state)));

        state.quit().unwrap();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("shutdown should resolve")
            .unwrap();
    }
}
