//! Terminal mirror of the countdown label

use std::{io::Write, sync::Arc};
use tracing::{debug, info, warn};

use crate::state::{AppState, TimerState};

/// Text written for one snapshot
pub fn render_label(timer: &TimerState) -> String {
    format!("\r⏱ {}", timer.display)
}

fn write_label(label: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(label.as_bytes())?;
    stdout.flush()
}

/// Rewrite the current stdout line with the label every time it changes
pub async fn label_mirror_task(state: Arc<AppState>) {
    info!("Starting terminal label mirror");

    let mut timer_rx = state.subscribe();
    loop {
        let label = render_label(&timer_rx.borrow_and_update());
        if let Err(e) = write_label(&label) {
            warn!("Failed to write label to stdout: {}", e);
        }

        if timer_rx.changed().await.is_err() {
            debug!("Timer channel closed, stopping label mirror");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CountdownState;

    #[test]
    fn label_rewinds_the_line() {
        let timer = TimerState::capture(&CountdownState::new(61), true);
        assert_eq!(render_label(&timer), "\r⏱ 01:01");
    }
}
